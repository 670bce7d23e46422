mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
use bizdesk_domain::{User, ID};
pub use postgres::PostgresUserRepo;

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_by_apikey(&self, api_key: &str) -> Option<User>;
}

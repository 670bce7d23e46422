mod inmemory;
mod postgres;

use bizdesk_domain::{Client, ID};
pub use inmemory::InMemoryClientRepo;
pub use postgres::PostgresClientRepo;

#[async_trait::async_trait]
pub trait IClientRepo: Send + Sync {
    async fn insert(&self, client: &Client) -> anyhow::Result<()>;
    async fn save(&self, client: &Client) -> anyhow::Result<()>;
    async fn find(&self, client_id: &ID) -> Option<Client>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Client>;
    async fn delete(&self, client_id: &ID) -> Option<Client>;
}

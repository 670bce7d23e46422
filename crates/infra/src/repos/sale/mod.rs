mod inmemory;
mod postgres;

use bizdesk_domain::{Sale, ID};
pub use inmemory::InMemorySaleRepo;
pub use postgres::PostgresSaleRepo;

#[async_trait::async_trait]
pub trait ISaleRepo: Send + Sync {
    async fn insert(&self, sale: &Sale) -> anyhow::Result<()>;
    async fn find(&self, sale_id: &ID) -> Option<Sale>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Sale>;
    /// Sales for a user with `created` in `[from, to)`
    async fn find_by_user_in_period(&self, user_id: &ID, from: i64, to: i64) -> Vec<Sale>;
}

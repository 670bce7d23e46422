mod inmemory;
mod postgres;

use bizdesk_domain::{Product, ID};
pub use inmemory::InMemoryProductRepo;
pub use postgres::PostgresProductRepo;

#[async_trait::async_trait]
pub trait IProductRepo: Send + Sync {
    async fn insert(&self, product: &Product) -> anyhow::Result<()>;
    async fn save(&self, product: &Product) -> anyhow::Result<()>;
    async fn find(&self, product_id: &ID) -> Option<Product>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Product>;
    async fn delete(&self, product_id: &ID) -> Option<Product>;
}

use super::IProductRepo;
use crate::repos::shared::inmemory_repo::*;
use bizdesk_domain::{Product, ID};

pub struct InMemoryProductRepo {
    products: std::sync::Mutex<Vec<Product>>,
}

impl InMemoryProductRepo {
    pub fn new() -> Self {
        Self {
            products: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IProductRepo for InMemoryProductRepo {
    async fn insert(&self, product: &Product) -> anyhow::Result<()> {
        insert(product, &self.products);
        Ok(())
    }

    async fn save(&self, product: &Product) -> anyhow::Result<()> {
        save(product, &self.products);
        Ok(())
    }

    async fn find(&self, product_id: &ID) -> Option<Product> {
        find(product_id, &self.products)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Product> {
        find_by(&self.products, |product| product.user_id == *user_id)
    }

    async fn delete(&self, product_id: &ID) -> Option<Product> {
        delete(product_id, &self.products)
    }
}

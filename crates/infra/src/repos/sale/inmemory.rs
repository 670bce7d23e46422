use super::ISaleRepo;
use crate::repos::shared::inmemory_repo::*;
use bizdesk_domain::{Sale, ID};

pub struct InMemorySaleRepo {
    sales: std::sync::Mutex<Vec<Sale>>,
}

impl InMemorySaleRepo {
    pub fn new() -> Self {
        Self {
            sales: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISaleRepo for InMemorySaleRepo {
    async fn insert(&self, sale: &Sale) -> anyhow::Result<()> {
        insert(sale, &self.sales);
        Ok(())
    }

    async fn find(&self, sale_id: &ID) -> Option<Sale> {
        find(sale_id, &self.sales)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Sale> {
        find_by(&self.sales, |sale| sale.user_id == *user_id)
    }

    async fn find_by_user_in_period(&self, user_id: &ID, from: i64, to: i64) -> Vec<Sale> {
        find_by(&self.sales, |sale| {
            sale.user_id == *user_id && sale.created >= from && sale.created < to
        })
    }
}

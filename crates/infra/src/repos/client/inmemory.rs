use super::IClientRepo;
use crate::repos::shared::inmemory_repo::*;
use bizdesk_domain::{Client, ID};

pub struct InMemoryClientRepo {
    clients: std::sync::Mutex<Vec<Client>>,
}

impl InMemoryClientRepo {
    pub fn new() -> Self {
        Self {
            clients: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IClientRepo for InMemoryClientRepo {
    async fn insert(&self, client: &Client) -> anyhow::Result<()> {
        insert(client, &self.clients);
        Ok(())
    }

    async fn save(&self, client: &Client) -> anyhow::Result<()> {
        save(client, &self.clients);
        Ok(())
    }

    async fn find(&self, client_id: &ID) -> Option<Client> {
        find(client_id, &self.clients)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Client> {
        find_by(&self.clients, |client| client.user_id == *user_id)
    }

    async fn delete(&self, client_id: &ID) -> Option<Client> {
        delete(client_id, &self.clients)
    }
}

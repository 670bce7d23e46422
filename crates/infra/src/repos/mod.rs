mod client;
mod product;
mod reminder;
mod sale;
mod shared;
mod user;

pub use client::IClientRepo;
use client::{InMemoryClientRepo, PostgresClientRepo};
pub use product::IProductRepo;
use product::{InMemoryProductRepo, PostgresProductRepo};
pub use reminder::IReminderRepo;
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
pub use sale::ISaleRepo;
use sale::{InMemorySaleRepo, PostgresSaleRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
pub use user::IUserRepo;
use user::{InMemoryUserRepo, PostgresUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub clients: Arc<dyn IClientRepo>,
    pub products: Arc<dyn IProductRepo>,
    pub sales: Arc<dyn ISaleRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            clients: Arc::new(PostgresClientRepo::new(pool.clone())),
            products: Arc::new(PostgresProductRepo::new(pool.clone())),
            sales: Arc::new(PostgresSaleRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            clients: Arc::new(InMemoryClientRepo::new()),
            products: Arc::new(InMemoryProductRepo::new()),
            sales: Arc::new(InMemorySaleRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
        }
    }
}

mod inmemory;
mod postgres;

use bizdesk_domain::{Reminder, ID};
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder>;
    /// Every pending reminder across all users, the sweep input
    async fn find_pending(&self) -> Vec<Reminder>;
    async fn delete(&self, reminder_id: &ID) -> Option<Reminder>;
}

use bizdesk_domain::{Frequency, Reminder, ReminderStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: String,
    pub client_id: Option<ID>,
    pub due_date: i64,
    pub frequency: Frequency,
    pub amount_cents: Option<i64>,
    pub status: ReminderStatus,
    pub notify_user: bool,
    pub notify_client: bool,
    pub user_notification_message: Option<String>,
    pub client_notification_message: Option<String>,
    pub advance_notification_days: i64,
    pub repeat_until: Option<i64>,
    pub last_notified: Option<i64>,
    pub next_due_date: Option<i64>,
    pub created: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            user_id: reminder.user_id,
            title: reminder.title,
            description: reminder.description,
            client_id: reminder.client_id,
            due_date: reminder.due_date,
            frequency: reminder.frequency,
            amount_cents: reminder.amount_cents,
            status: reminder.status,
            notify_user: reminder.notify_user,
            notify_client: reminder.notify_client,
            user_notification_message: reminder.user_notification_message,
            client_notification_message: reminder.client_notification_message,
            advance_notification_days: reminder.advance_notification_days,
            repeat_until: reminder.repeat_until,
            last_notified: reminder.last_notified,
            next_due_date: reminder.next_due_date,
            created: reminder.created,
        }
    }
}

use crate::dtos::ReminderDTO;
use bizdesk_domain::{Frequency, Reminder, ReminderStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub client_id: Option<ID>,
        pub due_date: i64,
        pub frequency: Frequency,
        #[serde(default)]
        pub amount_cents: Option<i64>,
        #[serde(default)]
        pub notify_user: Option<bool>,
        #[serde(default)]
        pub notify_client: Option<bool>,
        #[serde(default)]
        pub user_notification_message: Option<String>,
        #[serde(default)]
        pub client_notification_message: Option<String>,
        #[serde(default)]
        pub advance_notification_days: Option<i64>,
        #[serde(default)]
        pub repeat_until: Option<i64>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod update_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    /// Explicit partial update: only named fields, absent fields stay
    /// untouched
    #[derive(Deserialize, Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub client_id: Option<ID>,
        #[serde(default)]
        pub due_date: Option<i64>,
        #[serde(default)]
        pub frequency: Option<Frequency>,
        #[serde(default)]
        pub amount_cents: Option<i64>,
        #[serde(default)]
        pub status: Option<ReminderStatus>,
        #[serde(default)]
        pub notify_user: Option<bool>,
        #[serde(default)]
        pub notify_client: Option<bool>,
        #[serde(default)]
        pub user_notification_message: Option<String>,
        #[serde(default)]
        pub client_notification_message: Option<String>,
        #[serde(default)]
        pub advance_notification_days: Option<i64>,
        #[serde(default)]
        pub repeat_until: Option<i64>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod delete_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod complete_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Deserialize, Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub completion_message: Option<String>,
        #[serde(default)]
        pub notify_user: Option<bool>,
        #[serde(default)]
        pub notify_client: Option<bool>,
    }

    pub type APIResponse = ReminderResponse;
}

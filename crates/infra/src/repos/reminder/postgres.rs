use super::IReminderRepo;
use bizdesk_domain::{Reminder, ReminderStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    user_uid: Uuid,
    title: String,
    description: String,
    client_uid: Option<Uuid>,
    due_date: i64,
    frequency: String,
    amount_cents: Option<i64>,
    status: String,
    notify_user: bool,
    notify_client: bool,
    user_notification_message: Option<String>,
    client_notification_message: Option<String>,
    advance_notification_days: i64,
    repeat_until: Option<i64>,
    last_notified: Option<i64>,
    next_due_date: Option<i64>,
    created: i64,
}

impl From<ReminderRaw> for Reminder {
    fn from(e: ReminderRaw) -> Self {
        Self {
            id: e.reminder_uid.into(),
            user_id: e.user_uid.into(),
            title: e.title,
            description: e.description,
            client_id: e.client_uid.map(|uid| uid.into()),
            due_date: e.due_date,
            frequency: e.frequency.parse().unwrap(),
            amount_cents: e.amount_cents,
            status: e.status.parse().unwrap(),
            notify_user: e.notify_user,
            notify_client: e.notify_client,
            user_notification_message: e.user_notification_message,
            client_notification_message: e.client_notification_message,
            advance_notification_days: e.advance_notification_days,
            repeat_until: e.repeat_until,
            last_notified: e.last_notified,
            next_due_date: e.next_due_date,
            created: e.created,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, user_uid, title, description, client_uid, due_date, frequency,
             amount_cents, status, notify_user, notify_client, user_notification_message,
             client_notification_message, advance_notification_days, repeat_until,
             last_notified, next_due_date, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(reminder.client_id.as_ref().map(|id| *id.inner_ref()))
        .bind(reminder.due_date)
        .bind(reminder.frequency.to_string())
        .bind(reminder.amount_cents)
        .bind(reminder.status.to_string())
        .bind(reminder.notify_user)
        .bind(reminder.notify_client)
        .bind(&reminder.user_notification_message)
        .bind(&reminder.client_notification_message)
        .bind(reminder.advance_notification_days)
        .bind(reminder.repeat_until)
        .bind(reminder.last_notified)
        .bind(reminder.next_due_date)
        .bind(reminder.created)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert reminder: {:?}. DB returned error: {:?}",
                reminder, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET title = $2,
            description = $3,
            client_uid = $4,
            due_date = $5,
            frequency = $6,
            amount_cents = $7,
            status = $8,
            notify_user = $9,
            notify_client = $10,
            user_notification_message = $11,
            client_notification_message = $12,
            advance_notification_days = $13,
            repeat_until = $14,
            last_notified = $15,
            next_due_date = $16
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(reminder.client_id.as_ref().map(|id| *id.inner_ref()))
        .bind(reminder.due_date)
        .bind(reminder.frequency.to_string())
        .bind(reminder.amount_cents)
        .bind(reminder.status.to_string())
        .bind(reminder.notify_user)
        .bind(reminder.notify_client)
        .bind(&reminder.user_notification_message)
        .bind(&reminder.client_notification_message)
        .bind(reminder.advance_notification_days)
        .bind(reminder.repeat_until)
        .bind(reminder.last_notified)
        .bind(reminder.next_due_date)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save reminder: {:?}. DB returned error: {:?}",
                reminder, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        let res: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find reminder with id: {:?} failed. DB returned error: {:?}",
                reminder_id, e
            );
            e
        })
        .ok()?;
        res.map(|reminder| reminder.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Reminder> {
        let reminders_raw: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE user_uid = $1
            ORDER BY due_date ASC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!(
                "Find reminders for user: {:?} failed. DB returned error: {:?}",
                user_id, e
            );
            Vec::new()
        });
        reminders_raw
            .into_iter()
            .map(|reminder| reminder.into())
            .collect()
    }

    async fn find_pending(&self) -> Vec<Reminder> {
        let reminders_raw: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE status = $1
            "#,
        )
        .bind(ReminderStatus::Pending.to_string())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Find pending reminders failed. DB returned error: {:?}", e);
            Vec::new()
        });
        reminders_raw
            .into_iter()
            .map(|reminder| reminder.into())
            .collect()
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        let res: Option<ReminderRaw> = sqlx::query_as(
            r#"
            DELETE FROM reminders
            WHERE reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Delete reminder with id: {:?} failed. DB returned error: {:?}",
                reminder_id, e
            );
            e
        })
        .ok()?;
        res.map(|reminder| reminder.into())
    }
}

use crate::services::mailer::IMailer;
use bizdesk_domain::{Client, Reminder, User};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

/// Composes and dispatches the notification email for reminders. Each
/// dispatch is independently fallible; callers treat failures as non-fatal
/// and log them.
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn IMailer>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn IMailer>) -> Self {
        Self { mailer }
    }

    pub async fn notify_user_of_reminder(
        &self,
        user: &User,
        reminder: &Reminder,
    ) -> anyhow::Result<()> {
        let subject = format!("Reminder: {}", reminder.title);
        let body = match &reminder.user_notification_message {
            Some(message) => message.clone(),
            None => default_reminder_message(reminder),
        };
        self.mailer
            .send(user.email.as_str(), &subject, &body, &as_html(&body))
            .await
    }

    pub async fn notify_client_of_reminder(
        &self,
        client: &Client,
        reminder: &Reminder,
    ) -> anyhow::Result<()> {
        let subject = format!("Reminder: {}", reminder.title);
        let body = match &reminder.client_notification_message {
            Some(message) => message.clone(),
            None => default_reminder_message(reminder),
        };
        self.mailer
            .send(client.email.as_str(), &subject, &body, &as_html(&body))
            .await
    }

    pub async fn notify_user_of_completion(
        &self,
        user: &User,
        reminder: &Reminder,
        message: Option<&str>,
    ) -> anyhow::Result<()> {
        let subject = format!("Completed: {}", reminder.title);
        let body = message
            .map(|m| m.to_string())
            .unwrap_or_else(|| default_completion_message(reminder));
        self.mailer
            .send(user.email.as_str(), &subject, &body, &as_html(&body))
            .await
    }

    pub async fn notify_client_of_completion(
        &self,
        client: &Client,
        reminder: &Reminder,
        message: Option<&str>,
    ) -> anyhow::Result<()> {
        let subject = format!("Completed: {}", reminder.title);
        let body = message
            .map(|m| m.to_string())
            .unwrap_or_else(|| default_completion_message(reminder));
        self.mailer
            .send(client.email.as_str(), &subject, &body, &as_html(&body))
            .await
    }
}

fn default_reminder_message(reminder: &Reminder) -> String {
    let due = format_due_date(reminder.due_date);
    let mut body = format!("\"{}\" is due at {}.", reminder.title, due);
    if !reminder.description.is_empty() {
        body.push_str(&format!("\n\n{}", reminder.description));
    }
    if let Some(amount_cents) = reminder.amount_cents {
        body.push_str(&format!("\n\nAmount: {}", format_amount(amount_cents)));
    }
    body
}

fn default_completion_message(reminder: &Reminder) -> String {
    format!("\"{}\" has been marked as completed.", reminder.title)
}

fn format_due_date(due_date: i64) -> String {
    Utc.timestamp_millis(due_date)
        .format("%Y-%m-%d %H:%M UTC")
        .to_string()
}

fn format_amount(amount_cents: i64) -> String {
    format!("{}.{:02}", amount_cents / 100, (amount_cents % 100).abs())
}

fn as_html(body: &str) -> String {
    let paragraphs = body
        .split("\n\n")
        .map(|p| format!("<p>{}</p>", p.replace('\n', "<br/>")))
        .collect::<Vec<_>>();
    paragraphs.join("")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn formats_amounts_in_cents() {
        assert_eq!(format_amount(45_000), "450.00");
        assert_eq!(format_amount(105), "1.05");
        assert_eq!(format_amount(0), "0.00");
    }

    #[test]
    fn renders_paragraphs_as_html() {
        assert_eq!(
            as_html("first\n\nsecond line\nwrapped"),
            "<p>first</p><p>second line<br/>wrapped</p>"
        );
    }
}

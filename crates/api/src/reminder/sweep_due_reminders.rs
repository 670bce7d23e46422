use crate::shared::usecase::UseCase;
use bizdesk_domain::Reminder;
use bizdesk_infra::BizdeskContext;
use tracing::error;

/// One tick of the reminder sweep: evaluates every pending reminder across
/// all users against the current wall-clock time, dispatches the eligible
/// notifications and records the firing on the reminder.
///
/// No failure of a single reminder may abort the tick. A reminder whose
/// `last_notified` write fails is picked up again on the next tick because
/// its state did not advance.
#[derive(Debug)]
pub struct SweepDueRemindersUseCase;

#[derive(Debug)]
pub enum UseCaseError {}

#[derive(Debug, Default, PartialEq)]
pub struct SweepReport {
    pub evaluated: usize,
    pub notified: usize,
    pub failed: usize,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SweepDueRemindersUseCase {
    type Response = SweepReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SweepDueReminders";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let reminders = ctx.repos.reminders.find_pending().await;

        let mut report = SweepReport {
            evaluated: reminders.len(),
            ..Default::default()
        };

        for reminder in reminders {
            match process_reminder(&reminder, now, ctx).await {
                Ok(true) => report.notified += 1,
                Ok(false) => {}
                Err(e) => {
                    error!(
                        "Sweep failed to process reminder: {}. Error: {:?}",
                        reminder.id, e
                    );
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}

/// Handles a single reminder within a tick. Notification failures are logged
/// and do not prevent the other recipient's notification nor the state
/// update; only a failure to persist `last_notified` is raised so the caller
/// can count it.
async fn process_reminder(
    reminder: &Reminder,
    now: i64,
    ctx: &BizdeskContext,
) -> anyhow::Result<bool> {
    let evaluation = reminder.evaluate(now);
    if !evaluation.should_fire() {
        return Ok(false);
    }

    if reminder.notify_user {
        match ctx.repos.users.find(&reminder.user_id).await {
            Some(user) => {
                if let Err(e) = ctx.notifier.notify_user_of_reminder(&user, reminder).await {
                    error!(
                        "Unable to notify user: {} of reminder: {}. Error: {:?}",
                        user.id, reminder.id, e
                    );
                }
            }
            None => error!(
                "User: {} owning reminder: {} was not found",
                reminder.user_id, reminder.id
            ),
        }
    }

    if reminder.notify_client {
        if let Some(client_id) = &reminder.client_id {
            match ctx.repos.clients.find(client_id).await {
                Some(client) => {
                    if let Err(e) = ctx
                        .notifier
                        .notify_client_of_reminder(&client, reminder)
                        .await
                    {
                        error!(
                            "Unable to notify client: {} of reminder: {}. Error: {:?}",
                            client.id, reminder.id, e
                        );
                    }
                }
                None => error!(
                    "Client: {} linked to reminder: {} was not found",
                    client_id, reminder.id
                ),
            }
        }
    }

    // One write per fired reminder per tick, regardless of which of the two
    // notification kinds fired and of individual dispatch failures
    let mut fired = reminder.clone();
    fired.last_notified = Some(now);
    ctx.repos.reminders.save(&fired).await?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use bizdesk_domain::{Client, Email, Frequency, ReminderStatus, User};
    use bizdesk_infra::{setup_context_inmemory, IMailer, ISys, InMemoryMailer, Notifier};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    pub struct StaticTimeSys(i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    /// Mailer where every send fails, to exercise failure isolation
    struct FailingMailer;

    #[async_trait::async_trait]
    impl IMailer for FailingMailer {
        async fn send(
            &self,
            _to: &str,
            _subject: &str,
            _text: &str,
            _html: &str,
        ) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("smtp connection refused"))
        }
    }

    const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;

    fn ts(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> i64 {
        Utc.ymd(year, month, day)
            .and_hms(hour, min, sec)
            .timestamp_millis()
    }

    fn reminder_factory(user: &User, due_date: i64) -> Reminder {
        Reminder {
            id: Default::default(),
            user_id: user.id.clone(),
            title: "Chair rent".into(),
            description: "".into(),
            client_id: None,
            due_date,
            frequency: Frequency::Monthly,
            amount_cents: Some(45_000),
            status: ReminderStatus::Pending,
            notify_user: true,
            notify_client: false,
            user_notification_message: None,
            client_notification_message: None,
            advance_notification_days: 0,
            repeat_until: None,
            last_notified: None,
            next_due_date: None,
            created: 0,
        }
    }

    fn user_factory() -> User {
        User::new(
            "Eva".into(),
            Email::new("eva@studio-sax.no".into()).unwrap(),
        )
    }

    async fn run_sweep_at(ctx: &mut BizdeskContext, now: i64) -> SweepReport {
        ctx.sys = Arc::new(StaticTimeSys(now));
        execute(SweepDueRemindersUseCase, ctx).await.unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn sweeps_reminder_through_advance_due_and_nothing_between() {
        let mailer = Arc::new(InMemoryMailer::new());
        let mut ctx = setup_context_inmemory();
        ctx.notifier = Notifier::new(mailer.clone());

        let user = user_factory();
        ctx.repos.users.insert(&user).await.unwrap();

        let due = ts(2024, 4, 15, 9, 0, 0);
        let mut reminder = reminder_factory(&user, due);
        reminder.advance_notification_days = 3;
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        // Tick within the advance-notice window, three days before due
        let advance_tick = due - 3 * DAY_MILLIS + 10_000;
        let report = run_sweep_at(&mut ctx, advance_tick).await;
        assert_eq!(report.notified, 1);
        assert_eq!(mailer.sent().len(), 1);
        assert_eq!(mailer.sent()[0].to, user.email.to_string());

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(stored.last_notified, Some(advance_tick));

        // A tick the day after the advance notice fires nothing
        let report = run_sweep_at(&mut ctx, due - 2 * DAY_MILLIS).await;
        assert_eq!(report.notified, 0);
        assert_eq!(mailer.sent().len(), 1);

        // Tick within the due-date window
        let due_tick = due + 20_000;
        let report = run_sweep_at(&mut ctx, due_tick).await;
        assert_eq!(report.notified, 1);
        assert_eq!(mailer.sent().len(), 2);

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(stored.last_notified, Some(due_tick));

        // A second tick in the same minute is deduplicated
        let report = run_sweep_at(&mut ctx, due_tick + 15_000).await;
        assert_eq!(report.notified, 0);
        assert_eq!(mailer.sent().len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn notifies_linked_client_when_configured() {
        let mailer = Arc::new(InMemoryMailer::new());
        let mut ctx = setup_context_inmemory();
        ctx.notifier = Notifier::new(mailer.clone());

        let user = user_factory();
        ctx.repos.users.insert(&user).await.unwrap();
        let client = Client::new(
            user.id.clone(),
            "Kari".into(),
            Email::new("kari@salon.no".into()).unwrap(),
        );
        ctx.repos.clients.insert(&client).await.unwrap();

        let due = ts(2024, 4, 15, 9, 0, 0);
        let mut reminder = reminder_factory(&user, due);
        reminder.notify_client = true;
        reminder.client_id = Some(client.id.clone());
        reminder.client_notification_message = Some("Your color refresh is due".into());
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        run_sweep_at(&mut ctx, due + 5_000).await;

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        let recipients = sent.iter().map(|m| m.to.clone()).collect::<Vec<_>>();
        assert!(recipients.contains(&user.email.to_string()));
        assert!(recipients.contains(&client.email.to_string()));

        let client_mail = sent
            .iter()
            .find(|m| m.to == client.email.to_string())
            .unwrap();
        assert_eq!(client_mail.text, "Your color refresh is due");
    }

    #[actix_web::main]
    #[test]
    async fn one_broken_reminder_does_not_abort_the_sweep() {
        let mailer = Arc::new(InMemoryMailer::new());
        let mut ctx = setup_context_inmemory();
        ctx.notifier = Notifier::new(mailer.clone());

        let user = user_factory();
        ctx.repos.users.insert(&user).await.unwrap();

        let due = ts(2024, 4, 15, 9, 0, 0);

        // Reminder pointing at a client that no longer exists
        let mut broken = reminder_factory(&user, due);
        broken.notify_client = true;
        broken.client_id = Some(Default::default());
        ctx.repos.reminders.insert(&broken).await.unwrap();

        let healthy = reminder_factory(&user, due);
        ctx.repos.reminders.insert(&healthy).await.unwrap();

        let report = run_sweep_at(&mut ctx, due + 5_000).await;
        assert_eq!(report.evaluated, 2);
        assert_eq!(report.notified, 2);
        assert_eq!(report.failed, 0);

        // Both reminders got their user notification and state update
        assert_eq!(mailer.sent().len(), 2);
        let stored = ctx.repos.reminders.find(&healthy.id).await.unwrap();
        assert_eq!(stored.last_notified, Some(due + 5_000));
    }

    #[actix_web::main]
    #[test]
    async fn mailer_failure_still_records_the_firing() {
        let mut ctx = setup_context_inmemory();
        ctx.notifier = Notifier::new(Arc::new(FailingMailer));

        let user = user_factory();
        ctx.repos.users.insert(&user).await.unwrap();

        let due = ts(2024, 4, 15, 9, 0, 0);
        let reminder = reminder_factory(&user, due);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let report = run_sweep_at(&mut ctx, due + 5_000).await;
        assert_eq!(report.notified, 1);
        assert_eq!(report.failed, 0);

        // At-least-once delivery is prioritized over perfect bookkeeping:
        // the firing is recorded even though dispatch failed
        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(stored.last_notified, Some(due + 5_000));
    }

    #[actix_web::main]
    #[test]
    async fn skips_reminders_outside_their_window() {
        let mailer = Arc::new(InMemoryMailer::new());
        let mut ctx = setup_context_inmemory();
        ctx.notifier = Notifier::new(mailer.clone());

        let user = user_factory();
        ctx.repos.users.insert(&user).await.unwrap();

        let due = ts(2024, 4, 15, 9, 0, 0);
        // Missed by more than the tolerance window: stays unnotified
        let missed = reminder_factory(&user, due - 10 * 60 * 1000);
        ctx.repos.reminders.insert(&missed).await.unwrap();
        // Not due for another week
        let upcoming = reminder_factory(&user, due + 7 * DAY_MILLIS);
        ctx.repos.reminders.insert(&upcoming).await.unwrap();

        let report = run_sweep_at(&mut ctx, due).await;
        assert_eq!(report.evaluated, 2);
        assert_eq!(report.notified, 0);
        assert!(mailer.sent().is_empty());

        let stored = ctx.repos.reminders.find(&missed.id).await.unwrap();
        assert_eq!(stored.last_notified, None);
    }

    #[actix_web::main]
    #[test]
    async fn ignores_recipients_that_are_disabled() {
        let mailer = Arc::new(InMemoryMailer::new());
        let mut ctx = setup_context_inmemory();
        ctx.notifier = Notifier::new(mailer.clone());

        let user = user_factory();
        ctx.repos.users.insert(&user).await.unwrap();

        let due = ts(2024, 4, 15, 9, 0, 0);
        let mut reminder = reminder_factory(&user, due);
        reminder.notify_user = false;
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let report = run_sweep_at(&mut ctx, due + 5_000).await;
        // The firing is still recorded, there was just nobody to notify
        assert_eq!(report.notified, 1);
        assert!(mailer.sent().is_empty());
    }
}

use crate::error::BizdeskError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::update_reminder::*;
use bizdesk_domain::{Frequency, Reminder, ReminderStatus, ID};
use bizdesk_infra::BizdeskContext;

pub async fn update_reminder_controller(
    http_req: web::HttpRequest,
    path_params: web::Path<PathParams>,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body_params.0;
    let usecase = UpdateReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        user_id: user.id,
        title: body.title,
        description: body.description,
        client_id: body.client_id,
        due_date: body.due_date,
        frequency: body.frequency,
        amount_cents: body.amount_cents,
        status: body.status,
        notify_user: body.notify_user,
        notify_client: body.notify_client,
        user_notification_message: body.user_notification_message,
        client_notification_message: body.client_notification_message,
        advance_notification_days: body.advance_notification_days,
        repeat_until: body.repeat_until,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder)))
        .map_err(BizdeskError::from)
}

/// Partial update of a pending reminder. Absent fields are left untouched;
/// the only status edge accepted here is pending to cancelled (completion
/// goes through its own workflow).
#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub reminder_id: ID,
    pub user_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub client_id: Option<ID>,
    pub due_date: Option<i64>,
    pub frequency: Option<Frequency>,
    pub amount_cents: Option<i64>,
    pub status: Option<ReminderStatus>,
    pub notify_user: Option<bool>,
    pub notify_client: Option<bool>,
    pub user_notification_message: Option<String>,
    pub client_notification_message: Option<String>,
    pub advance_notification_days: Option<i64>,
    pub repeat_until: Option<i64>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    NotPending(ID),
    InvalidStatusChange(ReminderStatus),
    InvalidAdvanceNotificationDays(i64),
    ClientNotFound(ID),
    Storage,
}

impl From<UseCaseError> for BizdeskError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::NotPending(reminder_id) => Self::Conflict(format!(
                "The reminder with id: {}, is not pending and cannot be updated.",
                reminder_id
            )),
            UseCaseError::InvalidStatusChange(status) => Self::BadClientData(format!(
                "A pending reminder can only be cancelled, not set to: {}.",
                status
            )),
            UseCaseError::InvalidAdvanceNotificationDays(days) => Self::BadClientData(format!(
                "Advance notification days must not be negative, got: {}.",
                days
            )),
            UseCaseError::ClientNotFound(client_id) => {
                Self::NotFound(format!("The client with id: {}, was not found.", client_id))
            }
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminder: Reminder,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        let reminder = ctx.repos.reminders.find(&self.reminder_id).await;
        let mut reminder = match reminder {
            Some(reminder) if reminder.user_id == self.user_id => reminder,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };
        if reminder.status != ReminderStatus::Pending {
            return Err(UseCaseError::NotPending(reminder.id.clone()));
        }

        if let Some(status) = self.status {
            if status != ReminderStatus::Cancelled {
                return Err(UseCaseError::InvalidStatusChange(status));
            }
            reminder.status = ReminderStatus::Cancelled;
        }

        if let Some(days) = self.advance_notification_days {
            if days < 0 {
                return Err(UseCaseError::InvalidAdvanceNotificationDays(days));
            }
            reminder.advance_notification_days = days;
        }

        if let Some(client_id) = &self.client_id {
            let client = ctx.repos.clients.find(client_id).await;
            match client {
                Some(client) if client.user_id == self.user_id => {
                    reminder.client_id = Some(client.id);
                }
                _ => return Err(UseCaseError::ClientNotFound(client_id.clone())),
            }
        }

        if let Some(title) = &self.title {
            reminder.title = title.clone();
        }
        if let Some(description) = &self.description {
            reminder.description = description.clone();
        }
        if let Some(amount_cents) = self.amount_cents {
            reminder.amount_cents = Some(amount_cents);
        }
        if let Some(notify_user) = self.notify_user {
            reminder.notify_user = notify_user;
        }
        if let Some(notify_client) = self.notify_client {
            reminder.notify_client = notify_client;
        }
        if let Some(message) = &self.user_notification_message {
            reminder.user_notification_message = Some(message.clone());
        }
        if let Some(message) = &self.client_notification_message {
            reminder.client_notification_message = Some(message.clone());
        }

        // Any change to the schedule invalidates the precomputed next
        // occurrence
        let schedule_changed =
            self.due_date.is_some() || self.frequency.is_some() || self.repeat_until.is_some();
        if let Some(due_date) = self.due_date {
            reminder.due_date = due_date;
            // A moved due date starts a fresh occurrence
            reminder.last_notified = None;
        }
        if let Some(frequency) = self.frequency {
            reminder.frequency = frequency;
        }
        if let Some(repeat_until) = self.repeat_until {
            reminder.repeat_until = Some(repeat_until);
        }
        if schedule_changed {
            let now = ctx.sys.get_timestamp_millis();
            reminder.next_due_date = reminder.compute_next_due_date(now);
        }

        let res = ctx.repos.reminders.save(&reminder).await;
        match res {
            Ok(_) => Ok(UseCaseRes { reminder }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdesk_domain::{Email, User};
    use bizdesk_infra::{setup_context_inmemory, ISys};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    pub struct StaticTimeSys(i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    fn ts(year: i32, month: u32, day: u32, hour: u32) -> i64 {
        Utc.ymd(year, month, day)
            .and_hms(hour, 0, 0)
            .timestamp_millis()
    }

    fn reminder_factory(user: &User, due_date: i64, frequency: Frequency) -> Reminder {
        let mut reminder = Reminder {
            id: Default::default(),
            user_id: user.id.clone(),
            title: "Chair rent".into(),
            description: "".into(),
            client_id: None,
            due_date,
            frequency,
            amount_cents: None,
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
        };
        reminder.next_due_date = reminder.compute_next_due_date(0);
        reminder
    }

    fn usecase_factory(reminder: &Reminder, user: &User) -> UpdateReminderUseCase {
        UpdateReminderUseCase {
            reminder_id: reminder.id.clone(),
            user_id: user.id.clone(),
            title: None,
            description: None,
            client_id: None,
            due_date: None,
            frequency: None,
            amount_cents: None,
            status: None,
            notify_user: None,
            notify_client: None,
            user_notification_message: None,
            client_notification_message: None,
            advance_notification_days: None,
            repeat_until: None,
        }
    }

    fn user_factory() -> User {
        User::new(
            "Eva".into(),
            Email::new("eva@studio-sax.no".into()).unwrap(),
        )
    }

    #[actix_web::main]
    #[test]
    async fn moving_due_date_recomputes_next_occurrence_and_resets_firing() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(ts(2024, 4, 1, 8)));

        let user = user_factory();
        ctx.repos.users.insert(&user).await.unwrap();
        let mut reminder = reminder_factory(&user, ts(2024, 4, 15, 9), Frequency::Daily);
        reminder.last_notified = Some(ts(2024, 4, 12, 9));
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let new_due = ts(2024, 5, 1, 9);
        let mut usecase = usecase_factory(&reminder, &user);
        usecase.due_date = Some(new_due);
        let res = execute(usecase, &ctx).await.unwrap();

        assert_eq!(res.reminder.due_date, new_due);
        assert_eq!(res.reminder.last_notified, None);
        assert_eq!(
            res.reminder.next_due_date,
            Some(new_due + 24 * 60 * 60 * 1000)
        );
    }

    #[actix_web::main]
    #[test]
    async fn switching_to_once_clears_next_due_date() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(ts(2024, 4, 1, 8)));

        let user = user_factory();
        ctx.repos.users.insert(&user).await.unwrap();
        let reminder = reminder_factory(&user, ts(2024, 4, 15, 9), Frequency::Weekly);
        assert!(reminder.next_due_date.is_some());
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = usecase_factory(&reminder, &user);
        usecase.frequency = Some(Frequency::Once);
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.reminder.next_due_date, None);
    }

    #[actix_web::main]
    #[test]
    async fn cancelling_is_the_only_status_change_allowed() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(ts(2024, 4, 1, 8)));

        let user = user_factory();
        ctx.repos.users.insert(&user).await.unwrap();
        let reminder = reminder_factory(&user, ts(2024, 4, 15, 9), Frequency::Once);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = usecase_factory(&reminder, &user);
        usecase.status = Some(ReminderStatus::Completed);
        let res = execute(usecase, &ctx).await;
        assert!(matches!(
            res,
            Err(UseCaseError::InvalidStatusChange(ReminderStatus::Completed))
        ));

        let mut usecase = usecase_factory(&reminder, &user);
        usecase.status = Some(ReminderStatus::Cancelled);
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.reminder.status, ReminderStatus::Cancelled);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_update_of_cancelled_reminder() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(ts(2024, 4, 1, 8)));

        let user = user_factory();
        ctx.repos.users.insert(&user).await.unwrap();
        let mut reminder = reminder_factory(&user, ts(2024, 4, 15, 9), Frequency::Once);
        reminder.status = ReminderStatus::Cancelled;
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = usecase_factory(&reminder, &user);
        usecase.title = Some("New title".into());
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::NotPending(_))));
    }
}

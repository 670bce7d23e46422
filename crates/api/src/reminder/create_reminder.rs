use crate::error::BizdeskError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::create_reminder::*;
use bizdesk_domain::{next_occurrence, Frequency, Reminder, ReminderStatus, ID};
use bizdesk_infra::BizdeskContext;

pub async fn create_reminder_controller(
    http_req: web::HttpRequest,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body_params.0;
    let usecase = CreateReminderUseCase {
        user_id: user.id,
        title: body.title,
        description: body.description.unwrap_or_default(),
        client_id: body.client_id,
        due_date: body.due_date,
        frequency: body.frequency,
        amount_cents: body.amount_cents,
        notify_user: body.notify_user.unwrap_or(true),
        notify_client: body.notify_client.unwrap_or(false),
        user_notification_message: body.user_notification_message,
        client_notification_message: body.client_notification_message,
        advance_notification_days: body.advance_notification_days.unwrap_or(0),
        repeat_until: body.repeat_until,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.reminder)))
        .map_err(BizdeskError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user_id: ID,
    pub title: String,
    pub description: String,
    pub client_id: Option<ID>,
    pub due_date: i64,
    pub frequency: Frequency,
    pub amount_cents: Option<i64>,
    pub notify_user: bool,
    pub notify_client: bool,
    pub user_notification_message: Option<String>,
    pub client_notification_message: Option<String>,
    pub advance_notification_days: i64,
    pub repeat_until: Option<i64>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidAdvanceNotificationDays(i64),
    EmptyTitle,
    ClientNotFound(ID),
    Storage,
}

impl From<UseCaseError> for BizdeskError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidAdvanceNotificationDays(days) => Self::BadClientData(format!(
                "Advance notification days must not be negative, got: {}.",
                days
            )),
            UseCaseError::EmptyTitle => {
                Self::BadClientData("A reminder must have a title.".to_string())
            }
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
impl UseCase for CreateReminderUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        if self.title.trim().is_empty() {
            return Err(UseCaseError::EmptyTitle);
        }
        if self.advance_notification_days < 0 {
            return Err(UseCaseError::InvalidAdvanceNotificationDays(
                self.advance_notification_days,
            ));
        }
        if let Some(client_id) = &self.client_id {
            let client = ctx.repos.clients.find(client_id).await;
            match client {
                Some(client) if client.user_id == self.user_id => (),
                _ => return Err(UseCaseError::ClientNotFound(client_id.clone())),
            }
        }

        let now = ctx.sys.get_timestamp_millis();
        let reminder = Reminder {
            id: Default::default(),
            user_id: self.user_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            client_id: self.client_id.clone(),
            due_date: self.due_date,
            frequency: self.frequency,
            amount_cents: self.amount_cents,
            status: ReminderStatus::Pending,
            notify_user: self.notify_user,
            notify_client: self.notify_client,
            user_notification_message: self.user_notification_message.clone(),
            client_notification_message: self.client_notification_message.clone(),
            advance_notification_days: self.advance_notification_days,
            repeat_until: self.repeat_until,
            last_notified: None,
            next_due_date: next_occurrence(self.due_date, self.frequency, self.repeat_until, now),
            created: now,
        };

        let res = ctx.repos.reminders.insert(&reminder).await;
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

    fn usecase_factory(user_id: ID, due_date: i64, frequency: Frequency) -> CreateReminderUseCase {
        CreateReminderUseCase {
            user_id,
            title: "Restock retail shelf".into(),
            description: "".into(),
            client_id: None,
            due_date,
            frequency,
            amount_cents: None,
            notify_user: true,
            notify_client: false,
            user_notification_message: None,
            client_notification_message: None,
            advance_notification_days: 0,
            repeat_until: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_pending_reminder_with_precomputed_next_due_date() {
        let mut ctx = setup_context_inmemory();
        let now = Utc.ymd(2024, 4, 1).and_hms(8, 0, 0).timestamp_millis();
        ctx.sys = Arc::new(StaticTimeSys(now));

        let user = User::new(
            "Eva".into(),
            Email::new("eva@studio-sax.no".into()).unwrap(),
        );
        ctx.repos.users.insert(&user).await.unwrap();

        let due = Utc.ymd(2024, 4, 15).and_hms(9, 0, 0).timestamp_millis();
        let usecase = usecase_factory(user.id.clone(), due, Frequency::Weekly);
        let res = execute(usecase, &ctx).await.unwrap();

        assert_eq!(res.reminder.status, ReminderStatus::Pending);
        assert_eq!(res.reminder.last_notified, None);
        assert_eq!(
            res.reminder.next_due_date,
            Some(due + 7 * 24 * 60 * 60 * 1000)
        );
    }

    #[actix_web::main]
    #[test]
    async fn once_reminder_has_no_next_due_date() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(0));

        let usecase = usecase_factory(Default::default(), 1000, Frequency::Once);
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.reminder.next_due_date, None);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_negative_advance_notification_days() {
        let ctx = setup_context_inmemory();

        let mut usecase = usecase_factory(Default::default(), 1000, Frequency::Once);
        usecase.advance_notification_days = -1;
        let res = execute(usecase, &ctx).await;
        assert!(matches!(
            res,
            Err(UseCaseError::InvalidAdvanceNotificationDays(-1))
        ));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_client_owned_by_another_user() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(0));

        let other = User::new(
            "Mallory".into(),
            Email::new("mallory@other.biz".into()).unwrap(),
        );
        ctx.repos.users.insert(&other).await.unwrap();
        let foreign_client = bizdesk_domain::Client::new(
            other.id.clone(),
            "Kari".into(),
            Email::new("kari@salon.no".into()).unwrap(),
        );
        ctx.repos.clients.insert(&foreign_client).await.unwrap();

        let mut usecase = usecase_factory(Default::default(), 1000, Frequency::Once);
        usecase.client_id = Some(foreign_client.id.clone());
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::ClientNotFound(_))));
    }
}

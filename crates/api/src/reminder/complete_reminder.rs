use crate::error::BizdeskError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::complete_reminder::*;
use bizdesk_domain::{Frequency, Reminder, ReminderStatus, ID};
use bizdesk_infra::BizdeskContext;
use tracing::error;

pub async fn complete_reminder_controller(
    http_req: web::HttpRequest,
    path_params: web::Path<PathParams>,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = CompleteReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        user_id: user.id,
        completion_message: body_params.0.completion_message,
        notify_user: body_params.0.notify_user.unwrap_or(false),
        notify_client: body_params.0.notify_client.unwrap_or(false),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder)))
        .map_err(BizdeskError::from)
}

/// Marks a reminder completed and, for recurring series, spawns the next
/// occurrence as a fresh pending reminder. The completed original stays
/// around as history.
#[derive(Debug)]
pub struct CompleteReminderUseCase {
    pub reminder_id: ID,
    pub user_id: ID,
    pub completion_message: Option<String>,
    pub notify_user: bool,
    pub notify_client: bool,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    NotPending(ID),
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
                "The reminder with id: {}, is not pending and cannot be completed.",
                reminder_id
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminder: Reminder,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CompleteReminderUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CompleteReminder";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        let reminder = ctx.repos.reminders.find(&self.reminder_id).await;
        let mut reminder = match reminder {
            Some(reminder) if reminder.user_id == self.user_id => reminder,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };
        if reminder.status != ReminderStatus::Pending {
            return Err(UseCaseError::NotPending(reminder.id.clone()));
        }

        let now = ctx.sys.get_timestamp_millis();
        reminder.status = ReminderStatus::Completed;

        // Rollover is best-effort: a completed reminder with a lost successor
        // beats a reminder stuck pending forever
        if reminder.frequency != Frequency::Once {
            if let Some(next_due) = reminder.next_due_date {
                let successor = reminder.spawn_successor(next_due, now);
                if ctx.repos.reminders.insert(&successor).await.is_err() {
                    error!(
                        "Unable to create next occurrence for completed reminder: {}",
                        reminder.id
                    );
                }
            }
        }

        // The primary write: this is the only failure the caller sees
        if ctx.repos.reminders.save(&reminder).await.is_err() {
            return Err(UseCaseError::Storage);
        }

        send_completion_notices(self, &reminder, ctx).await;

        Ok(UseCaseRes { reminder })
    }
}

/// Completion notices are independently gated per recipient and never fail
/// the completion itself.
async fn send_completion_notices(
    usecase: &CompleteReminderUseCase,
    reminder: &Reminder,
    ctx: &BizdeskContext,
) {
    let message = usecase.completion_message.as_deref();

    if usecase.notify_user {
        match ctx.repos.users.find(&reminder.user_id).await {
            Some(user) => {
                if let Err(e) = ctx
                    .notifier
                    .notify_user_of_completion(&user, reminder, message)
                    .await
                {
                    error!(
                        "Unable to send completion notice to user: {} for reminder: {}. Error: {:?}",
                        user.id, reminder.id, e
                    );
                }
            }
            None => error!(
                "User: {} owning completed reminder: {} was not found",
                reminder.user_id, reminder.id
            ),
        }
    }

    if usecase.notify_client {
        if let Some(client_id) = &reminder.client_id {
            match ctx.repos.clients.find(client_id).await {
                Some(client) => {
                    if let Err(e) = ctx
                        .notifier
                        .notify_client_of_completion(&client, reminder, message)
                        .await
                    {
                        error!(
                            "Unable to send completion notice to client: {} for reminder: {}. Error: {:?}",
                            client.id, reminder.id, e
                        );
                    }
                }
                None => error!(
                    "Client: {} linked to completed reminder: {} was not found",
                    client_id, reminder.id
                ),
            }
        }
    }
}

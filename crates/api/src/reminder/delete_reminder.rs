use crate::error::BizdeskError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::delete_reminder::*;
use bizdesk_domain::{Reminder, ID};
use bizdesk_infra::BizdeskContext;

pub async fn delete_reminder_controller(
    http_req: web::HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        user_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder)))
        .map_err(BizdeskError::from)
}

#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub reminder_id: ID,
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    Storage,
}

impl From<UseCaseError> for BizdeskError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
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
impl UseCase for DeleteReminderUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        let reminder = ctx.repos.reminders.find(&self.reminder_id).await;
        match reminder {
            Some(reminder) if reminder.user_id == self.user_id => {
                ctx.repos
                    .reminders
                    .delete(&reminder.id)
                    .await
                    .map(|reminder| UseCaseRes { reminder })
                    .ok_or(UseCaseError::Storage)
            }
            _ => Err(UseCaseError::NotFound(self.reminder_id.clone())),
        }
    }
}

use crate::error::BizdeskError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::update_client::*;
use bizdesk_domain::{Client, Email, ID};
use bizdesk_infra::BizdeskContext;

pub async fn update_client_controller(
    http_req: web::HttpRequest,
    path_params: web::Path<PathParams>,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body_params.0;
    let usecase = UpdateClientUseCase {
        client_id: path_params.client_id.clone(),
        user_id: user.id,
        name: body.name,
        email: body.email,
        phone: body.phone,
        category: body.category,
        notes: body.notes,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.client)))
        .map_err(BizdeskError::from)
}

#[derive(Debug)]
pub struct UpdateClientUseCase {
    pub client_id: ID,
    pub user_id: ID,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidEmail(String),
    Storage,
}

impl From<UseCaseError> for BizdeskError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(client_id) => {
                Self::NotFound(format!("The client with id: {}, was not found.", client_id))
            }
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("Invalid email address: {}.", email))
            }
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub client: Client,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateClientUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateClient";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        let client = ctx.repos.clients.find(&self.client_id).await;
        let mut client = match client {
            Some(client) if client.user_id == self.user_id => client,
            _ => return Err(UseCaseError::NotFound(self.client_id.clone())),
        };

        if let Some(email) = &self.email {
            client.email = Email::new(email.clone())
                .map_err(|_| UseCaseError::InvalidEmail(email.clone()))?;
        }
        if let Some(name) = &self.name {
            client.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            client.phone = Some(phone.clone());
        }
        if let Some(category) = &self.category {
            client.category = Some(category.clone());
        }
        if let Some(notes) = &self.notes {
            client.notes = Some(notes.clone());
        }

        let res = ctx.repos.clients.save(&client).await;
        match res {
            Ok(_) => Ok(UseCaseRes { client }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}

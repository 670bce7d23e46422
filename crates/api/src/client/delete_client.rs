use crate::error::BizdeskError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::delete_client::*;
use bizdesk_domain::{Client, ID};
use bizdesk_infra::BizdeskContext;

pub async fn delete_client_controller(
    http_req: web::HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteClientUseCase {
        client_id: path_params.client_id.clone(),
        user_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.client)))
        .map_err(BizdeskError::from)
}

#[derive(Debug)]
pub struct DeleteClientUseCase {
    pub client_id: ID,
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
            UseCaseError::NotFound(client_id) => {
                Self::NotFound(format!("The client with id: {}, was not found.", client_id))
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
impl UseCase for DeleteClientUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteClient";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        let client = ctx.repos.clients.find(&self.client_id).await;
        match client {
            Some(client) if client.user_id == self.user_id => {
                ctx.repos
                    .clients
                    .delete(&client.id)
                    .await
                    .map(|client| UseCaseRes { client })
                    .ok_or(UseCaseError::Storage)
            }
            _ => Err(UseCaseError::NotFound(self.client_id.clone())),
        }
    }
}

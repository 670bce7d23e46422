use crate::error::BizdeskError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::create_client::*;
use bizdesk_domain::{Client, Email, ID};
use bizdesk_infra::BizdeskContext;

pub async fn create_client_controller(
    http_req: web::HttpRequest,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body_params.0;
    let usecase = CreateClientUseCase {
        user_id: user.id,
        name: body.name,
        email: body.email,
        phone: body.phone,
        category: body.category,
        notes: body.notes,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.client)))
        .map_err(BizdeskError::from)
}

#[derive(Debug)]
pub struct CreateClientUseCase {
    pub user_id: ID,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidEmail(String),
    EmptyName,
    Storage,
}

impl From<UseCaseError> for BizdeskError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("Invalid email address: {}.", email))
            }
            UseCaseError::EmptyName => {
                Self::BadClientData("A client must have a name.".to_string())
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
impl UseCase for CreateClientUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateClient";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        if self.name.trim().is_empty() {
            return Err(UseCaseError::EmptyName);
        }
        let email = Email::new(self.email.clone())
            .map_err(|_| UseCaseError::InvalidEmail(self.email.clone()))?;

        let mut client = Client::new(self.user_id.clone(), self.name.clone(), email);
        client.phone = self.phone.clone();
        client.category = self.category.clone();
        client.notes = self.notes.clone();

        let res = ctx.repos.clients.insert(&client).await;
        match res {
            Ok(_) => Ok(UseCaseRes { client }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdesk_infra::setup_context_inmemory;

    #[actix_web::main]
    #[test]
    async fn creates_client_with_valid_email() {
        let ctx = setup_context_inmemory();

        let usecase = CreateClientUseCase {
            user_id: Default::default(),
            name: "Kari Hansen".into(),
            email: "kari@salon.no".into(),
            phone: Some("+47 900 00 000".into()),
            category: Some("color".into()),
            notes: None,
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.client.email.to_string(), "kari@salon.no");
    }

    #[actix_web::main]
    #[test]
    async fn rejects_client_with_invalid_email() {
        let ctx = setup_context_inmemory();

        let usecase = CreateClientUseCase {
            user_id: Default::default(),
            name: "Kari Hansen".into(),
            email: "not-an-email".into(),
            phone: None,
            category: None,
            notes: None,
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::InvalidEmail(_))));
    }
}

use crate::error::BizdeskError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::create_user::*;
use bizdesk_domain::{Email, User};
use bizdesk_infra::BizdeskContext;

pub async fn create_user_controller(
    body_params: web::Json<RequestBody>,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let body = body_params.0;
    if body.code != ctx.config.create_user_secret_code {
        return Err(BizdeskError::Unauthorized(
            "Invalid code provided".to_string(),
        ));
    }

    let usecase = CreateUserUseCase {
        name: body.name,
        email: body.email,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.user)))
        .map_err(BizdeskError::from)
}

#[derive(Debug)]
pub struct CreateUserUseCase {
    pub name: String,
    pub email: String,
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
            UseCaseError::EmptyName => Self::BadClientData("A user must have a name.".to_string()),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user: User,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        if self.name.trim().is_empty() {
            return Err(UseCaseError::EmptyName);
        }
        let email = Email::new(self.email.clone())
            .map_err(|_| UseCaseError::InvalidEmail(self.email.clone()))?;

        let user = User::new(self.name.clone(), email);

        let res = ctx.repos.users.insert(&user).await;
        match res {
            Ok(_) => Ok(UseCaseRes { user }),
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
    async fn created_user_can_be_found_by_api_key() {
        let ctx = setup_context_inmemory();

        let usecase = CreateUserUseCase {
            name: "Eva".into(),
            email: "eva@studio-sax.no".into(),
        };
        let res = execute(usecase, &ctx).await.unwrap();

        let found = ctx
            .repos
            .users
            .find_by_apikey(&res.user.secret_api_key)
            .await
            .unwrap();
        assert_eq!(found.id, res.user.id);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_email() {
        let ctx = setup_context_inmemory();

        let usecase = CreateUserUseCase {
            name: "Eva".into(),
            email: "eva-at-studio-sax".into(),
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::InvalidEmail(_))));
    }
}

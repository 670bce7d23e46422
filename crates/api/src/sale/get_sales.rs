use crate::error::BizdeskError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::get_sales::*;
use bizdesk_domain::{Sale, ID};
use bizdesk_infra::BizdeskContext;

pub async fn get_sales_controller(
    http_req: web::HttpRequest,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetSalesUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.sales)))
        .map_err(BizdeskError::from)
}

#[derive(Debug)]
pub struct GetSalesUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for BizdeskError {
    fn from(_: UseCaseError) -> Self {
        Self::InternalError
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub sales: Vec<Sale>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSalesUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSales";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        let sales = ctx.repos.sales.find_by_user(&self.user_id).await;
        Ok(UseCaseRes { sales })
    }
}

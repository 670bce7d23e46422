use crate::error::BizdeskError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::get_sale::*;
use bizdesk_domain::{Sale, ID};
use bizdesk_infra::BizdeskContext;

pub async fn get_sale_controller(
    http_req: web::HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetSaleUseCase {
        sale_id: path_params.sale_id.clone(),
        user_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.sale)))
        .map_err(BizdeskError::from)
}

#[derive(Debug)]
pub struct GetSaleUseCase {
    pub sale_id: ID,
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for BizdeskError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(sale_id) => {
                Self::NotFound(format!("The sale with id: {}, was not found.", sale_id))
            }
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub sale: Sale,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSaleUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSale";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        let sale = ctx.repos.sales.find(&self.sale_id).await;
        match sale {
            Some(sale) if sale.user_id == self.user_id => Ok(UseCaseRes { sale }),
            _ => Err(UseCaseError::NotFound(self.sale_id.clone())),
        }
    }
}

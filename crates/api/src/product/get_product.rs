use crate::error::BizdeskError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::get_product::*;
use bizdesk_domain::{Product, ID};
use bizdesk_infra::BizdeskContext;

pub async fn get_product_controller(
    http_req: web::HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetProductUseCase {
        product_id: path_params.product_id.clone(),
        user_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.product)))
        .map_err(BizdeskError::from)
}

#[derive(Debug)]
pub struct GetProductUseCase {
    pub product_id: ID,
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for BizdeskError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(product_id) => Self::NotFound(format!(
                "The product with id: {}, was not found.",
                product_id
            )),
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub product: Product,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetProductUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetProduct";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        let product = ctx.repos.products.find(&self.product_id).await;
        match product {
            Some(product) if product.user_id == self.user_id => Ok(UseCaseRes { product }),
            _ => Err(UseCaseError::NotFound(self.product_id.clone())),
        }
    }
}

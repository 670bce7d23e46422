use crate::error::BizdeskError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::create_product::*;
use bizdesk_domain::{Product, ID};
use bizdesk_infra::BizdeskContext;

pub async fn create_product_controller(
    http_req: web::HttpRequest,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body_params.0;
    let usecase = CreateProductUseCase {
        user_id: user.id,
        name: body.name,
        category: body.category,
        unit_price_cents: body.unit_price_cents,
        stock_quantity: body.stock_quantity.unwrap_or(0),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.product)))
        .map_err(BizdeskError::from)
}

#[derive(Debug)]
pub struct CreateProductUseCase {
    pub user_id: ID,
    pub name: String,
    pub category: Option<String>,
    pub unit_price_cents: i64,
    pub stock_quantity: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    EmptyName,
    NegativePrice(i64),
    NegativeStock(i64),
    Storage,
}

impl From<UseCaseError> for BizdeskError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyName => {
                Self::BadClientData("A product must have a name.".to_string())
            }
            UseCaseError::NegativePrice(price) => {
                Self::BadClientData(format!("Unit price must not be negative, got: {}.", price))
            }
            UseCaseError::NegativeStock(stock) => Self::BadClientData(format!(
                "Stock quantity must not be negative, got: {}.",
                stock
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub product: Product,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateProductUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateProduct";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        if self.name.trim().is_empty() {
            return Err(UseCaseError::EmptyName);
        }
        if self.unit_price_cents < 0 {
            return Err(UseCaseError::NegativePrice(self.unit_price_cents));
        }
        if self.stock_quantity < 0 {
            return Err(UseCaseError::NegativeStock(self.stock_quantity));
        }

        let mut product = Product::new(
            self.user_id.clone(),
            self.name.clone(),
            self.unit_price_cents,
        );
        product.category = self.category.clone();
        product.stock_quantity = self.stock_quantity;

        let res = ctx.repos.products.insert(&product).await;
        match res {
            Ok(_) => Ok(UseCaseRes { product }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}

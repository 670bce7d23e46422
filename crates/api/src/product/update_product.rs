use crate::error::BizdeskError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::update_product::*;
use bizdesk_domain::{Product, ID};
use bizdesk_infra::BizdeskContext;

pub async fn update_product_controller(
    http_req: web::HttpRequest,
    path_params: web::Path<PathParams>,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body_params.0;
    let usecase = UpdateProductUseCase {
        product_id: path_params.product_id.clone(),
        user_id: user.id,
        name: body.name,
        category: body.category,
        unit_price_cents: body.unit_price_cents,
        stock_quantity: body.stock_quantity,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.product)))
        .map_err(BizdeskError::from)
}

#[derive(Debug)]
pub struct UpdateProductUseCase {
    pub product_id: ID,
    pub user_id: ID,
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit_price_cents: Option<i64>,
    pub stock_quantity: Option<i64>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    NegativePrice(i64),
    NegativeStock(i64),
    Storage,
}

impl From<UseCaseError> for BizdeskError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(product_id) => Self::NotFound(format!(
                "The product with id: {}, was not found.",
                product_id
            )),
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
impl UseCase for UpdateProductUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateProduct";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        let product = ctx.repos.products.find(&self.product_id).await;
        let mut product = match product {
            Some(product) if product.user_id == self.user_id => product,
            _ => return Err(UseCaseError::NotFound(self.product_id.clone())),
        };

        if let Some(price) = self.unit_price_cents {
            if price < 0 {
                return Err(UseCaseError::NegativePrice(price));
            }
            product.unit_price_cents = price;
        }
        if let Some(stock) = self.stock_quantity {
            if stock < 0 {
                return Err(UseCaseError::NegativeStock(stock));
            }
            product.stock_quantity = stock;
        }
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(category) = &self.category {
            product.category = Some(category.clone());
        }

        let res = ctx.repos.products.save(&product).await;
        match res {
            Ok(_) => Ok(UseCaseRes { product }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}

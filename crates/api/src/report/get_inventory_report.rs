use crate::error::BizdeskError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::get_inventory_report::*;
use bizdesk_domain::{Product, ID};
use bizdesk_infra::BizdeskContext;

pub async fn get_inventory_report_controller(
    http_req: web::HttpRequest,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetInventoryReportUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::new(
                res.product_count,
                res.stock_value_cents,
                res.low_stock,
            ))
        })
        .map_err(BizdeskError::from)
}

/// Read-only projection over the product inventory: total stock value and
/// the products at or below the low-stock threshold
#[derive(Debug)]
pub struct GetInventoryReportUseCase {
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
    pub product_count: usize,
    pub stock_value_cents: i64,
    pub low_stock: Vec<Product>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetInventoryReportUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetInventoryReport";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        let products = ctx.repos.products.find_by_user(&self.user_id).await;

        let product_count = products.len();
        let stock_value_cents = products
            .iter()
            .map(|p| p.unit_price_cents * p.stock_quantity)
            .sum();
        let low_stock = products
            .into_iter()
            .filter(|p| p.stock_quantity <= ctx.config.low_stock_threshold)
            .collect();

        Ok(UseCaseRes {
            product_count,
            stock_value_cents,
            low_stock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdesk_infra::setup_context_inmemory;

    #[actix_web::main]
    #[test]
    async fn reports_stock_value_and_low_stock_products() {
        let ctx = setup_context_inmemory();
        let user_id = ID::default();

        let mut shampoo = Product::new(user_id.clone(), "Shampoo 250ml".into(), 18_900);
        shampoo.stock_quantity = 12;
        ctx.repos.products.insert(&shampoo).await.unwrap();

        let mut oil = Product::new(user_id.clone(), "Argan oil 100ml".into(), 24_900);
        oil.stock_quantity = 2;
        ctx.repos.products.insert(&oil).await.unwrap();

        let usecase = GetInventoryReportUseCase {
            user_id: user_id.clone(),
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.product_count, 2);
        assert_eq!(res.stock_value_cents, 12 * 18_900 + 2 * 24_900);
        assert_eq!(res.low_stock.len(), 1);
        assert_eq!(res.low_stock[0].name, "Argan oil 100ml");
    }
}

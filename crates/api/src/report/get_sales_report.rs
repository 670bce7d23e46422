use crate::error::BizdeskError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::get_sales_report::*;
use bizdesk_domain::{SaleItemKind, ID};
use bizdesk_infra::BizdeskContext;

pub async fn get_sales_report_controller(
    http_req: web::HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetSalesReportUseCase {
        user_id: user.id,
        from: query_params.from,
        to: query_params.to,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                sale_count: res.sale_count,
                total_cents: res.total_cents,
                product_total_cents: res.product_total_cents,
                service_total_cents: res.service_total_cents,
            })
        })
        .map_err(BizdeskError::from)
}

/// Read-only projection over recorded sales in a period, split by line kind
#[derive(Debug)]
pub struct GetSalesReportUseCase {
    pub user_id: ID,
    pub from: Option<i64>,
    pub to: Option<i64>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidPeriod(i64, i64),
}

impl From<UseCaseError> for BizdeskError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidPeriod(from, to) => Self::BadClientData(format!(
                "The report period is invalid: from: {} must be before to: {}.",
                from, to
            )),
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub sale_count: usize,
    pub total_cents: i64,
    pub product_total_cents: i64,
    pub service_total_cents: i64,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSalesReportUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSalesReport";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        let from = self.from.unwrap_or(0);
        let to = self.to.unwrap_or_else(|| ctx.sys.get_timestamp_millis() + 1);
        if from >= to {
            return Err(UseCaseError::InvalidPeriod(from, to));
        }

        let sales = ctx
            .repos
            .sales
            .find_by_user_in_period(&self.user_id, from, to)
            .await;

        let mut res = UseCaseRes {
            sale_count: sales.len(),
            total_cents: 0,
            product_total_cents: 0,
            service_total_cents: 0,
        };
        for sale in &sales {
            res.total_cents += sale.total_cents;
            for item in &sale.items {
                match item.kind {
                    SaleItemKind::Product => res.product_total_cents += item.line_total_cents(),
                    SaleItemKind::Service => res.service_total_cents += item.line_total_cents(),
                }
            }
        }

        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdesk_domain::{Sale, SaleItem};
    use bizdesk_infra::setup_context_inmemory;

    fn sale_factory(user_id: &ID, created: i64) -> Sale {
        let items = vec![
            SaleItem {
                name: "Haircut".into(),
                kind: SaleItemKind::Service,
                product_id: None,
                quantity: 1,
                unit_price_cents: 65_000,
            },
            SaleItem {
                name: "Argan oil 100ml".into(),
                kind: SaleItemKind::Product,
                product_id: Some(Default::default()),
                quantity: 1,
                unit_price_cents: 24_900,
            },
        ];
        Sale::new(user_id.clone(), None, items, created)
    }

    #[actix_web::main]
    #[test]
    async fn sums_sales_by_line_kind_within_period() {
        let ctx = setup_context_inmemory();
        let user_id = ID::default();

        ctx.repos
            .sales
            .insert(&sale_factory(&user_id, 1_000))
            .await
            .unwrap();
        ctx.repos
            .sales
            .insert(&sale_factory(&user_id, 2_000))
            .await
            .unwrap();
        // Outside the queried period
        ctx.repos
            .sales
            .insert(&sale_factory(&user_id, 10_000))
            .await
            .unwrap();

        let usecase = GetSalesReportUseCase {
            user_id: user_id.clone(),
            from: Some(0),
            to: Some(5_000),
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.sale_count, 2);
        assert_eq!(res.service_total_cents, 2 * 65_000);
        assert_eq!(res.product_total_cents, 2 * 24_900);
        assert_eq!(res.total_cents, 2 * (65_000 + 24_900));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_inverted_period() {
        let ctx = setup_context_inmemory();

        let usecase = GetSalesReportUseCase {
            user_id: Default::default(),
            from: Some(5_000),
            to: Some(1_000),
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::InvalidPeriod(_, _))));
    }
}

use crate::error::BizdeskError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use bizdesk_api_structs::create_sale::*;
use bizdesk_domain::{Product, Sale, SaleItem, SaleItemKind, ID};
use bizdesk_infra::BizdeskContext;

pub async fn create_sale_controller(
    http_req: web::HttpRequest,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<BizdeskContext>,
) -> Result<HttpResponse, BizdeskError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body_params.0;
    let usecase = CreateSaleUseCase {
        user_id: user.id,
        client_id: body.client_id,
        items: body.items,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.sale)))
        .map_err(BizdeskError::from)
}

/// Records a point-of-sale transaction. Product lines reference a stocked
/// `Product` of the same user and decrement its stock; service lines are
/// free-form and only need a price.
#[derive(Debug)]
pub struct CreateSaleUseCase {
    pub user_id: ID,
    pub client_id: Option<ID>,
    pub items: Vec<SaleItemInput>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NoItems,
    InvalidQuantity(i64),
    ClientNotFound(ID),
    ProductNotFound(ID),
    ProductLineWithoutProduct(String),
    ServiceLineWithoutPrice(String),
    InsufficientStock(String),
    Storage,
}

impl From<UseCaseError> for BizdeskError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NoItems => {
                Self::BadClientData("A sale must contain at least one item.".to_string())
            }
            UseCaseError::InvalidQuantity(quantity) => Self::BadClientData(format!(
                "Item quantities must be positive, got: {}.",
                quantity
            )),
            UseCaseError::ClientNotFound(client_id) => {
                Self::NotFound(format!("The client with id: {}, was not found.", client_id))
            }
            UseCaseError::ProductNotFound(product_id) => Self::NotFound(format!(
                "The product with id: {}, was not found.",
                product_id
            )),
            UseCaseError::ProductLineWithoutProduct(name) => Self::BadClientData(format!(
                "The product line: {}, does not reference a product.",
                name
            )),
            UseCaseError::ServiceLineWithoutPrice(name) => Self::BadClientData(format!(
                "The service line: {}, does not have a price.",
                name
            )),
            UseCaseError::InsufficientStock(name) => Self::Conflict(format!(
                "Not enough stock to sell the product: {}.",
                name
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub sale: Sale,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateSaleUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateSale";

    async fn execute(&mut self, ctx: &BizdeskContext) -> Result<Self::Response, Self::Error> {
        if self.items.is_empty() {
            return Err(UseCaseError::NoItems);
        }
        if let Some(client_id) = &self.client_id {
            let client = ctx.repos.clients.find(client_id).await;
            match client {
                Some(client) if client.user_id == self.user_id => (),
                _ => return Err(UseCaseError::ClientNotFound(client_id.clone())),
            }
        }

        let mut items: Vec<SaleItem> = Vec::with_capacity(self.items.len());
        let mut touched_products: Vec<Product> = Vec::new();

        for item in &self.items {
            if item.quantity <= 0 {
                return Err(UseCaseError::InvalidQuantity(item.quantity));
            }
            match item.kind {
                SaleItemKind::Product => {
                    let product_id = item
                        .product_id
                        .as_ref()
                        .ok_or_else(|| UseCaseError::ProductLineWithoutProduct(item.name.clone()))?;
                    let product = ctx.repos.products.find(product_id).await;
                    let mut product = match product {
                        Some(product) if product.user_id == self.user_id => product,
                        _ => return Err(UseCaseError::ProductNotFound(product_id.clone())),
                    };
                    // A product may appear on several lines of one sale
                    if let Some(touched) = touched_products
                        .iter_mut()
                        .find(|p| p.id == product.id)
                    {
                        if !touched.take_stock(item.quantity) {
                            return Err(UseCaseError::InsufficientStock(product.name));
                        }
                    } else {
                        if !product.take_stock(item.quantity) {
                            return Err(UseCaseError::InsufficientStock(product.name));
                        }
                        touched_products.push(product.clone());
                    }
                    items.push(SaleItem {
                        name: item.name.clone(),
                        kind: SaleItemKind::Product,
                        product_id: Some(product.id.clone()),
                        quantity: item.quantity,
                        unit_price_cents: item.unit_price_cents.unwrap_or(product.unit_price_cents),
                    });
                }
                SaleItemKind::Service => {
                    let unit_price_cents = item
                        .unit_price_cents
                        .ok_or_else(|| UseCaseError::ServiceLineWithoutPrice(item.name.clone()))?;
                    items.push(SaleItem {
                        name: item.name.clone(),
                        kind: SaleItemKind::Service,
                        product_id: None,
                        quantity: item.quantity,
                        unit_price_cents,
                    });
                }
            }
        }

        let now = ctx.sys.get_timestamp_millis();
        let sale = Sale::new(self.user_id.clone(), self.client_id.clone(), items, now);

        for product in &touched_products {
            if ctx.repos.products.save(product).await.is_err() {
                return Err(UseCaseError::Storage);
            }
        }
        let res = ctx.repos.sales.insert(&sale).await;
        match res {
            Ok(_) => Ok(UseCaseRes { sale }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdesk_infra::setup_context_inmemory;

    fn product_factory(user_id: &ID, stock: i64) -> Product {
        let mut product = Product::new(user_id.clone(), "Argan oil 100ml".into(), 24_900);
        product.stock_quantity = stock;
        product
    }

    fn product_line(product: &Product, quantity: i64) -> SaleItemInput {
        SaleItemInput {
            name: product.name.clone(),
            kind: SaleItemKind::Product,
            product_id: Some(product.id.clone()),
            quantity,
            unit_price_cents: None,
        }
    }

    fn service_line(name: &str, price: Option<i64>) -> SaleItemInput {
        SaleItemInput {
            name: name.into(),
            kind: SaleItemKind::Service,
            product_id: None,
            quantity: 1,
            unit_price_cents: price,
        }
    }

    #[actix_web::main]
    #[test]
    async fn records_sale_and_decrements_stock() {
        let ctx = setup_context_inmemory();
        let user_id = ID::default();

        let product = product_factory(&user_id, 5);
        ctx.repos.products.insert(&product).await.unwrap();

        let usecase = CreateSaleUseCase {
            user_id: user_id.clone(),
            client_id: None,
            items: vec![
                product_line(&product, 2),
                service_line("Haircut", Some(65_000)),
            ],
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.sale.total_cents, 2 * 24_900 + 65_000);

        let stored = ctx.repos.products.find(&product.id).await.unwrap();
        assert_eq!(stored.stock_quantity, 3);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_sale_exceeding_stock() {
        let ctx = setup_context_inmemory();
        let user_id = ID::default();

        let product = product_factory(&user_id, 1);
        ctx.repos.products.insert(&product).await.unwrap();

        let usecase = CreateSaleUseCase {
            user_id: user_id.clone(),
            client_id: None,
            items: vec![product_line(&product, 2)],
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::InsufficientStock(_))));

        // Stock is untouched by the rejected sale
        let stored = ctx.repos.products.find(&product.id).await.unwrap();
        assert_eq!(stored.stock_quantity, 1);
        assert!(ctx.repos.sales.find_by_user(&user_id).await.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn tracks_stock_across_repeated_lines_of_one_product() {
        let ctx = setup_context_inmemory();
        let user_id = ID::default();

        let product = product_factory(&user_id, 3);
        ctx.repos.products.insert(&product).await.unwrap();

        let usecase = CreateSaleUseCase {
            user_id: user_id.clone(),
            client_id: None,
            items: vec![product_line(&product, 2), product_line(&product, 2)],
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::InsufficientStock(_))));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_service_line_without_price() {
        let ctx = setup_context_inmemory();

        let usecase = CreateSaleUseCase {
            user_id: Default::default(),
            client_id: None,
            items: vec![service_line("Haircut", None)],
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::ServiceLineWithoutPrice(_))));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_sale_of_foreign_product() {
        let ctx = setup_context_inmemory();

        let foreign_product = product_factory(&ID::default(), 5);
        ctx.repos.products.insert(&foreign_product).await.unwrap();

        let usecase = CreateSaleUseCase {
            user_id: ID::default(),
            client_id: None,
            items: vec![product_line(&foreign_product, 1)],
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::ProductNotFound(_))));
    }
}

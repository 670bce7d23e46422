use bizdesk_domain::{Product, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductDTO {
    pub id: ID,
    pub user_id: ID,
    pub name: String,
    pub category: Option<String>,
    pub unit_price_cents: i64,
    pub stock_quantity: i64,
}

impl ProductDTO {
    pub fn new(product: Product) -> Self {
        Self {
            id: product.id,
            user_id: product.user_id,
            name: product.name,
            category: product.category,
            unit_price_cents: product.unit_price_cents,
            stock_quantity: product.stock_quantity,
        }
    }
}

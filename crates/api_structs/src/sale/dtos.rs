use bizdesk_domain::{Sale, SaleItem, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SaleDTO {
    pub id: ID,
    pub user_id: ID,
    pub client_id: Option<ID>,
    pub items: Vec<SaleItem>,
    pub total_cents: i64,
    pub created: i64,
}

impl SaleDTO {
    pub fn new(sale: Sale) -> Self {
        Self {
            id: sale.id,
            user_id: sale.user_id,
            client_id: sale.client_id,
            items: sale.items,
            total_cents: sale.total_cents,
            created: sale.created,
        }
    }
}

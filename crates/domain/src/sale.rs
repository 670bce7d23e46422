use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// A `Sale` records one point-of-sale transaction for a `User`, optionally
/// attributed to a `Client`. Lines cover both stocked products and
/// salon-style services; only product lines touch inventory.
#[derive(Debug, Clone)]
pub struct Sale {
    pub id: ID,
    pub user_id: ID,
    pub client_id: Option<ID>,
    pub items: Vec<SaleItem>,
    pub total_cents: i64,
    pub created: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleItemKind {
    Product,
    Service,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub name: String,
    pub kind: SaleItemKind,
    /// Set for product lines, referencing a `Product` owned by the same user
    pub product_id: Option<ID>,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl SaleItem {
    pub fn line_total_cents(&self) -> i64 {
        self.quantity * self.unit_price_cents
    }
}

impl Sale {
    pub fn new(user_id: ID, client_id: Option<ID>, items: Vec<SaleItem>, created: i64) -> Self {
        let total_cents = items.iter().map(SaleItem::line_total_cents).sum();
        Self {
            id: Default::default(),
            user_id,
            client_id,
            items,
            total_cents,
            created,
        }
    }
}

impl Entity for Sale {
    fn id(&self) -> &ID {
        &self.id
    }
}

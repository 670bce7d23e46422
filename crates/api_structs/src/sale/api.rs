use crate::dtos::SaleDTO;
use bizdesk_domain::{Sale, SaleItemKind, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub sale: SaleDTO,
}

impl SaleResponse {
    pub fn new(sale: Sale) -> Self {
        Self {
            sale: SaleDTO::new(sale),
        }
    }
}

pub mod create_sale {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SaleItemInput {
        pub name: String,
        pub kind: SaleItemKind,
        #[serde(default)]
        pub product_id: Option<ID>,
        pub quantity: i64,
        /// Required for service lines. Product lines default to the
        /// product's unit price when absent.
        #[serde(default)]
        pub unit_price_cents: Option<i64>,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub client_id: Option<ID>,
        pub items: Vec<SaleItemInput>,
    }

    pub type APIResponse = SaleResponse;
}

pub mod get_sale {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub sale_id: ID,
    }

    pub type APIResponse = SaleResponse;
}

pub mod get_sales {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub sales: Vec<SaleDTO>,
    }

    impl APIResponse {
        pub fn new(sales: Vec<Sale>) -> Self {
            Self {
                sales: sales.into_iter().map(SaleDTO::new).collect(),
            }
        }
    }
}

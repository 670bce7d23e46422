use crate::dtos::ProductDTO;
use bizdesk_domain::Product;
use serde::{Deserialize, Serialize};

pub mod get_sales_report {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub from: Option<i64>,
        #[serde(default)]
        pub to: Option<i64>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub sale_count: usize,
        pub total_cents: i64,
        pub product_total_cents: i64,
        pub service_total_cents: i64,
    }
}

pub mod get_inventory_report {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub product_count: usize,
        pub stock_value_cents: i64,
        pub low_stock: Vec<ProductDTO>,
    }

    impl APIResponse {
        pub fn new(product_count: usize, stock_value_cents: i64, low_stock: Vec<Product>) -> Self {
            Self {
                product_count,
                stock_value_cents,
                low_stock: low_stock.into_iter().map(ProductDTO::new).collect(),
            }
        }
    }
}

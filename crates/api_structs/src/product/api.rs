use crate::dtos::ProductDTO;
use bizdesk_domain::{Product, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub product: ProductDTO,
}

impl ProductResponse {
    pub fn new(product: Product) -> Self {
        Self {
            product: ProductDTO::new(product),
        }
    }
}

pub mod create_product {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        #[serde(default)]
        pub category: Option<String>,
        pub unit_price_cents: i64,
        #[serde(default)]
        pub stock_quantity: Option<i64>,
    }

    pub type APIResponse = ProductResponse;
}

pub mod get_product {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub product_id: ID,
    }

    pub type APIResponse = ProductResponse;
}

pub mod get_products {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub products: Vec<ProductDTO>,
    }

    impl APIResponse {
        pub fn new(products: Vec<Product>) -> Self {
            Self {
                products: products.into_iter().map(ProductDTO::new).collect(),
            }
        }
    }
}

pub mod update_product {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub product_id: ID,
    }

    #[derive(Deserialize, Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub category: Option<String>,
        #[serde(default)]
        pub unit_price_cents: Option<i64>,
        #[serde(default)]
        pub stock_quantity: Option<i64>,
    }

    pub type APIResponse = ProductResponse;
}

pub mod delete_product {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub product_id: ID,
    }

    pub type APIResponse = ProductResponse;
}

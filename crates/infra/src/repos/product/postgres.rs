use super::IProductRepo;
use bizdesk_domain::{Product, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresProductRepo {
    pool: PgPool,
}

impl PostgresProductRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductRaw {
    product_uid: Uuid,
    user_uid: Uuid,
    name: String,
    category: Option<String>,
    unit_price_cents: i64,
    stock_quantity: i64,
}

impl From<ProductRaw> for Product {
    fn from(e: ProductRaw) -> Self {
        Self {
            id: e.product_uid.into(),
            user_id: e.user_uid.into(),
            name: e.name,
            category: e.category,
            unit_price_cents: e.unit_price_cents,
            stock_quantity: e.stock_quantity,
        }
    }
}

#[async_trait::async_trait]
impl IProductRepo for PostgresProductRepo {
    async fn insert(&self, product: &Product) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products(product_uid, user_uid, name, category, unit_price_cents, stock_quantity)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(product.id.inner_ref())
        .bind(product.user_id.inner_ref())
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.unit_price_cents)
        .bind(product.stock_quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert product: {:?}. DB returned error: {:?}",
                product, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, product: &Product) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE products
            SET name = $2,
            category = $3,
            unit_price_cents = $4,
            stock_quantity = $5
            WHERE product_uid = $1
            "#,
        )
        .bind(product.id.inner_ref())
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.unit_price_cents)
        .bind(product.stock_quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save product: {:?}. DB returned error: {:?}",
                product, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, product_id: &ID) -> Option<Product> {
        let res: Option<ProductRaw> = sqlx::query_as(
            r#"
            SELECT * FROM products
            WHERE product_uid = $1
            "#,
        )
        .bind(product_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find product with id: {:?} failed. DB returned error: {:?}",
                product_id, e
            );
            e
        })
        .ok()?;
        res.map(|product| product.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Product> {
        let products_raw: Vec<ProductRaw> = sqlx::query_as(
            r#"
            SELECT * FROM products
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!(
                "Find products for user: {:?} failed. DB returned error: {:?}",
                user_id, e
            );
            Vec::new()
        });
        products_raw.into_iter().map(|product| product.into()).collect()
    }

    async fn delete(&self, product_id: &ID) -> Option<Product> {
        let res: Option<ProductRaw> = sqlx::query_as(
            r#"
            DELETE FROM products
            WHERE product_uid = $1
            RETURNING *
            "#,
        )
        .bind(product_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Delete product with id: {:?} failed. DB returned error: {:?}",
                product_id, e
            );
            e
        })
        .ok()?;
        res.map(|product| product.into())
    }
}

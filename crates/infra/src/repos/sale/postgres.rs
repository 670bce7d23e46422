use super::ISaleRepo;
use bizdesk_domain::{Sale, SaleItem, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresSaleRepo {
    pool: PgPool,
}

impl PostgresSaleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SaleRaw {
    sale_uid: Uuid,
    user_uid: Uuid,
    client_uid: Option<Uuid>,
    items: Json<Vec<SaleItem>>,
    total_cents: i64,
    created: i64,
}

impl From<SaleRaw> for Sale {
    fn from(e: SaleRaw) -> Self {
        Self {
            id: e.sale_uid.into(),
            user_id: e.user_uid.into(),
            client_id: e.client_uid.map(|uid| uid.into()),
            items: e.items.0,
            total_cents: e.total_cents,
            created: e.created,
        }
    }
}

#[async_trait::async_trait]
impl ISaleRepo for PostgresSaleRepo {
    async fn insert(&self, sale: &Sale) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sales(sale_uid, user_uid, client_uid, items, total_cents, created)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(sale.id.inner_ref())
        .bind(sale.user_id.inner_ref())
        .bind(sale.client_id.as_ref().map(|id| *id.inner_ref()))
        .bind(Json(&sale.items))
        .bind(sale.total_cents)
        .bind(sale.created)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert sale: {:?}. DB returned error: {:?}",
                sale, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, sale_id: &ID) -> Option<Sale> {
        let res: Option<SaleRaw> = sqlx::query_as(
            r#"
            SELECT * FROM sales
            WHERE sale_uid = $1
            "#,
        )
        .bind(sale_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find sale with id: {:?} failed. DB returned error: {:?}",
                sale_id, e
            );
            e
        })
        .ok()?;
        res.map(|sale| sale.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Sale> {
        let sales_raw: Vec<SaleRaw> = sqlx::query_as(
            r#"
            SELECT * FROM sales
            WHERE user_uid = $1
            ORDER BY created DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!(
                "Find sales for user: {:?} failed. DB returned error: {:?}",
                user_id, e
            );
            Vec::new()
        });
        sales_raw.into_iter().map(|sale| sale.into()).collect()
    }

    async fn find_by_user_in_period(&self, user_id: &ID, from: i64, to: i64) -> Vec<Sale> {
        let sales_raw: Vec<SaleRaw> = sqlx::query_as(
            r#"
            SELECT * FROM sales
            WHERE user_uid = $1 AND created >= $2 AND created < $3
            ORDER BY created DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!(
                "Find sales for user: {:?} in period failed. DB returned error: {:?}",
                user_id, e
            );
            Vec::new()
        });
        sales_raw.into_iter().map(|sale| sale.into()).collect()
    }
}

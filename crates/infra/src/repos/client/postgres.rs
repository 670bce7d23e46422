use super::IClientRepo;
use bizdesk_domain::{Client, Email, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresClientRepo {
    pool: PgPool,
}

impl PostgresClientRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ClientRaw {
    client_uid: Uuid,
    user_uid: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    category: Option<String>,
    notes: Option<String>,
}

impl From<ClientRaw> for Client {
    fn from(e: ClientRaw) -> Self {
        Self {
            id: e.client_uid.into(),
            user_id: e.user_uid.into(),
            name: e.name,
            email: Email::new(e.email).unwrap(),
            phone: e.phone,
            category: e.category,
            notes: e.notes,
        }
    }
}

#[async_trait::async_trait]
impl IClientRepo for PostgresClientRepo {
    async fn insert(&self, client: &Client) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO clients(client_uid, user_uid, name, email, phone, category, notes)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(client.id.inner_ref())
        .bind(client.user_id.inner_ref())
        .bind(&client.name)
        .bind(client.email.as_str())
        .bind(&client.phone)
        .bind(&client.category)
        .bind(&client.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert client: {:?}. DB returned error: {:?}",
                client, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, client: &Client) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE clients
            SET name = $2,
            email = $3,
            phone = $4,
            category = $5,
            notes = $6
            WHERE client_uid = $1
            "#,
        )
        .bind(client.id.inner_ref())
        .bind(&client.name)
        .bind(client.email.as_str())
        .bind(&client.phone)
        .bind(&client.category)
        .bind(&client.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save client: {:?}. DB returned error: {:?}",
                client, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, client_id: &ID) -> Option<Client> {
        let res: Option<ClientRaw> = sqlx::query_as(
            r#"
            SELECT * FROM clients
            WHERE client_uid = $1
            "#,
        )
        .bind(client_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find client with id: {:?} failed. DB returned error: {:?}",
                client_id, e
            );
            e
        })
        .ok()?;
        res.map(|client| client.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Client> {
        let clients_raw: Vec<ClientRaw> = sqlx::query_as(
            r#"
            SELECT * FROM clients
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!(
                "Find clients for user: {:?} failed. DB returned error: {:?}",
                user_id, e
            );
            Vec::new()
        });
        clients_raw.into_iter().map(|client| client.into()).collect()
    }

    async fn delete(&self, client_id: &ID) -> Option<Client> {
        let res: Option<ClientRaw> = sqlx::query_as(
            r#"
            DELETE FROM clients
            WHERE client_uid = $1
            RETURNING *
            "#,
        )
        .bind(client_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Delete client with id: {:?} failed. DB returned error: {:?}",
                client_id, e
            );
            e
        })
        .ok()?;
        res.map(|client| client.into())
    }
}

use super::IUserRepo;
use bizdesk_domain::{Email, User, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    name: String,
    email: String,
    secret_api_key: String,
}

impl From<UserRaw> for User {
    fn from(e: UserRaw) -> Self {
        Self {
            id: e.user_uid.into(),
            name: e.name,
            email: Email::new(e.email).unwrap(),
            secret_api_key: e.secret_api_key,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, name, email, secret_api_key)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.secret_api_key)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert user: {:?}. DB returned error: {:?}",
                user, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET name = $2,
            email = $3,
            secret_api_key = $4
            WHERE user_uid = $1
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.secret_api_key)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save user: {:?}. DB returned error: {:?}",
                user, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        let res: Option<UserRaw> = sqlx::query_as(
            r#"
            SELECT * FROM users
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find user with id: {:?} failed. DB returned error: {:?}",
                user_id, e
            );
            e
        })
        .ok()?;
        res.map(|user| user.into())
    }

    async fn find_by_apikey(&self, api_key: &str) -> Option<User> {
        let res: Option<UserRaw> = sqlx::query_as(
            r#"
            SELECT * FROM users
            WHERE secret_api_key = $1
            "#,
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find user with api_key: {:?} failed. DB returned error: {:?}",
                api_key, e
            );
            e
        })
        .ok()?;
        res.map(|user| user.into())
    }
}

use async_trait::async_trait;
use sqlx::PgPool;

use crate::session::errors::CredentialStoreError;
use crate::session::models::CredentialRecord;
use crate::session::models::EmailAddress;
use crate::session::models::UserId;
use crate::session::ports::CredentialRepository;

pub struct PostgresCredentialRepository {
    pool: PgPool,
}

impl PostgresCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    id: i64,
    email: String,
    password_hash: String,
    role: String,
    full_name: String,
}

impl From<CredentialRow> for CredentialRecord {
    fn from(row: CredentialRow) -> Self {
        Self {
            id: UserId(row.id),
            email: row.email,
            password_hash: row.password_hash,
            role: row.role,
            full_name: row.full_name,
        }
    }
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CredentialRecord>, CredentialStoreError> {
        // The pooled connection goes back to the pool when `conn` drops,
        // whichever way this function returns.
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| CredentialStoreError::Unavailable(e.to_string()))?;

        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, email, password_hash, role, full_name
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| CredentialStoreError::Query(e.to_string()))?;

        Ok(row.map(CredentialRecord::from))
    }
}

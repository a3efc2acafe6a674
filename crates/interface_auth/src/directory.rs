//! PostgreSQL user directory

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{DomainPort, PortError, UserId};
use infra_db::DatabaseError;

use crate::identity::{UserDirectory, UserRecord};

#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    full_name: String,
    is_active: bool,
}

/// User directory backed by the `users` table
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a directory over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PostgresUserDirectory {}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_user(&self, email: &str) -> Result<Option<UserRecord>, PortError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, full_name, is_active FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::from(DatabaseError::SqlError(e)))?;

        Ok(row.map(|r| UserRecord {
            id: UserId::from(r.id),
            email: r.email,
            full_name: r.full_name,
            is_active: r.is_active,
        }))
    }
}

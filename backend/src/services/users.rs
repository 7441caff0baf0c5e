//! Tenant bookkeeping for the identity webhook
//!
//! Tenants are created on their first sign-in event and never mutated or
//! deleted here; the identity provider owns the rest of their lifecycle.

use sqlx::PgPool;

use crate::error::AppResult;

/// User service
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Idempotently record a tenant. Repeated sign-in events for the same
    /// id are no-ops.
    pub async fn ensure_user(&self, user_id: &str, name: Option<&str>) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(name)
        .execute(&self.db)
        .await?;

        tracing::debug!(user_id, "user ensured");
        Ok(())
    }
}

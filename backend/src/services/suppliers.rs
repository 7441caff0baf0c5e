//! Supplier service
//!
//! Suppliers follow the same ownership model as items: owned by a tenant or
//! global (owner NULL). Names are not unique.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{CreateSupplierInput, Owner};

/// Supplier service
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// A supplier row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Supplier {
    pub id: Uuid,
    /// NULL for global suppliers
    pub user_id: Option<String>,
    pub name: String,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SupplierService {
    /// Create a new SupplierService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List the suppliers visible to a tenant (own plus global), ordered by
    /// name for dropdown display.
    pub async fn list_suppliers(&self, tenant_id: &str) -> AppResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, user_id, name, city, phone, email, address, notes, created_at
            FROM suppliers
            WHERE user_id = $1 OR user_id IS NULL
            ORDER BY name ASC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.db)
        .await?;

        Ok(suppliers)
    }

    /// Register a supplier for the tenant (or globally).
    pub async fn create_supplier(
        &self,
        tenant_id: &str,
        input: CreateSupplierInput,
    ) -> AppResult<Supplier> {
        input
            .validate()
            .map_err(|err| AppError::ValidationError(err.to_string()))?;

        let owner = if input.is_global {
            Owner::Global
        } else {
            Owner::Tenant(tenant_id.to_string())
        };

        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (user_id, name, city, phone, email, address, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, name, city, phone, email, address, notes, created_at
            "#,
        )
        .bind(owner.into_column())
        .bind(&input.name)
        .bind(&input.city)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.address)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(supplier_id = %supplier.id, "supplier created");
        Ok(supplier)
    }
}

//! Catalog service: items, ownership, and the stock aggregator
//!
//! Current stock is never stored. It is always the signed sum of the
//! tenant's rows in `stock_movements`, so the listing query joins the
//! catalog against a per-tenant aggregate and absent rows read as zero.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{AdjustStockInput, CreateItemInput, MovementReason, Owner};
use shared::validation;

/// Catalog service for item definitions and per-tenant stock levels
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

/// A catalog item row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Item {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub cost_price: Decimal,
    pub sale_price: Decimal,
    /// NULL for global items
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A catalog item joined with the requesting tenant's current stock
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ItemWithStock {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub cost_price: Decimal,
    pub sale_price: Decimal,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub current_stock: i64,
}

/// One stock ledger entry
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StockMovement {
    pub id: Uuid,
    pub user_id: String,
    pub item_id: Uuid,
    pub change_qty: i32,
    pub reason: String,
    pub movement_at: DateTime<Utc>,
    pub transaction_item_id: Option<Uuid>,
}

/// Current stock for a single item
#[derive(Debug, Clone, Serialize)]
pub struct ItemBalance {
    pub item_id: Uuid,
    pub current_stock: i64,
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List the catalog visible to a tenant: own items plus global items,
    /// newest first, each with the tenant's aggregated stock. Guests see
    /// global items only, with zero stock.
    pub async fn list_catalog(&self, tenant_id: Option<&str>) -> AppResult<Vec<ItemWithStock>> {
        let items = match tenant_id {
            Some(tenant_id) => {
                sqlx::query_as::<_, ItemWithStock>(
                    r#"
                    WITH tenant_stock AS (
                        SELECT item_id, COALESCE(SUM(change_qty), 0)::BIGINT AS stock
                        FROM stock_movements
                        WHERE user_id = $1
                        GROUP BY item_id
                    )
                    SELECT i.id, i.sku, i.name, i.cost_price, i.sale_price,
                           i.user_id, i.created_at,
                           COALESCE(ts.stock, 0) AS current_stock
                    FROM items i
                    LEFT JOIN tenant_stock ts ON ts.item_id = i.id
                    WHERE i.user_id = $1 OR i.user_id IS NULL
                    ORDER BY i.created_at DESC
                    "#,
                )
                .bind(tenant_id)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, ItemWithStock>(
                    r#"
                    SELECT i.id, i.sku, i.name, i.cost_price, i.sale_price,
                           i.user_id, i.created_at,
                           0::BIGINT AS current_stock
                    FROM items i
                    WHERE i.user_id IS NULL
                    ORDER BY i.created_at DESC
                    "#,
                )
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(items)
    }

    /// Add an item to the catalog, optionally seeding the creating tenant's
    /// ledger with an opening `initial_stock` movement. Item and movement
    /// are written in one database transaction.
    pub async fn create_item(&self, tenant_id: &str, input: CreateItemInput) -> AppResult<Item> {
        validation::validate_sku(&input.sku).map_err(|msg| AppError::Validation {
            field: "sku".to_string(),
            message: msg.to_string(),
            message_id: "SKU tidak valid".to_string(),
        })?;
        validation::validate_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
            message_id: "Nama barang wajib diisi".to_string(),
        })?;
        validation::validate_price(input.cost_price).map_err(|msg| AppError::Validation {
            field: "cost_price".to_string(),
            message: msg.to_string(),
            message_id: "Harga beli tidak boleh negatif".to_string(),
        })?;
        validation::validate_price(input.sale_price).map_err(|msg| AppError::Validation {
            field: "sale_price".to_string(),
            message: msg.to_string(),
            message_id: "Harga jual tidak boleh negatif".to_string(),
        })?;
        validation::validate_initial_stock(input.initial_stock).map_err(|msg| {
            AppError::Validation {
                field: "initial_stock".to_string(),
                message: msg.to_string(),
                message_id: "Stok awal harus berupa angka non-negatif".to_string(),
            }
        })?;

        // SKUs are globally unique across tenants and global items alike
        let sku_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM items WHERE sku = $1)",
        )
        .bind(&input.sku)
        .fetch_one(&self.db)
        .await?;

        if sku_taken {
            return Err(AppError::DuplicateSku(input.sku));
        }

        let owner = if input.is_global {
            Owner::Global
        } else {
            Owner::Tenant(tenant_id.to_string())
        };

        let mut tx = self.db.begin().await?;

        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (sku, name, cost_price, sale_price, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, sku, name, cost_price, sale_price, user_id, created_at
            "#,
        )
        .bind(&input.sku)
        .bind(&input.name)
        .bind(input.cost_price)
        .bind(input.sale_price)
        .bind(owner.into_column())
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::DuplicateSku(input.sku.clone())
            } else {
                err.into()
            }
        })?;

        // The opening movement belongs to the creating tenant, even for a
        // global item: stock for global items is tenant-relative.
        if let Some(initial_stock) = input.initial_stock {
            if initial_stock > 0 {
                sqlx::query(
                    r#"
                    INSERT INTO stock_movements (user_id, item_id, change_qty, reason)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(tenant_id)
                .bind(item.id)
                .bind(initial_stock)
                .bind(MovementReason::InitialStock.as_str())
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        tracing::info!(item_id = %item.id, sku = %item.sku, "item created");
        Ok(item)
    }

    /// Delete an item the tenant owns. Global items and other tenants'
    /// items are off limits. Dependent transaction lines and movements are
    /// removed by the schema's cascade.
    pub async fn delete_item(&self, tenant_id: &str, item_id: Uuid) -> AppResult<()> {
        let owner_column = sqlx::query_scalar::<_, Option<String>>(
            "SELECT user_id FROM items WHERE id = $1",
        )
        .bind(item_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        if !Owner::from_column(owner_column).owned_by(tenant_id) {
            return Err(AppError::Forbidden(
                "You do not own this item".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM items WHERE id = $1 AND user_id = $2")
            .bind(item_id)
            .bind(tenant_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Item".to_string()));
        }

        tracing::info!(%item_id, tenant_id, "item deleted");
        Ok(())
    }

    /// Current on-hand quantity for one (tenant, item) pair: the signed sum
    /// of the tenant's movements. No rows means zero.
    pub async fn current_stock(&self, tenant_id: &str, item_id: Uuid) -> AppResult<i64> {
        let stock = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(change_qty), 0)::BIGINT
            FROM stock_movements
            WHERE user_id = $1 AND item_id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(item_id)
        .fetch_one(&self.db)
        .await?;

        Ok(stock)
    }

    /// Current stock for one visible item. `NotFound` covers both absent
    /// items and items hidden from this tenant.
    pub async fn item_balance(&self, tenant_id: &str, item_id: Uuid) -> AppResult<ItemBalance> {
        self.resolve_visible_item(tenant_id, item_id).await?;
        let current_stock = self.current_stock(tenant_id, item_id).await?;
        Ok(ItemBalance {
            item_id,
            current_stock,
        })
    }

    /// Record a manual stock correction against a visible item.
    pub async fn record_adjustment(
        &self,
        tenant_id: &str,
        item_id: Uuid,
        input: AdjustStockInput,
    ) -> AppResult<StockMovement> {
        if input.change_qty == 0 {
            return Err(AppError::Validation {
                field: "change_qty".to_string(),
                message: "Adjustment quantity must not be zero".to_string(),
                message_id: "Jumlah penyesuaian tidak boleh nol".to_string(),
            });
        }

        self.resolve_visible_item(tenant_id, item_id).await?;

        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO stock_movements (user_id, item_id, change_qty, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, item_id, change_qty, reason, movement_at, transaction_item_id
            "#,
        )
        .bind(tenant_id)
        .bind(item_id)
        .bind(input.change_qty)
        .bind(MovementReason::Adjustment.as_str())
        .fetch_one(&self.db)
        .await?;

        tracing::info!(%item_id, change_qty = input.change_qty, "stock adjusted");
        Ok(movement)
    }

    /// Fetch an item's owner column and fail with `NotFound` unless the
    /// item exists and is visible to the tenant.
    pub(crate) async fn resolve_visible_item(
        &self,
        tenant_id: &str,
        item_id: Uuid,
    ) -> AppResult<Item> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT id, sku, name, cost_price, sale_price, user_id, created_at FROM items WHERE id = $1",
        )
        .bind(item_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        if !Owner::from_column(item.user_id.clone()).visible_to(tenant_id) {
            return Err(AppError::NotFound("Item".to_string()));
        }

        Ok(item)
    }
}

/// PostgreSQL signals a unique-constraint breach with SQLSTATE 23505.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}

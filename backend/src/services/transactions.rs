//! Transaction recorder: the sole writer of transactions, their line items,
//! and the stock movements they imply
//!
//! Recording is all-or-nothing. The header, its lines, and the ledger
//! entries go through one database transaction; an error at any step rolls
//! the whole call back and leaves zero rows behind. The sale sufficiency
//! check is advisory: it reads the aggregate before the write without
//! locking, so two concurrent sales of the same item can both pass it and
//! jointly oversell. Acceptable for a single-operator shop; callers must
//! not rely on it as a hard reservation.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{MovementReason, Owner, RecordTransactionInput, TransactionType};
use crate::services::catalog::CatalogService;
use shared::models::signed_change;
use shared::validation;

/// Transaction service
#[derive(Clone)]
pub struct TransactionService {
    db: PgPool,
}

/// Filters for the transaction listing. All optional; unset filters match
/// everything.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct TransactionFilter {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub is_stock_related: Option<bool>,
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// One transaction in a listing, with its supplier (when any) joined in
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TransactionSummary {
    pub id: Uuid,
    pub name: Option<String>,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub total_amount: Decimal,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub is_stock_related: bool,
    pub created_at: DateTime<Utc>,
    pub supplier_id: Option<Uuid>,
    pub supplier_name: Option<String>,
}

/// Full transaction header joined with supplier details. A missing supplier
/// degrades to blank fields, never to an error.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TransactionHeader {
    pub id: Uuid,
    pub name: Option<String>,
    pub supplier_id: Option<Uuid>,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub total_amount: Decimal,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub is_stock_related: bool,
    pub created_at: DateTime<Utc>,
    pub supplier_name: Option<String>,
    pub supplier_city: Option<String>,
    pub supplier_email: Option<String>,
    pub supplier_phone: Option<String>,
    pub supplier_address: Option<String>,
    pub supplier_notes: Option<String>,
}

/// One line of a transaction detail, with catalog fields joined in
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TransactionLine {
    pub item_id: Uuid,
    pub item_name: Option<String>,
    pub sku: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Header plus lines, as served to the detail view
#[derive(Debug, Clone, Serialize)]
pub struct TransactionDetail {
    #[serde(flatten)]
    pub header: TransactionHeader,
    pub items: Vec<TransactionLine>,
}

impl TransactionService {
    /// Create a new TransactionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a transaction: validate, resolve referenced rows, recompute
    /// the total server-side, then persist header + lines (+ movements when
    /// stock-related) atomically. Returns the new transaction's id.
    pub async fn record_transaction(
        &self,
        tenant_id: &str,
        input: RecordTransactionInput,
    ) -> AppResult<Uuid> {
        validation::validate_transaction_input(&input)
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;

        // A supplier reference must resolve to a row this tenant can see
        if let Some(supplier_id) = input.supplier_id {
            let owner_column = sqlx::query_scalar::<_, Option<String>>(
                "SELECT user_id FROM suppliers WHERE id = $1",
            )
            .bind(supplier_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

            if !Owner::from_column(owner_column).visible_to(tenant_id) {
                return Err(AppError::NotFound("Supplier".to_string()));
            }
        }

        // Every line must point at a visible catalog item
        let catalog = CatalogService::new(self.db.clone());
        let mut skus = Vec::with_capacity(input.items.len());
        for line in &input.items {
            let item = catalog.resolve_visible_item(tenant_id, line.item_id).await?;
            skus.push(item.sku);
        }

        // Advisory sufficiency check for stock-related sales. Reads the
        // aggregate, then writes without locking; see the module docs for
        // the race this leaves open.
        if input.transaction_type == TransactionType::Sale && input.is_stock_related {
            for (line, sku) in input.items.iter().zip(&skus) {
                let available = catalog.current_stock(tenant_id, line.item_id).await?;
                if available < i64::from(line.quantity) {
                    return Err(AppError::InsufficientStock(format!(
                        "Only {} left in stock for {}, requested {}",
                        available, sku, line.quantity
                    )));
                }
            }
        }

        // The client's total, if it sent one, is ignored
        let total_amount = validation::compute_total_amount(&input.items);

        let mut tx = self.db.begin().await?;

        let transaction_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO transactions (user_id, name, supplier_id, date, type,
                                      total_amount, payment_method, notes, is_stock_related)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(tenant_id)
        .bind(&input.name)
        .bind(input.supplier_id)
        .bind(input.date)
        .bind(input.transaction_type.as_str())
        .bind(total_amount)
        .bind(&input.payment_method)
        .bind(&input.notes)
        .bind(input.is_stock_related)
        .fetch_one(&mut *tx)
        .await?;

        for line in &input.items {
            let line_id = sqlx::query_scalar::<_, Uuid>(
                r#"
                INSERT INTO transaction_items (transaction_id, item_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(transaction_id)
            .bind(line.item_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .fetch_one(&mut *tx)
            .await?;

            // Ledger entries carry the line id for provenance
            if input.is_stock_related {
                sqlx::query(
                    r#"
                    INSERT INTO stock_movements (user_id, item_id, change_qty, reason, transaction_item_id)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(tenant_id)
                .bind(line.item_id)
                .bind(signed_change(input.transaction_type, line.quantity))
                .bind(MovementReason::for_transaction(input.transaction_type).as_str())
                .bind(line_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        tracing::info!(
            %transaction_id,
            tenant_id,
            transaction_type = input.transaction_type.as_str(),
            %total_amount,
            "transaction recorded"
        );
        Ok(transaction_id)
    }

    /// Fetch one transaction with its lines. `NotFound` covers both absent
    /// ids and another tenant's transactions.
    pub async fn get_transaction(
        &self,
        tenant_id: &str,
        transaction_id: Uuid,
    ) -> AppResult<TransactionDetail> {
        let header = sqlx::query_as::<_, TransactionHeader>(
            r#"
            SELECT t.id, t.name, t.supplier_id, t.date, t.type AS transaction_type,
                   t.total_amount, t.payment_method, t.notes, t.is_stock_related, t.created_at,
                   s.name AS supplier_name, s.city AS supplier_city, s.email AS supplier_email,
                   s.phone AS supplier_phone, s.address AS supplier_address, s.notes AS supplier_notes
            FROM transactions t
            LEFT JOIN suppliers s ON s.id = t.supplier_id
            WHERE t.id = $1 AND t.user_id = $2
            "#,
        )
        .bind(transaction_id)
        .bind(tenant_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction".to_string()))?;

        let items = sqlx::query_as::<_, TransactionLine>(
            r#"
            SELECT ti.item_id, i.name AS item_name, i.sku, ti.quantity, ti.unit_price
            FROM transaction_items ti
            LEFT JOIN items i ON i.id = ti.item_id
            WHERE ti.transaction_id = $1
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.db)
        .await?;

        Ok(TransactionDetail { header, items })
    }

    /// List the tenant's transactions, newest first (`date`, then
    /// `created_at` as the tie-break), optionally filtered by type,
    /// stock-relatedness, and period.
    pub async fn list_transactions(
        &self,
        tenant_id: &str,
        filter: &TransactionFilter,
    ) -> AppResult<Vec<TransactionSummary>> {
        let transactions = sqlx::query_as::<_, TransactionSummary>(
            r#"
            SELECT t.id, t.name, t.date, t.type AS transaction_type, t.total_amount,
                   t.payment_method, t.notes, t.is_stock_related, t.created_at,
                   t.supplier_id, s.name AS supplier_name
            FROM transactions t
            LEFT JOIN suppliers s ON s.id = t.supplier_id
            WHERE t.user_id = $1
              AND ($2::TEXT IS NULL OR t.type = $2)
              AND ($3::BOOLEAN IS NULL OR t.is_stock_related = $3)
              AND ($4::INT IS NULL OR EXTRACT(YEAR FROM t.date) = $4)
              AND ($5::INT IS NULL OR EXTRACT(MONTH FROM t.date) = $5)
              AND ($6::DATE IS NULL OR t.date = $6)
              AND ($7::DATE IS NULL OR t.date >= $7)
              AND ($8::DATE IS NULL OR t.date <= $8)
            ORDER BY t.date DESC, t.created_at DESC
            "#,
        )
        .bind(tenant_id)
        .bind(filter.transaction_type.map(|t| t.as_str()))
        .bind(filter.is_stock_related)
        .bind(filter.year)
        .bind(filter.month)
        .bind(filter.date)
        .bind(filter.date_from)
        .bind(filter.date_to)
        .fetch_all(&self.db)
        .await?;

        Ok(transactions)
    }
}

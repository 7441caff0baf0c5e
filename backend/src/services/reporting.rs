//! Reporting service for dashboard summaries
//!
//! Read-only aggregations over the transactions the recorder wrote. `sale`
//! and `expense` are the only two buckets; nothing here adds invariants of
//! its own.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::TransactionType;
use shared::types::DateRange;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Period filter for dashboard stats: everything, a year, a month of a
/// year, or a single date.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PeriodFilter {
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub date: Option<NaiveDate>,
}

/// Range selector for the daily chart
#[derive(Debug, Clone, Copy)]
pub enum SummaryRange {
    /// The trailing window ending today (the dashboard default is 10 days)
    LastDays(u32),
    /// One calendar month
    Month { year: i32, month: i32 },
}

/// Income/expense/net totals for the dashboard cards
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_income: Decimal,
}

impl DashboardStats {
    /// What a guest (or an empty ledger) sees.
    pub fn zero() -> Self {
        Self {
            total_income: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            net_income: Decimal::ZERO,
        }
    }
}

/// One day's totals for the bar chart
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DailySummaryPoint {
    pub date: NaiveDate,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
}

#[derive(Debug, FromRow)]
struct RecentTransactionRow {
    id: Uuid,
    name: Option<String>,
    transaction_type: String,
    date: NaiveDate,
    payment_method: Option<String>,
    total_amount: Decimal,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

/// One entry in the recent-activity list
#[derive(Debug, Clone, Serialize)]
pub struct RecentTransaction {
    pub id: Uuid,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Indonesian label for the dashboard ("Pemasukan" / "Pengeluaran")
    pub display_type: String,
    pub date: NaiveDate,
    pub payment_method: Option<String>,
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct SaleRow {
    id: Uuid,
    name: Option<String>,
    amount: Decimal,
    date: NaiveDate,
}

/// One bar of the latest-sales chart
#[derive(Debug, Clone, Serialize)]
pub struct SaleChartPoint {
    pub id: Uuid,
    pub name: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    /// Truncated name for the chart axis
    pub label: String,
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Total income, expenses, and net over the filtered period.
    pub async fn dashboard_stats(
        &self,
        tenant_id: &str,
        filter: &PeriodFilter,
    ) -> AppResult<DashboardStats> {
        let (total_income, total_expenses) = sqlx::query_as::<_, (Decimal, Decimal)>(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN type = 'sale' THEN total_amount ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN type = 'expense' THEN total_amount ELSE 0 END), 0)
            FROM transactions
            WHERE user_id = $1
              AND ($2::INT IS NULL OR EXTRACT(YEAR FROM date) = $2)
              AND ($3::INT IS NULL OR EXTRACT(MONTH FROM date) = $3)
              AND ($4::DATE IS NULL OR date = $4)
            "#,
        )
        .bind(tenant_id)
        .bind(filter.year)
        .bind(filter.month)
        .bind(filter.date)
        .fetch_one(&self.db)
        .await?;

        Ok(DashboardStats {
            total_income,
            total_expenses,
            net_income: total_income - total_expenses,
        })
    }

    /// Per-day income/expense buckets for the chart, ascending by date.
    /// Days with no transactions are absent, not zero-filled.
    pub async fn daily_summary(
        &self,
        tenant_id: &str,
        range: SummaryRange,
    ) -> AppResult<Vec<DailySummaryPoint>> {
        let (window, year, month) = match range {
            SummaryRange::LastDays(days) => {
                let today = Utc::now().date_naive();
                (Some(DateRange::last_days(today, days)), None, None)
            }
            SummaryRange::Month { year, month } => (None, Some(year), Some(month)),
        };

        let points = sqlx::query_as::<_, DailySummaryPoint>(
            r#"
            SELECT date,
                   COALESCE(SUM(CASE WHEN type = 'sale' THEN total_amount ELSE 0 END), 0) AS total_income,
                   COALESCE(SUM(CASE WHEN type = 'expense' THEN total_amount ELSE 0 END), 0) AS total_expenses
            FROM transactions
            WHERE user_id = $1
              AND type IN ('sale', 'expense')
              AND ($2::DATE IS NULL OR date >= $2)
              AND ($3::DATE IS NULL OR date <= $3)
              AND ($4::INT IS NULL OR EXTRACT(YEAR FROM date) = $4)
              AND ($5::INT IS NULL OR EXTRACT(MONTH FROM date) = $5)
            GROUP BY date
            ORDER BY date ASC
            "#,
        )
        .bind(tenant_id)
        .bind(window.map(|w| w.start))
        .bind(window.map(|w| w.end))
        .bind(year)
        .bind(month)
        .fetch_all(&self.db)
        .await?;

        Ok(points)
    }

    /// The tenant's most recent transactions across both types, newest
    /// first with `created_at` as the tie-break.
    pub async fn recent_transactions(
        &self,
        tenant_id: &str,
        limit: i64,
    ) -> AppResult<Vec<RecentTransaction>> {
        let rows = sqlx::query_as::<_, RecentTransactionRow>(
            r#"
            SELECT id, name, type AS transaction_type, date, payment_method,
                   total_amount, notes, created_at
            FROM transactions
            WHERE user_id = $1 AND type IN ('sale', 'expense')
            ORDER BY date DESC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(tenant_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let display_type = TransactionType::from_str(&row.transaction_type)
                    .map(|t| t.display_label_id().to_string())
                    .unwrap_or_else(|_| row.transaction_type.clone());
                RecentTransaction {
                    id: row.id,
                    name: row.name,
                    transaction_type: row.transaction_type,
                    display_type,
                    date: row.date,
                    payment_method: row.payment_method,
                    total_amount: row.total_amount,
                    notes: row.notes,
                    created_at: row.created_at,
                }
            })
            .collect())
    }

    /// The most recent sales, shaped for the dashboard bar chart.
    pub async fn latest_sales(
        &self,
        tenant_id: &str,
        limit: i64,
    ) -> AppResult<Vec<SaleChartPoint>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, name, total_amount AS amount, date
            FROM transactions
            WHERE user_id = $1 AND type = 'sale'
            ORDER BY date DESC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(tenant_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let label = match &row.name {
                    Some(name) => truncate_label(name, 20),
                    None => format!("Penjualan {}", row.date),
                };
                SaleChartPoint {
                    id: row.id,
                    name: row.name,
                    amount: row.amount,
                    date: row.date,
                    label,
                }
            })
            .collect())
    }
}

/// Shorten a chart label to `max` characters, appending an ellipsis when
/// anything was cut.
fn truncate_label(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let mut label: String = name.chars().take(max).collect();
        label.push_str("...");
        label
    }
}

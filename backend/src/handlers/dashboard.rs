//! HTTP handlers for dashboard endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::{CurrentUser, OptionalUser};
use crate::services::reporting::{
    DailySummaryPoint, DashboardStats, PeriodFilter, RecentTransaction, ReportingService,
    SaleChartPoint, SummaryRange,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DailySummaryQuery {
    pub days: Option<u32>,
    pub month: Option<i32>,
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

/// Income/expense/net totals for the dashboard cards. Guests get zeroes
/// rather than a rejection.
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Query(filter): Query<PeriodFilter>,
) -> AppResult<Json<DashboardStats>> {
    let Some(user) = user else {
        return Ok(Json(DashboardStats::zero()));
    };

    let service = ReportingService::new(state.db);
    let stats = service.dashboard_stats(&user.tenant_id, &filter).await?;
    Ok(Json(stats))
}

/// Per-day income/expense totals for the chart: a given month, or the
/// trailing window (default 10 days).
pub async fn get_daily_summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<DailySummaryQuery>,
) -> AppResult<Json<Vec<DailySummaryPoint>>> {
    let range = match (query.year, query.month) {
        (Some(year), Some(month)) => SummaryRange::Month { year, month },
        _ => SummaryRange::LastDays(query.days.unwrap_or(10)),
    };

    let service = ReportingService::new(state.db);
    let points = service
        .daily_summary(&current_user.0.tenant_id, range)
        .await?;
    Ok(Json(points))
}

/// The most recent transactions across both types
pub async fn get_recent_transactions(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<RecentTransaction>>> {
    let service = ReportingService::new(state.db);
    let transactions = service
        .recent_transactions(&current_user.0.tenant_id, query.limit.unwrap_or(10))
        .await?;
    Ok(Json(transactions))
}

/// The latest sales, shaped for the dashboard bar chart
pub async fn get_latest_sales(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<Vec<SaleChartPoint>>> {
    let service = ReportingService::new(state.db);
    let sales = service
        .latest_sales(&current_user.0.tenant_id, query.limit.unwrap_or(7))
        .await?;
    Ok(Json(sales))
}

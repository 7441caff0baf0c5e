//! HTTP handlers for transaction endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::RecordTransactionInput;
use crate::services::transactions::{
    TransactionDetail, TransactionFilter, TransactionService, TransactionSummary,
};
use crate::AppState;

/// Response for a recorded transaction
#[derive(Debug, Serialize)]
pub struct RecordTransactionResponse {
    pub transaction_id: Uuid,
}

/// Record a transaction (header + lines + ledger movements, atomically)
pub async fn record_transaction(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordTransactionInput>,
) -> AppResult<Json<RecordTransactionResponse>> {
    let service = TransactionService::new(state.db);
    let transaction_id = service
        .record_transaction(&current_user.0.tenant_id, input)
        .await?;
    Ok(Json(RecordTransactionResponse { transaction_id }))
}

/// List the tenant's transactions with optional filters
pub async fn list_transactions(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(filter): Query<TransactionFilter>,
) -> AppResult<Json<Vec<TransactionSummary>>> {
    let service = TransactionService::new(state.db);
    let transactions = service
        .list_transactions(&current_user.0.tenant_id, &filter)
        .await?;
    Ok(Json(transactions))
}

/// Fetch one transaction with its line items
pub async fn get_transaction(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(transaction_id): Path<Uuid>,
) -> AppResult<Json<TransactionDetail>> {
    let service = TransactionService::new(state.db);
    let detail = service
        .get_transaction(&current_user.0.tenant_id, transaction_id)
        .await?;
    Ok(Json(detail))
}

//! HTTP handlers for the item catalog and stock ledger endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{CurrentUser, OptionalUser};
use crate::models::{AdjustStockInput, CreateItemInput};
use crate::services::catalog::{CatalogService, Item, ItemBalance, ItemWithStock, StockMovement};
use crate::AppState;

/// List the catalog with the requesting tenant's stock levels. Guests get
/// global items with zero stock instead of a rejection.
pub async fn list_catalog(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> AppResult<Json<Vec<ItemWithStock>>> {
    let service = CatalogService::new(state.db);
    let items = service
        .list_catalog(user.as_ref().map(|u| u.tenant_id.as_str()))
        .await?;
    Ok(Json(items))
}

/// Add an item to the catalog
pub async fn create_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateItemInput>,
) -> AppResult<Json<Item>> {
    let service = CatalogService::new(state.db);
    let item = service.create_item(&current_user.0.tenant_id, input).await?;
    Ok(Json(item))
}

/// Delete an owned item
pub async fn delete_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = CatalogService::new(state.db);
    service
        .delete_item(&current_user.0.tenant_id, item_id)
        .await?;
    Ok(Json(()))
}

/// Current stock for one item
pub async fn get_item_balance(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<ItemBalance>> {
    let service = CatalogService::new(state.db);
    let balance = service
        .item_balance(&current_user.0.tenant_id, item_id)
        .await?;
    Ok(Json(balance))
}

/// Record a manual stock adjustment
pub async fn adjust_stock(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(item_id): Path<Uuid>,
    Json(input): Json<AdjustStockInput>,
) -> AppResult<Json<StockMovement>> {
    let service = CatalogService::new(state.db);
    let movement = service
        .record_adjustment(&current_user.0.tenant_id, item_id, input)
        .await?;
    Ok(Json(movement))
}

//! HTTP handlers for supplier endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::CreateSupplierInput;
use crate::services::suppliers::{Supplier, SupplierService};
use crate::AppState;

/// List suppliers visible to the tenant (own plus global)
pub async fn list_suppliers(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Supplier>>> {
    let service = SupplierService::new(state.db);
    let suppliers = service.list_suppliers(&current_user.0.tenant_id).await?;
    Ok(Json(suppliers))
}

/// Register a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateSupplierInput>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service
        .create_supplier(&current_user.0.tenant_id, input)
        .await?;
    Ok(Json(supplier))
}

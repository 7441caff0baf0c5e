//! Route definitions for BukuToko

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::{
    handlers,
    middleware::{auth_middleware, optional_auth_middleware},
    AppState,
};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Identity provider webhook (public - HMAC verified)
        .route("/webhooks/identity", post(handlers::handle_identity_webhook))
        // Catalog + stock ledger (listing degrades for guests)
        .nest("/stock", stock_routes())
        // Protected routes - suppliers
        .nest("/suppliers", supplier_routes())
        // Protected routes - transactions
        .nest("/transactions", transaction_routes())
        // Dashboard (stats degrade for guests)
        .nest("/dashboard", dashboard_routes())
}

/// Catalog routes. The whole router runs the lenient middleware: handlers
/// that require a tenant use the `CurrentUser` extractor and reject on
/// their own, while the listing serves guests global items with zero stock.
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_catalog).post(handlers::create_item))
        .route("/:item_id", delete(handlers::delete_item))
        .route("/:item_id/balance", get(handlers::get_item_balance))
        .route("/:item_id/adjustments", post(handlers::adjust_stock))
        .route_layer(middleware::from_fn(optional_auth_middleware))
}

/// Supplier routes (protected)
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Transaction routes (protected)
fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_transactions).post(handlers::record_transaction),
        )
        .route("/:transaction_id", get(handlers::get_transaction))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Dashboard routes. Lenient middleware for the same reason as the catalog:
/// the stats card answers guests with zeroes, the rest require a tenant.
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(handlers::get_dashboard_stats))
        .route("/daily-summary", get(handlers::get_daily_summary))
        .route("/recent", get(handlers::get_recent_transactions))
        .route("/latest-sales", get(handlers::get_latest_sales))
        .route_layer(middleware::from_fn(optional_auth_middleware))
}

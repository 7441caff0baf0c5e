//! Catalog item models

use rust_decimal::Decimal;
use serde::Deserialize;

/// Input for adding an item to the catalog.
///
/// `is_global` publishes the item to every tenant (owner becomes NULL);
/// stock for global items is still tracked per tenant. A positive
/// `initial_stock` seeds the creating tenant's ledger with one
/// `initial_stock` movement.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemInput {
    pub sku: String,
    pub name: String,
    pub cost_price: Decimal,
    pub sale_price: Decimal,
    #[serde(default)]
    pub is_global: bool,
    pub initial_stock: Option<i32>,
}

//! Pure validation rules for BukuToko
//!
//! Everything here runs before any write and has no I/O. The backend maps
//! these failures onto its error envelope; the rules themselves are plain
//! functions so the test suites can exercise them directly.

use rust_decimal::Decimal;

use crate::models::{RecordTransactionInput, TransactionLineInput};

// ============================================================================
// Transaction Validations
// ============================================================================

/// Validate a transaction payload before anything is persisted.
///
/// Checks run in order and the first failure wins: name, lines present,
/// then per-line quantity and price.
pub fn validate_transaction_input(input: &RecordTransactionInput) -> Result<(), &'static str> {
    if input.name.trim().is_empty() {
        return Err("Transaction name is required");
    }
    if input.items.is_empty() {
        return Err("Transaction must include at least one item");
    }
    for line in &input.items {
        if line.quantity <= 0 {
            return Err("Item quantity must be greater than zero");
        }
        if line.unit_price < Decimal::ZERO {
            return Err("Item unit price cannot be negative");
        }
    }
    Ok(())
}

/// The server-side total: sum of quantity times unit price over the lines.
/// Whatever total the client sent is never consulted.
pub fn compute_total_amount(lines: &[TransactionLineInput]) -> Decimal {
    lines
        .iter()
        .map(|line| line.unit_price * Decimal::from(line.quantity))
        .sum()
}

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate an SKU: non-empty, at most 50 characters, no surrounding
/// whitespace. Uniqueness is enforced by the store, not here.
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.is_empty() {
        return Err("SKU is required");
    }
    if sku.len() > 50 {
        return Err("SKU must be at most 50 characters");
    }
    if sku.trim() != sku {
        return Err("SKU must not start or end with whitespace");
    }
    Ok(())
}

/// Validate an item or supplier display name.
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name is required");
    }
    if name.len() > 150 {
        return Err("Name must be at most 150 characters");
    }
    Ok(())
}

/// Prices are never negative. Zero is allowed (free or promo items).
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

/// Initial stock, when given, must be non-negative. Zero means "no opening
/// movement".
pub fn validate_initial_stock(initial_stock: Option<i32>) -> Result<(), &'static str> {
    match initial_stock {
        Some(qty) if qty < 0 => Err("Initial stock must be a non-negative number"),
        _ => Ok(()),
    }
}

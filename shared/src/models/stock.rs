//! Stock movement models
//!
//! The movement ledger is append-only: current stock for a (tenant, item)
//! pair is always the signed sum of that tenant's `change_qty` entries,
//! never a stored counter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TransactionType;

/// Why a stock movement was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementReason {
    Purchase,
    Sale,
    InitialStock,
    Adjustment,
}

impl MovementReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementReason::Purchase => "purchase",
            MovementReason::Sale => "sale",
            MovementReason::InitialStock => "initial_stock",
            MovementReason::Adjustment => "adjustment",
        }
    }

    /// The reason a stock-related transaction of the given type produces.
    /// Expenses restock (purchase), sales deplete.
    pub fn for_transaction(transaction_type: TransactionType) -> Self {
        match transaction_type {
            TransactionType::Expense => MovementReason::Purchase,
            TransactionType::Sale => MovementReason::Sale,
        }
    }
}

impl fmt::Display for MovementReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown movement reason: {0}")]
pub struct ParseMovementReasonError(pub String);

impl FromStr for MovementReason {
    type Err = ParseMovementReasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase" => Ok(MovementReason::Purchase),
            "sale" => Ok(MovementReason::Sale),
            "initial_stock" => Ok(MovementReason::InitialStock),
            "adjustment" => Ok(MovementReason::Adjustment),
            other => Err(ParseMovementReasonError(other.to_string())),
        }
    }
}

/// The signed ledger delta a stock-related transaction line contributes.
/// Expenses add stock, sales subtract it.
pub fn signed_change(transaction_type: TransactionType, quantity: i32) -> i32 {
    match transaction_type {
        TransactionType::Expense => quantity,
        TransactionType::Sale => -quantity,
    }
}

/// Input for a manual stock correction.
#[derive(Debug, Clone, Deserialize)]
pub struct AdjustStockInput {
    pub change_qty: i32,
    pub notes: Option<String>,
}

//! Transaction models
//!
//! A transaction is a financial record (sale or expense) with one line item
//! per catalog item involved. Stock-related transactions additionally drive
//! the movement ledger.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two kinds of transaction.
///
/// `sale` is the canonical literal for income; the legacy `income` literal
/// that older data may carry is a migration concern, not an accepted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Sale,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Sale => "sale",
            TransactionType::Expense => "expense",
        }
    }

    /// Indonesian display label used by the dashboard.
    pub fn display_label_id(&self) -> &'static str {
        match self {
            TransactionType::Sale => "Pemasukan",
            TransactionType::Expense => "Pengeluaran",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction type: {0}")]
pub struct ParseTransactionTypeError(pub String);

impl FromStr for TransactionType {
    type Err = ParseTransactionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(TransactionType::Sale),
            "expense" => Ok(TransactionType::Expense),
            other => Err(ParseTransactionTypeError(other.to_string())),
        }
    }
}

/// One line of a transaction: a catalog item, how many, and at what price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionLineInput {
    pub item_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Input for recording a transaction.
///
/// Any client-supplied total is ignored; the server always recomputes the
/// total from the lines.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordTransactionInput {
    pub name: String,
    pub supplier_id: Option<Uuid>,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_stock_related: bool,
    pub items: Vec<TransactionLineInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_round_trip() {
        assert_eq!("sale".parse::<TransactionType>().unwrap(), TransactionType::Sale);
        assert_eq!(
            "expense".parse::<TransactionType>().unwrap(),
            TransactionType::Expense
        );
        assert_eq!(TransactionType::Sale.as_str(), "sale");
    }

    #[test]
    fn test_legacy_income_literal_rejected() {
        assert!("income".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(TransactionType::Sale.display_label_id(), "Pemasukan");
        assert_eq!(TransactionType::Expense.display_label_id(), "Pengeluaran");
    }
}

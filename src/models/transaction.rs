//! Defines transactions, the record type behind the monthly report.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DatabaseID, UserID};

/// Whether a transaction adds to or subtracts from the month's profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn from_str(text: &str) -> Option<Self> {
        match text {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

/// The lifecycle state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
        }
    }

    pub fn from_str(text: &str) -> Option<Self> {
        match text {
            "pending" => Some(TransactionStatus::Pending),
            "completed" => Some(TransactionStatus::Completed),
            _ => None,
        }
    }
}

/// A single income or expense record belonging to a user.
///
/// Amounts are always positive; `transaction_type` determines the direction
/// of the contribution to the monthly report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: DatabaseID,
    pub user_id: UserID,
    pub amount: Decimal,
    pub description: Option<String>,
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub company: Option<String>,
    pub date: NaiveDate,
}

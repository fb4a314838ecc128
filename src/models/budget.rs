//! Defines budgets, which attach to a project owned by the same user.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DatabaseID, UserID};

/// The review state of a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Pending,
    Approved,
    Rejected,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Pending => "pending",
            BudgetStatus::Approved => "approved",
            BudgetStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(text: &str) -> Option<Self> {
        match text {
            "pending" => Some(BudgetStatus::Pending),
            "approved" => Some(BudgetStatus::Approved),
            "rejected" => Some(BudgetStatus::Rejected),
            _ => None,
        }
    }
}

/// A budget line for a project.
///
/// `project_id` must refer to a project owned by the same user; the handlers
/// validate this before any write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: DatabaseID,
    pub user_id: UserID,
    pub project_id: DatabaseID,
    pub description: String,
    pub amount: Decimal,
    pub status: BudgetStatus,
    pub date: NaiveDate,
}

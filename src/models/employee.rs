//! Defines employees on a user's payroll.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DatabaseID, UserID};

/// An employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: DatabaseID,
    pub user_id: UserID,
    pub name: String,
    pub salary: Decimal,
    pub position: Option<String>,
}

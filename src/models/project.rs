//! Defines client projects, which budgets attach to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DatabaseID, UserID};

/// A client project. Owns zero or more budgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: DatabaseID,
    pub user_id: UserID,
    pub name: String,
    pub description: String,
    pub client: String,
    pub start_date: NaiveDate,
    /// When present, must be on or after `start_date`.
    pub end_date: Option<NaiveDate>,
}

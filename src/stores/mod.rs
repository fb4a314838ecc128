//! Contains traits and implementations for objects that store the domain
//! [models](crate::models).
//!
//! Each file defines the store trait for one entity kind and its SQLite
//! implementation. Stores are ownership-agnostic: listing is pre-filtered by
//! owner, but get/update/delete operate on bare row IDs and the authorization
//! guard lives in the route handlers.

mod budget;
mod employee;
mod payment;
mod project;
mod transaction;
mod user;

pub use budget::{BudgetStore, BudgetUpdate, NewBudget, SQLiteBudgetStore};
pub use employee::{EmployeeStore, EmployeeUpdate, NewEmployee, SQLiteEmployeeStore};
pub use payment::{NewPayment, PaymentStore, PaymentUpdate, SQLitePaymentStore};
pub use project::{NewProject, ProjectStore, ProjectUpdate, SQLiteProjectStore};
pub use transaction::{
    NewTransaction, SQLiteTransactionStore, TransactionStore, TransactionUpdate,
};
pub use user::{NewUser, SQLiteUserStore, UserStore, UserUpdate};

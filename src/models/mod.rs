//! The domain models for the application.

mod budget;
mod employee;
mod password;
mod payment;
mod project;
mod transaction;
mod user;

pub use budget::{Budget, BudgetStatus};
pub use employee::Employee;
pub use password::PasswordHash;
pub use payment::{Payment, PaymentStatus};
pub use project::Project;
pub use transaction::{Transaction, TransactionStatus, TransactionType};
pub use user::{User, UserID, UserProfile};

use chrono::NaiveDate;

use crate::Error;

/// Alias for integer database row IDs to differentiate them from other integers.
pub type DatabaseID = i64;

/// Parse a `YYYY-MM-DD` date string from a request body or query string.
///
/// # Errors
/// Returns [Error::InvalidDateFormat] if `text` does not match the pattern or
/// names an impossible date (e.g. month 13).
pub fn parse_date(text: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| Error::InvalidDateFormat(text.to_owned()))
}

#[cfg(test)]
mod date_tests {
    use chrono::NaiveDate;

    use crate::Error;

    use super::parse_date;

    #[test]
    fn parses_valid_date() {
        assert_eq!(
            parse_date("2024-01-05"),
            Ok(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        );
    }

    #[test]
    fn rejects_impossible_date() {
        assert_eq!(
            parse_date("2024-13-40"),
            Err(Error::InvalidDateFormat("2024-13-40".to_owned()))
        );
    }

    #[test]
    fn rejects_wrong_pattern() {
        assert_eq!(
            parse_date("05/01/2024"),
            Err(Error::InvalidDateFormat("05/01/2024".to_owned()))
        );
    }
}

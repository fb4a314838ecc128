//! The JSON request handlers for the API.

pub mod budget;
pub mod chart;
pub mod employee;
pub mod payment;
pub mod project;
pub mod transaction;
pub mod user;

use rust_decimal::Decimal;

use crate::Error;

/// Unwrap a request field that the endpoint requires.
fn require<T>(field: Option<T>, name: &'static str) -> Result<T, Error> {
    field.ok_or(Error::MissingField(name))
}

/// Unwrap a required text field. An empty string counts as missing.
fn require_text(field: Option<String>, name: &'static str) -> Result<String, Error> {
    match field {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(Error::MissingField(name)),
    }
}

/// Check that a monetary amount is greater than zero.
fn require_positive(amount: Decimal, name: &'static str) -> Result<Decimal, Error> {
    if amount > Decimal::ZERO {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount(name))
    }
}

/// Hide whether a record exists from users who do not own it. A missing
/// record and another user's record produce the same response.
fn mask_not_found(error: Error) -> Error {
    match error {
        Error::NotFound => Error::Forbidden,
        other => other,
    }
}

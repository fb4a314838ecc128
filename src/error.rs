//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field was absent or empty in a create request.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A monetary amount was zero or negative.
    #[error("{0} must be greater than zero")]
    InvalidAmount(&'static str),

    /// The email address could not be parsed.
    #[error("invalid email address")]
    InvalidEmail,

    /// The email used to register is already in use. The client should try
    /// again with a different email address.
    #[error("the email is already registered")]
    DuplicateEmail,

    /// The user provided an invalid email/password combination.
    ///
    /// Deliberately covers both unknown emails and wrong passwords so the
    /// response does not reveal which one failed.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The bearer token was missing, malformed, or expired.
    #[error("invalid token")]
    InvalidToken,

    /// The token could not be signed.
    #[error("token creation error")]
    TokenCreation,

    /// The record does not exist or belongs to another user.
    ///
    /// The two cases are never distinguished in responses so that clients
    /// cannot probe for the existence of other users' records.
    #[error("not found or not authorized")]
    Forbidden,

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A date string did not match the `YYYY-MM-DD` pattern.
    #[error("invalid date \"{0}\", expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    /// An end date was before the matching start date, either on a project
    /// or in a report query.
    #[error("end_date must be on or after start_date")]
    InvalidDateRange,

    /// A foreign key did not resolve to a record owned by the acting user,
    /// e.g. a budget referencing someone else's project.
    #[error("the referenced record could not be found")]
    InvalidReference,

    /// The report date range matched no transactions.
    #[error("no transaction data for the requested period")]
    NoData,

    /// The external chart service call failed (network error or non-2xx).
    /// Not retried.
    #[error("chart service error: {0}")]
    ChartService(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server,
    /// never sent to the client.
    #[error("hashing failed: {0}")]
    Hashing(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("email") =>
            {
                Error::DuplicateEmail
            }
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 787 =>
            {
                Error::InvalidReference
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::MissingField(_)
            | Error::InvalidAmount(_)
            | Error::InvalidEmail
            | Error::DuplicateEmail
            | Error::InvalidDateFormat(_)
            | Error::InvalidDateRange => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials | Error::InvalidToken => StatusCode::UNAUTHORIZED,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::NotFound | Error::InvalidReference | Error::NoData => StatusCode::NOT_FOUND,
            Error::ChartService(_) => StatusCode::BAD_GATEWAY,
            Error::TokenCreation | Error::Hashing(_) | Error::DatabaseLock | Error::SqlError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Internal errors are logged server side and replaced with a generic
        // message so implementation details never reach the client.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("An unexpected error occurred: {}", self);
            "internal server error".to_owned()
        } else {
            self.to_string()
        };

        let body = Json(json!({ "message": message }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    #[test]
    fn sql_no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn forbidden_masks_ownership() {
        let response = Error::Forbidden.into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn internal_errors_are_not_exposed() {
        let response = Error::Hashing("bcrypt exploded".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

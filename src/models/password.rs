//! Defines the type that handles password hashing and verification.

use std::fmt::Display;

use bcrypt::{hash, verify};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// An alias for the default encryption cost for hashing passwords.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Hash a raw password with the specified `cost`.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed to
    /// verify a password. Pass [PasswordHash::DEFAULT_COST] outside of tests.
    ///
    /// # Errors
    /// Returns [Error::Hashing] if the underlying library fails.
    pub fn new(raw_password: &str, cost: u32) -> Result<Self, Error> {
        hash(raw_password, cost)
            .map(Self)
            .map_err(|e| Error::Hashing(e.to_string()))
    }

    /// Create a `PasswordHash` from a string that is already a bcrypt hash,
    /// e.g. one read back from the database.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`: an
    /// invalid hash string will cause verification failures, not memory
    /// unsafety.
    pub fn new_unchecked(hash_string: String) -> Self {
        Self(hash_string)
    }

    /// Check whether `raw_password` matches this hash.
    ///
    /// # Errors
    /// Returns [Error::Hashing] if the stored hash could not be parsed.
    pub fn verify(&self, raw_password: &str) -> Result<bool, Error> {
        verify(raw_password, &self.0).map_err(|e| Error::Hashing(e.to_string()))
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

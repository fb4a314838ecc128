//! Defines a user of the application and its supporting types.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::models::PasswordHash;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better
/// compile time errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
///
/// The password hash is kept private and never serialized; responses use
/// [UserProfile] instead.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserID,
    name: String,
    company: String,
    industry: Option<String>,
    email: EmailAddress,
    password_hash: PasswordHash,
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a user from its stored parts.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: UserID,
        name: String,
        company: String,
        industry: Option<String>,
        email: EmailAddress,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            company,
            industry,
            email,
            password_hash,
            created_at,
        }
    }

    /// The user's ID in the database.
    pub fn id(&self) -> UserID {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn industry(&self) -> Option<&str> {
        self.industry.as_deref()
    }

    /// The email address associated with the user.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The user's password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The serializable view of the user, without the password hash.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            company: self.company.clone(),
            industry: self.industry.clone(),
            email: self.email.to_string(),
            created_at: self.created_at,
        }
    }
}

/// The wire representation of a [User]. Excludes the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserID,
    pub name: String,
    pub company: String,
    pub industry: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod user_tests {
    use std::str::FromStr;

    use chrono::Utc;
    use email_address::EmailAddress;

    use crate::models::PasswordHash;

    use super::{User, UserID};

    #[test]
    fn profile_excludes_password_hash() {
        let user = User::new(
            UserID::new(1),
            "Ada".to_owned(),
            "Lovelace Ltd".to_owned(),
            Some("software".to_owned()),
            EmailAddress::from_str("ada@example.com").unwrap(),
            PasswordHash::new_unchecked("$2b$04$notarealhash".to_owned()),
            Utc::now(),
        );

        let serialized = serde_json::to_string(&user.profile()).unwrap();

        assert!(!serialized.contains("notarealhash"));
        assert!(serialized.contains("ada@example.com"));
    }
}

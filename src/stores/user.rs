//! Defines the user store trait and an implementation for the SQLite backend.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use email_address::EmailAddress;
use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{PasswordHash, User, UserID},
};

/// The fields required to create a new user.
pub struct NewUser {
    pub name: String,
    pub company: String,
    pub industry: Option<String>,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
}

/// A partial update to a user. `None` fields retain their current value.
///
/// The email address is immutable once registered.
#[derive(Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub company: Option<String>,
    pub industry: Option<String>,
    pub password_hash: Option<PasswordHash>,
}

/// Handles the creation and retrieval of users.
pub trait UserStore {
    /// Create a new user.
    ///
    /// Returns [Error::DuplicateEmail] if the email address is already in use.
    fn create(&mut self, new_user: NewUser) -> Result<User, Error>;

    /// Get a user by their ID.
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Get a user by their email.
    ///
    /// Returns [Error::NotFound] if no user with the given email exists.
    fn get_by_email(&self, email: &EmailAddress) -> Result<User, Error>;

    /// Apply a partial update and return the updated user.
    fn update(&mut self, id: UserID, update: UserUpdate) -> Result<User, Error>;

    /// Permanently delete a user.
    fn delete(&mut self, id: UserID) -> Result<(), Error>;
}

/// Stores users in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    fn create(&mut self, new_user: NewUser) -> Result<User, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;
        let created_at = Utc::now();

        connection.execute(
            "INSERT INTO user (name, company, industry, email, password, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                &new_user.name,
                &new_user.company,
                &new_user.industry,
                &new_user.email.to_string(),
                new_user.password_hash.to_string(),
                created_at,
            ),
        )?;

        let id = UserID::new(connection.last_insert_rowid());

        Ok(User::new(
            id,
            new_user.name,
            new_user.company,
            new_user.industry,
            new_user.email,
            new_user.password_hash,
            created_at,
        ))
    }

    fn get(&self, id: UserID) -> Result<User, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "SELECT id, name, company, industry, email, password, created_at
                 FROM user WHERE id = :id",
            )?
            .query_row(&[(":id", &id.as_i64())], Self::map_row)
            .map_err(|e| e.into())
    }

    fn get_by_email(&self, email: &EmailAddress) -> Result<User, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "SELECT id, name, company, industry, email, password, created_at
                 FROM user WHERE email = :email",
            )?
            .query_row(&[(":email", &email.to_string())], Self::map_row)
            .map_err(|e| e.into())
    }

    fn update(&mut self, id: UserID, update: UserUpdate) -> Result<User, Error> {
        let mut user = self.get(id)?;

        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        let name = update.name.unwrap_or_else(|| user.name().to_owned());
        let company = update.company.unwrap_or_else(|| user.company().to_owned());
        let industry = update
            .industry
            .or_else(|| user.industry().map(str::to_owned));
        let password_hash = update
            .password_hash
            .unwrap_or_else(|| user.password_hash().clone());

        connection.execute(
            "UPDATE user SET name = ?1, company = ?2, industry = ?3, password = ?4 WHERE id = ?5",
            (
                &name,
                &company,
                &industry,
                password_hash.to_string(),
                id.as_i64(),
            ),
        )?;

        user = User::new(
            id,
            name,
            company,
            industry,
            user.email().clone(),
            password_hash,
            user.created_at(),
        );

        Ok(user)
    }

    fn delete(&mut self, id: UserID) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute("DELETE FROM user WHERE id = :id", &[(":id", &id.as_i64())])?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    company TEXT NOT NULL,
                    industry TEXT,
                    email TEXT UNIQUE NOT NULL,
                    password TEXT NOT NULL,
                    created_at TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = UserID::new(row.get(0)?);
        let name = row.get(1)?;
        let company = row.get(2)?;
        let industry = row.get(3)?;
        let raw_email: String = row.get(4)?;
        let email = EmailAddress::new_unchecked(raw_email);
        let password_hash = PasswordHash::new_unchecked(row.get(5)?);
        let created_at = row.get(6)?;

        Ok(User::new(
            id,
            name,
            company,
            industry,
            email,
            password_hash,
            created_at,
        ))
    }
}

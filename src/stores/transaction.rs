//! Defines the transaction store trait and an implementation for the SQLite
//! backend.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rusqlite::{Connection, Row};
use rust_decimal::Decimal;

use crate::{
    Error,
    db::{CreateTable, MapRow, decimal_from_row, variant_from_row},
    models::{DatabaseID, Transaction, TransactionStatus, TransactionType, UserID},
};

/// The fields required to create a new transaction.
pub struct NewTransaction {
    pub user_id: UserID,
    pub amount: Decimal,
    pub description: Option<String>,
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub company: Option<String>,
    pub date: NaiveDate,
}

/// A partial update to a transaction. `None` fields retain their current
/// value.
#[derive(Default)]
pub struct TransactionUpdate {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    pub company: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Handles the creation and retrieval of transactions.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    fn create(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store.
    fn get(&self, id: DatabaseID) -> Result<Transaction, Error>;

    /// Retrieve all of a user's transactions in insertion order.
    fn list_by_owner(&self, user_id: UserID) -> Result<Vec<Transaction>, Error>;

    /// Apply a partial update and return the updated transaction.
    fn update(&mut self, id: DatabaseID, update: TransactionUpdate)
    -> Result<Transaction, Error>;

    /// Permanently delete a transaction.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SQLiteTransactionStore {
    fn create(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        connection.execute(
            "INSERT INTO \"transaction\"
                (user_id, amount, description, transaction_type, status, company, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                new_transaction.user_id.as_i64(),
                new_transaction.amount.to_string(),
                &new_transaction.description,
                new_transaction.transaction_type.as_str(),
                new_transaction.status.as_str(),
                &new_transaction.company,
                new_transaction.date,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Transaction {
            id,
            user_id: new_transaction.user_id,
            amount: new_transaction.amount,
            description: new_transaction.description,
            transaction_type: new_transaction.transaction_type,
            status: new_transaction.status,
            company: new_transaction.company,
            date: new_transaction.date,
        })
    }

    fn get(&self, id: DatabaseID) -> Result<Transaction, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "SELECT id, user_id, amount, description, transaction_type, status, company, date
                 FROM \"transaction\" WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], Self::map_row)
            .map_err(|e| e.into())
    }

    fn list_by_owner(&self, user_id: UserID) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "SELECT id, user_id, amount, description, transaction_type, status, company, date
                 FROM \"transaction\" WHERE user_id = :user_id",
            )?
            .query_map(&[(":user_id", &user_id.as_i64())], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    fn update(
        &mut self,
        id: DatabaseID,
        update: TransactionUpdate,
    ) -> Result<Transaction, Error> {
        let mut transaction = self.get(id)?;

        if let Some(amount) = update.amount {
            transaction.amount = amount;
        }
        if let Some(description) = update.description {
            transaction.description = Some(description);
        }
        if let Some(transaction_type) = update.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(status) = update.status {
            transaction.status = status;
        }
        if let Some(company) = update.company {
            transaction.company = Some(company);
        }
        if let Some(date) = update.date {
            transaction.date = date;
        }

        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute(
                "UPDATE \"transaction\"
                 SET amount = ?1, description = ?2, transaction_type = ?3, status = ?4,
                     company = ?5, date = ?6
                 WHERE id = ?7",
                (
                    transaction.amount.to_string(),
                    &transaction.description,
                    transaction.transaction_type.as_str(),
                    transaction.status.as_str(),
                    &transaction.company,
                    transaction.date,
                    id,
                ),
            )?;

        Ok(transaction)
    }

    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL,
                    amount TEXT NOT NULL,
                    description TEXT,
                    transaction_type TEXT NOT NULL,
                    status TEXT NOT NULL,
                    company TEXT,
                    date TEXT NOT NULL,
                    FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Transaction {
            id: row.get(0)?,
            user_id: UserID::new(row.get(1)?),
            amount: decimal_from_row(row, 2)?,
            description: row.get(3)?,
            transaction_type: variant_from_row(row, 4, TransactionType::from_str)?,
            status: variant_from_row(row, 5, TransactionStatus::from_str)?,
            company: row.get(6)?,
            date: row.get(7)?,
        })
    }
}

//! Defines the payment store trait and an implementation for the SQLite
//! backend.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rusqlite::{Connection, Row};
use rust_decimal::Decimal;

use crate::{
    Error,
    db::{CreateTable, MapRow, decimal_from_row, variant_from_row},
    models::{DatabaseID, Payment, PaymentStatus, UserID},
};

/// The fields required to create a new payment.
pub struct NewPayment {
    pub user_id: UserID,
    pub amount: Decimal,
    pub recipient: String,
    pub status: PaymentStatus,
    pub date: NaiveDate,
}

/// A partial update to a payment. `None` fields retain their current value.
#[derive(Default)]
pub struct PaymentUpdate {
    pub amount: Option<Decimal>,
    pub recipient: Option<String>,
    pub status: Option<PaymentStatus>,
    pub date: Option<NaiveDate>,
}

/// Handles the creation and retrieval of payments.
pub trait PaymentStore {
    fn create(&mut self, new_payment: NewPayment) -> Result<Payment, Error>;

    fn get(&self, id: DatabaseID) -> Result<Payment, Error>;

    fn list_by_owner(&self, user_id: UserID) -> Result<Vec<Payment>, Error>;

    fn update(&mut self, id: DatabaseID, update: PaymentUpdate) -> Result<Payment, Error>;

    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}

/// Stores payments in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLitePaymentStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLitePaymentStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl PaymentStore for SQLitePaymentStore {
    fn create(&mut self, new_payment: NewPayment) -> Result<Payment, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        connection.execute(
            "INSERT INTO payment (user_id, amount, recipient, status, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                new_payment.user_id.as_i64(),
                new_payment.amount.to_string(),
                &new_payment.recipient,
                new_payment.status.as_str(),
                new_payment.date,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Payment {
            id,
            user_id: new_payment.user_id,
            amount: new_payment.amount,
            recipient: new_payment.recipient,
            status: new_payment.status,
            date: new_payment.date,
        })
    }

    fn get(&self, id: DatabaseID) -> Result<Payment, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "SELECT id, user_id, amount, recipient, status, date
                 FROM payment WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], Self::map_row)
            .map_err(|e| e.into())
    }

    fn list_by_owner(&self, user_id: UserID) -> Result<Vec<Payment>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "SELECT id, user_id, amount, recipient, status, date
                 FROM payment WHERE user_id = :user_id",
            )?
            .query_map(&[(":user_id", &user_id.as_i64())], Self::map_row)?
            .map(|maybe_payment| maybe_payment.map_err(Error::SqlError))
            .collect()
    }

    fn update(&mut self, id: DatabaseID, update: PaymentUpdate) -> Result<Payment, Error> {
        let mut payment = self.get(id)?;

        if let Some(amount) = update.amount {
            payment.amount = amount;
        }
        if let Some(recipient) = update.recipient {
            payment.recipient = recipient;
        }
        if let Some(status) = update.status {
            payment.status = status;
        }
        if let Some(date) = update.date {
            payment.date = date;
        }

        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute(
                "UPDATE payment SET amount = ?1, recipient = ?2, status = ?3, date = ?4
                 WHERE id = ?5",
                (
                    payment.amount.to_string(),
                    &payment.recipient,
                    payment.status.as_str(),
                    payment.date,
                    id,
                ),
            )?;

        Ok(payment)
    }

    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute("DELETE FROM payment WHERE id = :id", &[(":id", &id)])?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLitePaymentStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS payment (
                    id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL,
                    amount TEXT NOT NULL,
                    recipient TEXT NOT NULL,
                    status TEXT NOT NULL,
                    date TEXT NOT NULL,
                    FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLitePaymentStore {
    type ReturnType = Payment;

    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Payment {
            id: row.get(0)?,
            user_id: UserID::new(row.get(1)?),
            amount: decimal_from_row(row, 2)?,
            recipient: row.get(3)?,
            status: variant_from_row(row, 4, PaymentStatus::from_str)?,
            date: row.get(5)?,
        })
    }
}

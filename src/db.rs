/*! This module defines traits for interacting with the application's database. */

use std::str::FromStr;

use rusqlite::{Connection, Row, Transaction as SqlTransaction, types::Type};
use rust_decimal::Decimal;

use crate::Error;

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create a table for the model.
    ///
    /// # Errors
    /// Returns an error if the table already exists or if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a concrete rust type.
pub trait MapRow {
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all the
    /// table columns in the order they were defined.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the
    /// corresponding rust type, or if an invalid column index was used.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Read a monetary amount stored as TEXT back into a [Decimal].
///
/// Amounts are stored as decimal strings so that no precision is lost going
/// through the database.
pub(crate) fn decimal_from_row(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let raw: String = row.get(index)?;

    Decimal::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Read an enum stored as TEXT using the entity's `from_str` constructor.
pub(crate) fn variant_from_row<T>(
    row: &Row,
    index: usize,
    from_str: fn(&str) -> Option<T>,
) -> Result<T, rusqlite::Error> {
    let raw: String = row.get(index)?;

    from_str(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            Type::Text,
            format!("unrecognized variant {raw:?}").into(),
        )
    })
}

/// Create the tables for all of the domain models.
///
/// Runs inside a single exclusive transaction so a partially created schema
/// is never left behind.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    use crate::stores::{
        SQLiteBudgetStore, SQLiteEmployeeStore, SQLitePaymentStore, SQLiteProjectStore,
        SQLiteTransactionStore, SQLiteUserStore,
    };

    connection.execute_batch("PRAGMA foreign_keys = ON;")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    SQLiteUserStore::create_table(&transaction)?;
    SQLiteTransactionStore::create_table(&transaction)?;
    SQLitePaymentStore::create_table(&transaction)?;
    SQLiteProjectStore::create_table(&transaction)?;
    SQLiteBudgetStore::create_table(&transaction)?;
    SQLiteEmployeeStore::create_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod db_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(name) FROM sqlite_master WHERE type = 'table' AND name IN
                ('user', 'transaction', 'payment', 'project', 'budget', 'employee')",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(count, 6);
    }

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();
        initialize(&conn).unwrap();
    }
}

//! Defines the budget store trait and an implementation for the SQLite
//! backend.
//!
//! Budgets reference a project by id but carry no foreign key constraint on
//! it. Deleting a project leaves its budgets in place.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rusqlite::{Connection, Row};
use rust_decimal::Decimal;

use crate::{
    Error,
    db::{CreateTable, MapRow, decimal_from_row, variant_from_row},
    models::{Budget, BudgetStatus, DatabaseID, UserID},
};

/// The fields required to create a new budget.
pub struct NewBudget {
    pub user_id: UserID,
    pub project_id: DatabaseID,
    pub description: String,
    pub amount: Decimal,
    pub status: BudgetStatus,
    pub date: NaiveDate,
}

/// A partial update to a budget. `None` fields retain their current value.
/// The project a budget belongs to cannot be changed.
#[derive(Default)]
pub struct BudgetUpdate {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub status: Option<BudgetStatus>,
    pub date: Option<NaiveDate>,
}

/// Handles the creation and retrieval of budgets.
pub trait BudgetStore {
    fn create(&mut self, new_budget: NewBudget) -> Result<Budget, Error>;

    fn get(&self, id: DatabaseID) -> Result<Budget, Error>;

    fn list_by_owner(&self, user_id: UserID) -> Result<Vec<Budget>, Error>;

    fn update(&mut self, id: DatabaseID, update: BudgetUpdate) -> Result<Budget, Error>;

    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}

/// Stores budgets in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteBudgetStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteBudgetStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl BudgetStore for SQLiteBudgetStore {
    fn create(&mut self, new_budget: NewBudget) -> Result<Budget, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        connection.execute(
            "INSERT INTO budget (user_id, project_id, description, amount, status, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                new_budget.user_id.as_i64(),
                new_budget.project_id,
                &new_budget.description,
                new_budget.amount.to_string(),
                new_budget.status.as_str(),
                new_budget.date,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Budget {
            id,
            user_id: new_budget.user_id,
            project_id: new_budget.project_id,
            description: new_budget.description,
            amount: new_budget.amount,
            status: new_budget.status,
            date: new_budget.date,
        })
    }

    fn get(&self, id: DatabaseID) -> Result<Budget, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "SELECT id, user_id, project_id, description, amount, status, date
                 FROM budget WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], Self::map_row)
            .map_err(|e| e.into())
    }

    fn list_by_owner(&self, user_id: UserID) -> Result<Vec<Budget>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "SELECT id, user_id, project_id, description, amount, status, date
                 FROM budget WHERE user_id = :user_id",
            )?
            .query_map(&[(":user_id", &user_id.as_i64())], Self::map_row)?
            .map(|maybe_budget| maybe_budget.map_err(Error::SqlError))
            .collect()
    }

    fn update(&mut self, id: DatabaseID, update: BudgetUpdate) -> Result<Budget, Error> {
        let mut budget = self.get(id)?;

        if let Some(description) = update.description {
            budget.description = description;
        }
        if let Some(amount) = update.amount {
            budget.amount = amount;
        }
        if let Some(status) = update.status {
            budget.status = status;
        }
        if let Some(date) = update.date {
            budget.date = date;
        }

        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute(
                "UPDATE budget SET description = ?1, amount = ?2, status = ?3, date = ?4
                 WHERE id = ?5",
                (
                    &budget.description,
                    budget.amount.to_string(),
                    budget.status.as_str(),
                    budget.date,
                    id,
                ),
            )?;

        Ok(budget)
    }

    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute("DELETE FROM budget WHERE id = :id", &[(":id", &id)])?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteBudgetStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS budget (
                    id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL,
                    project_id INTEGER NOT NULL,
                    description TEXT NOT NULL,
                    amount TEXT NOT NULL,
                    status TEXT NOT NULL,
                    date TEXT NOT NULL,
                    FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteBudgetStore {
    type ReturnType = Budget;

    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Budget {
            id: row.get(0)?,
            user_id: UserID::new(row.get(1)?),
            project_id: row.get(2)?,
            description: row.get(3)?,
            amount: decimal_from_row(row, 4)?,
            status: variant_from_row(row, 5, BudgetStatus::from_str)?,
            date: row.get(6)?,
        })
    }
}

#[cfg(test)]
mod budget_store_tests {
    use std::{
        str::FromStr,
        sync::{Arc, Mutex},
    };

    use chrono::NaiveDate;
    use email_address::EmailAddress;
    use rusqlite::Connection;
    use rust_decimal::Decimal;

    use crate::{
        Error,
        db::initialize,
        models::{BudgetStatus, DatabaseID, PasswordHash, UserID},
        stores::{
            NewProject, NewUser, ProjectStore, SQLiteProjectStore, SQLiteUserStore, UserStore,
        },
    };

    use super::{BudgetStore, BudgetUpdate, NewBudget, SQLiteBudgetStore};

    fn get_store_with_project() -> (SQLiteBudgetStore, SQLiteProjectStore, UserID, DatabaseID)
    {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        let user = SQLiteUserStore::new(connection.clone())
            .create(NewUser {
                name: "Jane".to_owned(),
                company: "Acme".to_owned(),
                industry: None,
                email: EmailAddress::from_str("jane@acme.test").unwrap(),
                password_hash: PasswordHash::new_unchecked("$2b$04$notarealhash".to_owned()),
            })
            .unwrap();

        let mut project_store = SQLiteProjectStore::new(connection.clone());
        let project = project_store
            .create(NewProject {
                user_id: user.id(),
                name: "Website rebuild".to_owned(),
                description: "New marketing site".to_owned(),
                client: "Acme".to_owned(),
                start_date: NaiveDate::parse_from_str("2024-03-01", "%Y-%m-%d").unwrap(),
                end_date: None,
            })
            .unwrap();

        (
            SQLiteBudgetStore::new(connection),
            project_store,
            user.id(),
            project.id,
        )
    }

    fn new_budget(user_id: UserID, project_id: DatabaseID) -> NewBudget {
        NewBudget {
            user_id,
            project_id,
            description: "Design phase".to_owned(),
            amount: Decimal::from_str("1500").unwrap(),
            status: BudgetStatus::Pending,
            date: NaiveDate::parse_from_str("2024-03-05", "%Y-%m-%d").unwrap(),
        }
    }

    #[test]
    fn create_and_get_round_trip() {
        let (mut store, _, user_id, project_id) = get_store_with_project();

        let inserted = store.create(new_budget(user_id, project_id)).unwrap();
        let selected = store.get(inserted.id).unwrap();

        assert_eq!(inserted, selected);
    }

    #[test]
    fn partial_update_preserves_unnamed_fields() {
        let (mut store, _, user_id, project_id) = get_store_with_project();
        let inserted = store.create(new_budget(user_id, project_id)).unwrap();

        let updated = store
            .update(
                inserted.id,
                BudgetUpdate {
                    status: Some(BudgetStatus::Approved),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.status, BudgetStatus::Approved);
        assert_eq!(updated.project_id, inserted.project_id);
        assert_eq!(updated.amount, inserted.amount);
        assert_eq!(updated.description, inserted.description);
    }

    #[test]
    fn deleting_project_leaves_budget_in_place() {
        let (mut store, mut project_store, user_id, project_id) = get_store_with_project();
        let inserted = store.create(new_budget(user_id, project_id)).unwrap();

        project_store.delete(project_id).unwrap();

        assert_eq!(store.get(inserted.id), Ok(inserted));
    }

    #[test]
    fn delete_missing_budget_fails() {
        let (mut store, _, _, _) = get_store_with_project();

        assert_eq!(store.delete(999), Err(Error::NotFound));
    }
}

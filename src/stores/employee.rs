//! Defines the employee store trait and an implementation for the SQLite
//! backend.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use rust_decimal::Decimal;

use crate::{
    Error,
    db::{CreateTable, MapRow, decimal_from_row},
    models::{DatabaseID, Employee, UserID},
};

/// The fields required to create a new employee record.
pub struct NewEmployee {
    pub user_id: UserID,
    pub name: String,
    pub salary: Decimal,
    pub position: Option<String>,
}

/// A partial update to an employee. `None` fields retain their current value.
#[derive(Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub salary: Option<Decimal>,
    pub position: Option<String>,
}

/// Handles the creation and retrieval of employee records.
pub trait EmployeeStore {
    fn create(&mut self, new_employee: NewEmployee) -> Result<Employee, Error>;

    fn get(&self, id: DatabaseID) -> Result<Employee, Error>;

    fn list_by_owner(&self, user_id: UserID) -> Result<Vec<Employee>, Error>;

    fn update(&mut self, id: DatabaseID, update: EmployeeUpdate) -> Result<Employee, Error>;

    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}

/// Stores employee records in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteEmployeeStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteEmployeeStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl EmployeeStore for SQLiteEmployeeStore {
    fn create(&mut self, new_employee: NewEmployee) -> Result<Employee, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        connection.execute(
            "INSERT INTO employee (user_id, name, salary, position)
             VALUES (?1, ?2, ?3, ?4)",
            (
                new_employee.user_id.as_i64(),
                &new_employee.name,
                new_employee.salary.to_string(),
                &new_employee.position,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Employee {
            id,
            user_id: new_employee.user_id,
            name: new_employee.name,
            salary: new_employee.salary,
            position: new_employee.position,
        })
    }

    fn get(&self, id: DatabaseID) -> Result<Employee, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "SELECT id, user_id, name, salary, position
                 FROM employee WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], Self::map_row)
            .map_err(|e| e.into())
    }

    fn list_by_owner(&self, user_id: UserID) -> Result<Vec<Employee>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "SELECT id, user_id, name, salary, position
                 FROM employee WHERE user_id = :user_id",
            )?
            .query_map(&[(":user_id", &user_id.as_i64())], Self::map_row)?
            .map(|maybe_employee| maybe_employee.map_err(Error::SqlError))
            .collect()
    }

    fn update(&mut self, id: DatabaseID, update: EmployeeUpdate) -> Result<Employee, Error> {
        let mut employee = self.get(id)?;

        if let Some(name) = update.name {
            employee.name = name;
        }
        if let Some(salary) = update.salary {
            employee.salary = salary;
        }
        if let Some(position) = update.position {
            employee.position = Some(position);
        }

        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute(
                "UPDATE employee SET name = ?1, salary = ?2, position = ?3 WHERE id = ?4",
                (
                    &employee.name,
                    employee.salary.to_string(),
                    &employee.position,
                    id,
                ),
            )?;

        Ok(employee)
    }

    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute("DELETE FROM employee WHERE id = :id", &[(":id", &id)])?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteEmployeeStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS employee (
                    id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL,
                    name TEXT NOT NULL,
                    salary TEXT NOT NULL,
                    position TEXT,
                    FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteEmployeeStore {
    type ReturnType = Employee;

    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Employee {
            id: row.get(0)?,
            user_id: UserID::new(row.get(1)?),
            name: row.get(2)?,
            salary: decimal_from_row(row, 3)?,
            position: row.get(4)?,
        })
    }
}

//! Defines the project store trait and an implementation for the SQLite
//! backend.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{DatabaseID, Project, UserID},
};

/// The fields required to create a new project.
pub struct NewProject {
    pub user_id: UserID,
    pub name: String,
    pub description: String,
    pub client: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// A partial update to a project. `None` fields retain their current value.
#[derive(Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub client: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Handles the creation and retrieval of projects.
pub trait ProjectStore {
    fn create(&mut self, new_project: NewProject) -> Result<Project, Error>;

    fn get(&self, id: DatabaseID) -> Result<Project, Error>;

    fn list_by_owner(&self, user_id: UserID) -> Result<Vec<Project>, Error>;

    fn update(&mut self, id: DatabaseID, update: ProjectUpdate) -> Result<Project, Error>;

    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}

/// Stores projects in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteProjectStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteProjectStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl ProjectStore for SQLiteProjectStore {
    fn create(&mut self, new_project: NewProject) -> Result<Project, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        connection.execute(
            "INSERT INTO project (user_id, name, description, client, start_date, end_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                new_project.user_id.as_i64(),
                &new_project.name,
                &new_project.description,
                &new_project.client,
                new_project.start_date,
                new_project.end_date,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Project {
            id,
            user_id: new_project.user_id,
            name: new_project.name,
            description: new_project.description,
            client: new_project.client,
            start_date: new_project.start_date,
            end_date: new_project.end_date,
        })
    }

    fn get(&self, id: DatabaseID) -> Result<Project, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "SELECT id, user_id, name, description, client, start_date, end_date
                 FROM project WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], Self::map_row)
            .map_err(|e| e.into())
    }

    fn list_by_owner(&self, user_id: UserID) -> Result<Vec<Project>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "SELECT id, user_id, name, description, client, start_date, end_date
                 FROM project WHERE user_id = :user_id",
            )?
            .query_map(&[(":user_id", &user_id.as_i64())], Self::map_row)?
            .map(|maybe_project| maybe_project.map_err(Error::SqlError))
            .collect()
    }

    fn update(&mut self, id: DatabaseID, update: ProjectUpdate) -> Result<Project, Error> {
        let mut project = self.get(id)?;

        if let Some(name) = update.name {
            project.name = name;
        }
        if let Some(description) = update.description {
            project.description = description;
        }
        if let Some(client) = update.client {
            project.client = client;
        }
        if let Some(start_date) = update.start_date {
            project.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            project.end_date = Some(end_date);
        }

        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute(
                "UPDATE project
                 SET name = ?1, description = ?2, client = ?3, start_date = ?4, end_date = ?5
                 WHERE id = ?6",
                (
                    &project.name,
                    &project.description,
                    &project.client,
                    project.start_date,
                    project.end_date,
                    id,
                ),
            )?;

        Ok(project)
    }

    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute("DELETE FROM project WHERE id = :id", &[(":id", &id)])?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteProjectStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS project (
                    id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL,
                    name TEXT NOT NULL,
                    description TEXT NOT NULL,
                    client TEXT NOT NULL,
                    start_date TEXT NOT NULL,
                    end_date TEXT,
                    FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteProjectStore {
    type ReturnType = Project;

    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Project {
            id: row.get(0)?,
            user_id: UserID::new(row.get(1)?),
            name: row.get(2)?,
            description: row.get(3)?,
            client: row.get(4)?,
            start_date: row.get(5)?,
            end_date: row.get(6)?,
        })
    }
}

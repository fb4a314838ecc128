//! Defines the state of the application which is shared across request
//! handlers.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    Error,
    auth::JwtKeys,
    db::initialize,
    report::ChartRenderer,
    stores::{
        SQLiteBudgetStore, SQLiteEmployeeStore, SQLitePaymentStore, SQLiteProjectStore,
        SQLiteTransactionStore, SQLiteUserStore,
    },
};

/// The state of the application, shared between routes.
#[derive(Clone)]
pub struct AppState<C>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    pub user_store: SQLiteUserStore,
    pub transaction_store: SQLiteTransactionStore,
    pub payment_store: SQLitePaymentStore,
    pub project_store: SQLiteProjectStore,
    pub budget_store: SQLiteBudgetStore,
    pub employee_store: SQLiteEmployeeStore,
    pub jwt_keys: JwtKeys,
    pub chart_renderer: C,
}

/// Create the tables for the application database and the state object the
/// routes share.
pub fn create_app_state<C>(
    db_connection: Connection,
    jwt_secret: &str,
    chart_renderer: C,
) -> Result<AppState<C>, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState {
        user_store: SQLiteUserStore::new(connection.clone()),
        transaction_store: SQLiteTransactionStore::new(connection.clone()),
        payment_store: SQLitePaymentStore::new(connection.clone()),
        project_store: SQLiteProjectStore::new(connection.clone()),
        budget_store: SQLiteBudgetStore::new(connection.clone()),
        employee_store: SQLiteEmployeeStore::new(connection),
        jwt_keys: JwtKeys::new(jwt_secret.as_bytes()),
        chart_renderer,
    })
}

impl<C> FromRef<AppState<C>> for JwtKeys
where
    C: ChartRenderer + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<C>) -> Self {
        state.jwt_keys.clone()
    }
}

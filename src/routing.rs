//! Application router configuration.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::{
    auth::log_in,
    endpoints,
    report::ChartRenderer,
    routes::{
        budget::{create_budget, delete_budget, get_budgets, update_budget},
        chart::get_chart,
        employee::{create_employee, delete_employee, get_employees, update_employee},
        payment::{create_payment, delete_payment, get_payments, update_payment},
        project::{create_project, delete_project, get_projects, update_project},
        transaction::{
            create_transaction, delete_transaction, get_transactions, update_transaction,
        },
        user::{create_user, delete_user, get_user, update_user},
    },
    state::AppState,
};

/// Return a router with all the app's routes.
///
/// Registration and sign-in are open; every other route requires a bearer
/// token.
pub fn build_router<C>(state: AppState<C>) -> Router
where
    C: ChartRenderer + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::REGISTER, post(create_user))
        .route(endpoints::LOG_IN, post(log_in))
        .route(
            endpoints::USER,
            get(get_user).put(update_user).delete(delete_user),
        )
        .route(
            endpoints::TRANSACTIONS,
            post(create_transaction).get(get_transactions),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction).delete(delete_transaction),
        )
        .route(endpoints::PAYMENTS, post(create_payment).get(get_payments))
        .route(
            endpoints::PAYMENT,
            put(update_payment).delete(delete_payment),
        )
        .route(endpoints::PROJECTS, post(create_project).get(get_projects))
        .route(
            endpoints::PROJECT,
            put(update_project).delete(delete_project),
        )
        .route(endpoints::BUDGETS, post(create_budget).get(get_budgets))
        .route(endpoints::BUDGET, put(update_budget).delete(delete_budget))
        .route(
            endpoints::EMPLOYEES,
            post(create_employee).get(get_employees),
        )
        .route(
            endpoints::EMPLOYEE,
            put(update_employee).delete(delete_employee),
        )
        .route(endpoints::CHART, get(get_chart))
        .with_state(state)
}

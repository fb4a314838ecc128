//! Endpoints for creating and managing employee records.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::{
    Error,
    auth::Claims,
    models::DatabaseID,
    report::ChartRenderer,
    routes::{mask_not_found, require, require_positive, require_text},
    state::AppState,
    stores::{EmployeeStore, EmployeeUpdate, NewEmployee},
};

#[derive(Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: Option<String>,
    pub salary: Option<Decimal>,
    pub position: Option<String>,
}

/// Handler for creating an employee record owned by the authenticated user.
pub async fn create_employee<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let name = require_text(request.name, "name")?;
    let salary = require_positive(require(request.salary, "salary")?, "salary")?;

    let employee = state.employee_store.create(NewEmployee {
        user_id: claims.user_id(),
        name,
        salary,
        position: request.position,
    })?;

    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handler for listing the authenticated user's employees.
pub async fn get_employees<C>(
    State(state): State<AppState<C>>,
    claims: Claims,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let employees = state.employee_store.list_by_owner(claims.user_id())?;

    Ok(Json(employees))
}

#[derive(Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub salary: Option<Decimal>,
    pub position: Option<String>,
}

/// Handler for updating an employee record. Fields left out of the request
/// keep their current value.
pub async fn update_employee<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let employee = state.employee_store.get(id).map_err(mask_not_found)?;
    if employee.user_id != claims.user_id() {
        return Err(Error::Forbidden);
    }

    let salary = match request.salary {
        Some(salary) => Some(require_positive(salary, "salary")?),
        None => None,
    };

    let employee = state.employee_store.update(
        id,
        EmployeeUpdate {
            name: request.name,
            salary,
            position: request.position,
        },
    )?;

    Ok(Json(employee))
}

/// Handler for deleting an employee record.
pub async fn delete_employee<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let employee = state.employee_store.get(id).map_err(mask_not_found)?;
    if employee.user_id != claims.user_id() {
        return Err(Error::Forbidden);
    }

    state.employee_store.delete(id)?;

    Ok(Json(json!({ "message": format!("employee {id} deleted") })))
}

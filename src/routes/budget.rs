//! Endpoints for creating and managing budgets.
//!
//! A budget must reference a project owned by the same user at creation time.
//! The reference is not re-checked afterwards, so a budget can outlive its
//! project.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::{
    Error,
    auth::Claims,
    models::{BudgetStatus, DatabaseID, parse_date},
    report::ChartRenderer,
    routes::{mask_not_found, require, require_positive, require_text},
    state::AppState,
    stores::{BudgetStore, BudgetUpdate, NewBudget, ProjectStore},
};

#[derive(Deserialize)]
pub struct CreateBudgetRequest {
    pub project_id: Option<DatabaseID>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub status: Option<BudgetStatus>,
    pub date: Option<String>,
}

/// Handler for creating a budget against one of the authenticated user's
/// projects.
///
/// A project id that does not exist or belongs to another user is rejected
/// with the same error.
pub async fn create_budget<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Json(request): Json<CreateBudgetRequest>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let project_id = require(request.project_id, "project_id")?;
    let description = require_text(request.description, "description")?;
    let amount = require_positive(require(request.amount, "amount")?, "amount")?;
    let status = require(request.status, "status")?;
    let date = match request.date {
        Some(text) => parse_date(&text)?,
        None => Utc::now().date_naive(),
    };

    let project = state.project_store.get(project_id).map_err(|e| match e {
        Error::NotFound => Error::InvalidReference,
        error => error,
    })?;
    if project.user_id != claims.user_id() {
        return Err(Error::InvalidReference);
    }

    let budget = state.budget_store.create(NewBudget {
        user_id: claims.user_id(),
        project_id,
        description,
        amount,
        status,
        date,
    })?;

    Ok((StatusCode::CREATED, Json(budget)))
}

/// Handler for listing the authenticated user's budgets.
pub async fn get_budgets<C>(
    State(state): State<AppState<C>>,
    claims: Claims,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let budgets = state.budget_store.list_by_owner(claims.user_id())?;

    Ok(Json(budgets))
}

#[derive(Deserialize)]
pub struct UpdateBudgetRequest {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub status: Option<BudgetStatus>,
    pub date: Option<String>,
}

/// Handler for updating a budget. Fields left out of the request keep their
/// current value. The project a budget belongs to cannot be changed.
pub async fn update_budget<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
    Json(request): Json<UpdateBudgetRequest>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let budget = state.budget_store.get(id).map_err(mask_not_found)?;
    if budget.user_id != claims.user_id() {
        return Err(Error::Forbidden);
    }

    let amount = match request.amount {
        Some(amount) => Some(require_positive(amount, "amount")?),
        None => None,
    };
    let date = match request.date {
        Some(text) => Some(parse_date(&text)?),
        None => None,
    };

    let budget = state.budget_store.update(
        id,
        BudgetUpdate {
            description: request.description,
            amount,
            status: request.status,
            date,
        },
    )?;

    Ok(Json(budget))
}

/// Handler for deleting a budget.
pub async fn delete_budget<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let budget = state.budget_store.get(id).map_err(mask_not_found)?;
    if budget.user_id != claims.user_id() {
        return Err(Error::Forbidden);
    }

    state.budget_store.delete(id)?;

    Ok(Json(json!({ "message": format!("budget {id} deleted") })))
}

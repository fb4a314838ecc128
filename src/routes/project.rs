//! Endpoints for creating and managing projects.
//!
//! Deleting a project does not touch the budgets that reference it.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::{
    Error,
    auth::Claims,
    models::{DatabaseID, parse_date},
    report::ChartRenderer,
    routes::{mask_not_found, require_text},
    state::AppState,
    stores::{NewProject, ProjectStore, ProjectUpdate},
};

#[derive(Deserialize)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub client: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Handler for creating a project owned by the authenticated user.
///
/// The start date defaults to today; the end date stays open until set.
pub async fn create_project<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Json(request): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let name = require_text(request.name, "name")?;
    let description = require_text(request.description, "description")?;
    let client = require_text(request.client, "client")?;
    let start_date = match request.start_date {
        Some(text) => parse_date(&text)?,
        None => Utc::now().date_naive(),
    };
    let end_date = match request.end_date {
        Some(text) => Some(parse_date(&text)?),
        None => None,
    };
    if end_date.is_some_and(|end| end < start_date) {
        return Err(Error::InvalidDateRange);
    }

    let project = state.project_store.create(NewProject {
        user_id: claims.user_id(),
        name,
        description,
        client,
        start_date,
        end_date,
    })?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Handler for listing the authenticated user's projects.
pub async fn get_projects<C>(
    State(state): State<AppState<C>>,
    claims: Claims,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let projects = state.project_store.list_by_owner(claims.user_id())?;

    Ok(Json(projects))
}

#[derive(Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub client: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Handler for updating a project. Fields left out of the request keep their
/// current value.
pub async fn update_project<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let project = state.project_store.get(id).map_err(mask_not_found)?;
    if project.user_id != claims.user_id() {
        return Err(Error::Forbidden);
    }

    let start_date = match request.start_date {
        Some(text) => Some(parse_date(&text)?),
        None => None,
    };
    let end_date = match request.end_date {
        Some(text) => Some(parse_date(&text)?),
        None => None,
    };

    let effective_start = start_date.unwrap_or(project.start_date);
    let effective_end = end_date.or(project.end_date);
    if effective_end.is_some_and(|end| end < effective_start) {
        return Err(Error::InvalidDateRange);
    }

    let project = state.project_store.update(
        id,
        ProjectUpdate {
            name: request.name,
            description: request.description,
            client: request.client,
            start_date,
            end_date,
        },
    )?;

    Ok(Json(project))
}

/// Handler for deleting a project.
pub async fn delete_project<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let project = state.project_store.get(id).map_err(mask_not_found)?;
    if project.user_id != claims.user_id() {
        return Err(Error::Forbidden);
    }

    state.project_store.delete(id)?;

    Ok(Json(json!({ "message": format!("project {id} deleted") })))
}

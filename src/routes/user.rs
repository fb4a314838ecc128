//! Endpoints for registering a user and managing their profile.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use email_address::EmailAddress;
use serde::Deserialize;
use serde_json::json;

use crate::{
    Error,
    auth::Claims,
    models::{PasswordHash, UserID},
    report::ChartRenderer,
    routes::require_text,
    state::AppState,
    stores::{NewUser, UserStore, UserUpdate},
};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub company: Option<String>,
    pub industry: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Handler for registering a new user account.
///
/// Responds with the new user's profile, never the password hash.
pub async fn create_user<C>(
    State(mut state): State<AppState<C>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let name = require_text(request.name, "name")?;
    let company = require_text(request.company, "company")?;
    let email = require_text(request.email, "email")?;
    let password = require_text(request.password, "password")?;

    let email = EmailAddress::from_str(&email).map_err(|_| Error::InvalidEmail)?;
    let password_hash = PasswordHash::new(&password, PasswordHash::DEFAULT_COST)?;

    let user = state.user_store.create(NewUser {
        name,
        company,
        industry: request.industry,
        email,
        password_hash,
    })?;

    Ok((StatusCode::CREATED, Json(user.profile())))
}

/// Handler for fetching a user's profile.
///
/// Any authenticated user may look up a profile by id; a missing user is a
/// plain 404 since the profile carries no financial records.
pub async fn get_user<C>(
    State(state): State<AppState<C>>,
    _claims: Claims,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let user = state.user_store.get(UserID::new(id))?;

    Ok(Json(user.profile()))
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub company: Option<String>,
    pub industry: Option<String>,
    pub password: Option<String>,
}

/// Handler for updating a user's profile. Fields left out of the request keep
/// their current value. The email address cannot be changed.
pub async fn update_user<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    if claims.user_id() != UserID::new(id) {
        return Err(Error::Forbidden);
    }

    let password_hash = match request.password {
        Some(password) => Some(PasswordHash::new(&password, PasswordHash::DEFAULT_COST)?),
        None => None,
    };

    let user = state.user_store.update(
        UserID::new(id),
        UserUpdate {
            name: request.name,
            company: request.company,
            industry: request.industry,
            password_hash,
        },
    )?;

    Ok(Json(user.profile()))
}

/// Handler for deleting a user account and all records they own.
pub async fn delete_user<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    if claims.user_id() != UserID::new(id) {
        return Err(Error::Forbidden);
    }

    state.user_store.delete(UserID::new(id))?;

    Ok(Json(json!({ "message": format!("user {id} deleted") })))
}

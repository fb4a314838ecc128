//! Endpoints for creating and managing payments.

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
    models::{DatabaseID, PaymentStatus, parse_date},
    report::ChartRenderer,
    routes::{mask_not_found, require, require_positive, require_text},
    state::AppState,
    stores::{NewPayment, PaymentStore, PaymentUpdate},
};

#[derive(Deserialize)]
pub struct CreatePaymentRequest {
    pub amount: Option<Decimal>,
    pub recipient: Option<String>,
    pub status: Option<PaymentStatus>,
    pub date: Option<String>,
}

/// Handler for creating a payment owned by the authenticated user.
///
/// The status defaults to pending and the date to today.
pub async fn create_payment<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let amount = require_positive(require(request.amount, "amount")?, "amount")?;
    let recipient = require_text(request.recipient, "recipient")?;
    let date = match request.date {
        Some(text) => parse_date(&text)?,
        None => Utc::now().date_naive(),
    };

    let payment = state.payment_store.create(NewPayment {
        user_id: claims.user_id(),
        amount,
        recipient,
        status: request.status.unwrap_or(PaymentStatus::Pending),
        date,
    })?;

    Ok((StatusCode::CREATED, Json(payment)))
}

/// Handler for listing the authenticated user's payments.
pub async fn get_payments<C>(
    State(state): State<AppState<C>>,
    claims: Claims,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let payments = state.payment_store.list_by_owner(claims.user_id())?;

    Ok(Json(payments))
}

#[derive(Deserialize)]
pub struct UpdatePaymentRequest {
    pub amount: Option<Decimal>,
    pub recipient: Option<String>,
    pub status: Option<PaymentStatus>,
    pub date: Option<String>,
}

/// Handler for updating a payment. Fields left out of the request keep their
/// current value.
pub async fn update_payment<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
    Json(request): Json<UpdatePaymentRequest>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let payment = state.payment_store.get(id).map_err(mask_not_found)?;
    if payment.user_id != claims.user_id() {
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

    let payment = state.payment_store.update(
        id,
        PaymentUpdate {
            amount,
            recipient: request.recipient,
            status: request.status,
            date,
        },
    )?;

    Ok(Json(payment))
}

/// Handler for deleting a payment.
pub async fn delete_payment<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let payment = state.payment_store.get(id).map_err(mask_not_found)?;
    if payment.user_id != claims.user_id() {
        return Err(Error::Forbidden);
    }

    state.payment_store.delete(id)?;

    Ok(Json(json!({ "message": format!("payment {id} deleted") })))
}

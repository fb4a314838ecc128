//! Endpoints for creating and managing transactions.

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
    models::{DatabaseID, TransactionStatus, TransactionType, parse_date},
    report::ChartRenderer,
    routes::{mask_not_found, require, require_positive},
    state::AppState,
    stores::{NewTransaction, TransactionStore, TransactionUpdate},
};

#[derive(Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    pub company: Option<String>,
    pub date: Option<String>,
}

/// Handler for creating a transaction owned by the authenticated user.
///
/// The date defaults to today when the request omits it.
pub async fn create_transaction<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let amount = require_positive(require(request.amount, "amount")?, "amount")?;
    let transaction_type = require(request.transaction_type, "transaction_type")?;
    let status = require(request.status, "status")?;
    let date = match request.date {
        Some(text) => parse_date(&text)?,
        None => Utc::now().date_naive(),
    };

    let transaction = state.transaction_store.create(NewTransaction {
        user_id: claims.user_id(),
        amount,
        description: request.description,
        transaction_type,
        status,
        company: request.company,
        date,
    })?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Handler for listing the authenticated user's transactions.
pub async fn get_transactions<C>(
    State(state): State<AppState<C>>,
    claims: Claims,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let transactions = state.transaction_store.list_by_owner(claims.user_id())?;

    Ok(Json(transactions))
}

#[derive(Deserialize)]
pub struct UpdateTransactionRequest {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    pub company: Option<String>,
    pub date: Option<String>,
}

/// Handler for updating a transaction. Fields left out of the request keep
/// their current value.
pub async fn update_transaction<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
    Json(request): Json<UpdateTransactionRequest>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let transaction = state.transaction_store.get(id).map_err(mask_not_found)?;
    if transaction.user_id != claims.user_id() {
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

    let transaction = state.transaction_store.update(
        id,
        TransactionUpdate {
            amount,
            description: request.description,
            transaction_type: request.transaction_type,
            status: request.status,
            company: request.company,
            date,
        },
    )?;

    Ok(Json(transaction))
}

/// Handler for deleting a transaction.
pub async fn delete_transaction<C>(
    State(mut state): State<AppState<C>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let transaction = state.transaction_store.get(id).map_err(mask_not_found)?;
    if transaction.user_id != claims.user_id() {
        return Err(Error::Forbidden);
    }

    state.transaction_store.delete(id)?;

    Ok(Json(json!({ "message": format!("transaction {id} deleted") })))
}

#[cfg(test)]
mod transaction_route_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::test_utils::{new_test_server, register_and_log_in};

    #[tokio::test]
    async fn create_and_list_transactions() {
        let server = new_test_server();
        let (token, user_id) = register_and_log_in(&server, "jane@acme.test").await;

        let response = server
            .post("/api/transactions")
            .authorization_bearer(&token)
            .json(&json!({
                "amount": "120.50",
                "transaction_type": "income",
                "status": "completed",
                "date": "2024-01-15",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created = response.json::<Value>();
        assert_eq!(created["user_id"], user_id);
        assert_eq!(created["amount"], "120.50");

        let response = server
            .get("/api/transactions")
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();
        let listed = response.json::<Vec<Value>>();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], created["id"]);
    }

    #[tokio::test]
    async fn list_only_shows_own_transactions() {
        let server = new_test_server();
        let (other_token, _) = register_and_log_in(&server, "other@acme.test").await;
        server
            .post("/api/transactions")
            .authorization_bearer(&other_token)
            .json(&json!({
                "amount": "10",
                "transaction_type": "expense",
                "status": "pending",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let (token, _) = register_and_log_in(&server, "jane@acme.test").await;
        let response = server
            .get("/api/transactions")
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        assert!(response.json::<Vec<Value>>().is_empty());
    }

    #[tokio::test]
    async fn create_fails_without_token() {
        let server = new_test_server();

        server
            .post("/api/transactions")
            .json(&json!({
                "amount": "10",
                "transaction_type": "income",
                "status": "pending",
            }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_fails_with_malformed_date() {
        let server = new_test_server();
        let (token, _) = register_and_log_in(&server, "jane@acme.test").await;

        server
            .post("/api/transactions")
            .authorization_bearer(&token)
            .json(&json!({
                "amount": "10",
                "transaction_type": "income",
                "status": "pending",
                "date": "15/01/2024",
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_rejects_non_positive_amount() {
        let server = new_test_server();
        let (token, _) = register_and_log_in(&server, "jane@acme.test").await;

        for amount in ["-5", "0"] {
            server
                .post("/api/transactions")
                .authorization_bearer(&token)
                .json(&json!({
                    "amount": amount,
                    "transaction_type": "income",
                    "status": "pending",
                }))
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn update_rejects_non_positive_amount() {
        let server = new_test_server();
        let (token, _) = register_and_log_in(&server, "jane@acme.test").await;

        let created = server
            .post("/api/transactions")
            .authorization_bearer(&token)
            .json(&json!({
                "amount": "100",
                "transaction_type": "income",
                "status": "pending",
            }))
            .await
            .json::<Value>();
        let id = created["id"].as_i64().unwrap();

        server
            .put(&format!("/api/transactions/{id}"))
            .authorization_bearer(&token)
            .json(&json!({ "amount": "-1" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_with_malformed_date_leaves_record_unchanged() {
        let server = new_test_server();
        let (token, _) = register_and_log_in(&server, "jane@acme.test").await;

        let created = server
            .post("/api/transactions")
            .authorization_bearer(&token)
            .json(&json!({
                "amount": "100",
                "transaction_type": "income",
                "status": "pending",
                "date": "2024-01-15",
            }))
            .await
            .json::<Value>();
        let id = created["id"].as_i64().unwrap();

        server
            .put(&format!("/api/transactions/{id}"))
            .authorization_bearer(&token)
            .json(&json!({
                "status": "completed",
                "date": "2024-13-40",
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let listed = server
            .get("/api/transactions")
            .authorization_bearer(&token)
            .await
            .json::<Vec<Value>>();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["status"], "pending");
        assert_eq!(listed[0]["date"], "2024-01-15");
    }

    #[tokio::test]
    async fn update_preserves_unnamed_fields() {
        let server = new_test_server();
        let (token, _) = register_and_log_in(&server, "jane@acme.test").await;

        let created = server
            .post("/api/transactions")
            .authorization_bearer(&token)
            .json(&json!({
                "amount": "100",
                "description": "invoice",
                "transaction_type": "income",
                "status": "pending",
                "date": "2024-01-15",
            }))
            .await
            .json::<Value>();
        let id = created["id"].as_i64().unwrap();

        let response = server
            .put(&format!("/api/transactions/{id}"))
            .authorization_bearer(&token)
            .json(&json!({ "status": "completed" }))
            .await;

        response.assert_status_ok();
        let updated = response.json::<Value>();
        assert_eq!(updated["status"], "completed");
        assert_eq!(updated["amount"], "100");
        assert_eq!(updated["description"], "invoice");
        assert_eq!(updated["date"], "2024-01-15");
    }

    #[tokio::test]
    async fn missing_and_foreign_records_get_the_same_response() {
        let server = new_test_server();
        let (other_token, _) = register_and_log_in(&server, "other@acme.test").await;
        let created = server
            .post("/api/transactions")
            .authorization_bearer(&other_token)
            .json(&json!({
                "amount": "10",
                "transaction_type": "income",
                "status": "pending",
            }))
            .await
            .json::<Value>();
        let foreign_id = created["id"].as_i64().unwrap();

        let (token, _) = register_and_log_in(&server, "jane@acme.test").await;

        let foreign = server
            .delete(&format!("/api/transactions/{foreign_id}"))
            .authorization_bearer(&token)
            .await;
        let missing = server
            .delete("/api/transactions/9999")
            .authorization_bearer(&token)
            .await;

        foreign.assert_status(StatusCode::FORBIDDEN);
        missing.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(
            foreign.json::<Value>()["message"],
            missing.json::<Value>()["message"]
        );
    }

    #[tokio::test]
    async fn delete_removes_transaction() {
        let server = new_test_server();
        let (token, _) = register_and_log_in(&server, "jane@acme.test").await;

        let created = server
            .post("/api/transactions")
            .authorization_bearer(&token)
            .json(&json!({
                "amount": "10",
                "transaction_type": "income",
                "status": "pending",
            }))
            .await
            .json::<Value>();
        let id = created["id"].as_i64().unwrap();

        server
            .delete(&format!("/api/transactions/{id}"))
            .authorization_bearer(&token)
            .await
            .assert_status_ok();

        let response = server
            .get("/api/transactions")
            .authorization_bearer(&token)
            .await;
        assert!(response.json::<Vec<Value>>().is_empty());
    }
}

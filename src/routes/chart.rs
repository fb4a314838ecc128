//! The endpoint that renders a user's monthly income and expense chart.

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    Error,
    auth::Claims,
    models::parse_date,
    report::{ChartDocument, ChartRenderer, monthly_summary},
    state::AppState,
    stores::TransactionStore,
};

#[derive(Deserialize)]
pub struct ChartQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Handler for the monthly chart report.
///
/// Aggregates the authenticated user's transactions, optionally limited to an
/// inclusive date range, and responds with the URL of the rendered chart.
pub async fn get_chart<C>(
    State(state): State<AppState<C>>,
    claims: Claims,
    Query(query): Query<ChartQuery>,
) -> Result<impl IntoResponse, Error>
where
    C: ChartRenderer + Clone + Send + Sync,
{
    let range = match (query.start_date, query.end_date) {
        (Some(start), Some(end)) => Some((parse_date(&start)?, parse_date(&end)?)),
        (None, None) => None,
        _ => return Err(Error::MissingField("start_date and end_date")),
    };

    let transactions = state.transaction_store.list_by_owner(claims.user_id())?;
    let summary = monthly_summary(transactions, range)?;

    let url = state
        .chart_renderer
        .render(ChartDocument::from(&summary))
        .await?;

    Ok(Json(json!({ "url": url })))
}

#[cfg(test)]
mod chart_route_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::test_utils::{
        FailingChartRenderer, STUB_CHART_URL, new_test_server, new_test_server_with_renderer,
        register_and_log_in,
    };

    async fn add_transaction(
        server: &TestServer,
        token: &str,
        amount: &str,
        transaction_type: &str,
        date: &str,
    ) {
        server
            .post("/api/transactions")
            .authorization_bearer(token)
            .json(&json!({
                "amount": amount,
                "transaction_type": transaction_type,
                "status": "completed",
                "date": date,
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn chart_returns_renderer_url() {
        let server = new_test_server();
        let (token, _) = register_and_log_in(&server, "jane@acme.test").await;
        add_transaction(&server, &token, "100", "income", "2024-01-15").await;
        add_transaction(&server, &token, "30", "expense", "2024-01-20").await;
        add_transaction(&server, &token, "50", "income", "2024-02-10").await;

        let response = server.get("/api/chart").authorization_bearer(&token).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["url"], STUB_CHART_URL);
    }

    #[tokio::test]
    async fn chart_with_no_transactions_is_not_found() {
        let server = new_test_server();
        let (token, _) = register_and_log_in(&server, "jane@acme.test").await;

        server
            .get("/api/chart")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn chart_range_excluding_all_transactions_is_not_found() {
        let server = new_test_server();
        let (token, _) = register_and_log_in(&server, "jane@acme.test").await;
        add_transaction(&server, &token, "100", "income", "2024-06-15").await;

        server
            .get("/api/chart")
            .add_query_param("start_date", "2024-01-01")
            .add_query_param("end_date", "2024-01-31")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn chart_rejects_malformed_range() {
        let server = new_test_server();
        let (token, _) = register_and_log_in(&server, "jane@acme.test").await;
        add_transaction(&server, &token, "100", "income", "2024-01-15").await;

        server
            .get("/api/chart")
            .add_query_param("start_date", "January 1st")
            .add_query_param("end_date", "2024-01-31")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chart_rejects_half_open_range() {
        let server = new_test_server();
        let (token, _) = register_and_log_in(&server, "jane@acme.test").await;
        add_transaction(&server, &token, "100", "income", "2024-01-15").await;

        server
            .get("/api/chart")
            .add_query_param("start_date", "2024-01-01")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chart_requires_authentication() {
        let server = new_test_server();

        server
            .get("/api/chart")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn chart_service_failure_is_bad_gateway() {
        let server = new_test_server_with_renderer(FailingChartRenderer);
        let (token, _) = register_and_log_in(&server, "jane@acme.test").await;
        add_transaction(&server, &token, "100", "income", "2024-01-15").await;

        server
            .get("/api/chart")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::BAD_GATEWAY);
    }
}

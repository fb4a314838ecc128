//! Helpers shared by the route test suites.

use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::json;

use crate::{
    Error, build_router, create_app_state,
    report::{ChartDocument, ChartRenderer},
};

/// A renderer that returns a fixed URL without touching the network.
#[derive(Clone)]
pub(crate) struct StubChartRenderer;

pub(crate) const STUB_CHART_URL: &str = "https://charts.test/stub";

impl ChartRenderer for StubChartRenderer {
    fn render(
        &self,
        _document: ChartDocument,
    ) -> impl Future<Output = Result<String, Error>> + Send {
        async { Ok(STUB_CHART_URL.to_owned()) }
    }
}

/// A renderer that always fails, for exercising the chart service error path.
#[derive(Clone)]
pub(crate) struct FailingChartRenderer;

impl ChartRenderer for FailingChartRenderer {
    fn render(
        &self,
        _document: ChartDocument,
    ) -> impl Future<Output = Result<String, Error>> + Send {
        async { Err(Error::ChartService("connection refused".to_owned())) }
    }
}

/// Create a test server backed by a fresh in-memory database.
pub(crate) fn new_test_server() -> TestServer {
    new_test_server_with_renderer(StubChartRenderer)
}

/// Create a test server with a custom chart renderer.
pub(crate) fn new_test_server_with_renderer<C>(renderer: C) -> TestServer
where
    C: ChartRenderer + Clone + Send + Sync + 'static,
{
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");
    let state = create_app_state(connection, "test-secret", renderer)
        .expect("Could not initialize database.");

    TestServer::new(build_router(state))
}

/// Register a user and log them in, returning the bearer token and user id.
pub(crate) async fn register_and_log_in(server: &TestServer, email: &str) -> (String, i64) {
    server
        .post("/api/register")
        .json(&json!({
            "name": "Jane",
            "company": "Acme",
            "email": email,
            "password": "averysafepassword",
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .post("/api/login")
        .json(&json!({
            "email": email,
            "password": "averysafepassword",
        }))
        .await;
    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    let token = body["token"].as_str().expect("no token in response").to_owned();
    let user_id = body["user_id"].as_i64().expect("no user_id in response");

    (token, user_id)
}

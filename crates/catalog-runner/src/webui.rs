//! Minimal web UI for triggering runs and reading the report.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::suite::Suite;

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Catalog BDD</title></head>
<body>
<h1>Catalog BDD</h1>
<button onclick="run()">Run tests</button>
<a href="/report">Report</a>
<pre id="out"></pre>
<script>
async function run() {
  const out = document.getElementById("out");
  out.textContent = "Running...";
  const res = await fetch("/api/run-tests", { method: "POST" });
  out.textContent = JSON.stringify(await res.json(), null, 2);
}
</script>
</body>
</html>
"#;

/// Shared state for the web UI handlers
#[derive(Clone)]
pub struct WebUiState {
    suite: Arc<Suite>,
    features: PathBuf,
    report_path: Option<PathBuf>,
    run_lock: Arc<Mutex<()>>,
}

impl WebUiState {
    /// `report_path` is `None` when file reporting is disabled.
    pub fn new(suite: Arc<Suite>, features: PathBuf, report_path: Option<PathBuf>) -> Self {
        Self {
            suite,
            features,
            report_path,
            run_lock: Arc::new(Mutex::new(())),
        }
    }
}

pub fn build_router(state: WebUiState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/run-tests", post(run_tests))
        .route("/report", get(report))
        .with_state(state)
}

/// Serves the web UI on `addr` until ctrl-c.
pub async fn serve(addr: SocketAddr, state: WebUiState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Web UI listening on {}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("Shutting down web UI");
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Runs the suite; concurrent requests wait for the run in progress.
async fn run_tests(State(state): State<WebUiState>) -> Response {
    let _guard = state.run_lock.lock().await;
    info!("Test run requested");

    match state.suite.run(&state.features).await {
        Ok(summary) if summary.is_success() => (
            StatusCode::OK,
            Json(json!({ "message": "All tests passed", "summary": summary })),
        )
            .into_response(),
        Ok(summary) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Some tests failed", "summary": summary })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Test run could not start");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": format!("Test run failed: {}", e), "summary": null })),
            )
                .into_response()
        }
    }
}

async fn report(State(state): State<WebUiState>) -> Response {
    let Some(path) = state.report_path.as_ref() else {
        return (StatusCode::NOT_FOUND, "Reporting is disabled").into_response();
    };

    match tokio::fs::read_to_string(path).await {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            text,
        )
            .into_response(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Report not readable");
            (StatusCode::NOT_FOUND, "Report not found").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Services;
    use catalog_test_utils::implementations::InMemoryProductStore;
    use catalog_test_utils::{ApiClient, Settings};
    use serde_json::Value;
    use std::fs;

    const OFFLINE_FEATURE: &str = r#"Feature: Test data

  Scenario: Codes follow the test code
    Given the test code is "110-010-001"
    And a product built from the defaults
    Then the built product code should be "PRD-5001"
"#;

    async fn start(features: &str) -> (String, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let features_dir = dir.path().join("features");
        fs::create_dir_all(&features_dir).unwrap();
        fs::write(features_dir.join("data.feature"), features).unwrap();
        let report_path = dir.path().join("report.txt");

        let mut settings = Settings::default();
        settings.report.path = report_path.display().to_string();
        settings.report.echo_stdout = false;

        let services = Services::with_client(
            settings,
            ApiClient::from_client(reqwest::Client::new()),
            Arc::new(InMemoryProductStore::new()),
        );
        let suite = Arc::new(Suite::new(Arc::new(services)).unwrap());
        let state = WebUiState::new(suite, features_dir, Some(report_path));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });

        (format!("http://{}", addr), dir)
    }

    #[tokio::test]
    async fn index_page_is_served() {
        let (base, _dir) = start(OFFLINE_FEATURE).await;
        let res = reqwest::get(format!("{}/", base)).await.unwrap();
        assert_eq!(res.status(), 200);
        assert!(res.text().await.unwrap().contains("/api/run-tests"));
    }

    #[tokio::test]
    async fn report_is_missing_before_the_first_run() {
        let (base, _dir) = start(OFFLINE_FEATURE).await;
        let res = reqwest::get(format!("{}/report", base)).await.unwrap();
        assert_eq!(res.status(), 404);
    }

    #[tokio::test]
    async fn passing_run_returns_summary_and_report() {
        let (base, _dir) = start(OFFLINE_FEATURE).await;
        let client = reqwest::Client::new();

        let res = client
            .post(format!("{}/api/run-tests", base))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["message"], "All tests passed");
        assert_eq!(body["summary"]["scenarios"]["passed"], 1);
        assert_eq!(body["summary"]["steps"]["total"], 3);

        let res = client.get(format!("{}/report", base)).send().await.unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(res.headers()["content-type"], "text/plain; charset=utf-8");
        let text = res.text().await.unwrap();
        assert!(text.contains("--- FINAL REPORT ---"));
    }

    #[tokio::test]
    async fn failing_run_returns_500() {
        let feature = OFFLINE_FEATURE.replace("PRD-5001", "PRD-0000");
        let (base, _dir) = start(&feature).await;

        let res = reqwest::Client::new()
            .post(format!("{}/api/run-tests", base))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 500);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["message"], "Some tests failed");
        assert_eq!(body["summary"]["steps"]["failed"], 1);
    }
}

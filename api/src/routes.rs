use crate::AppState;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use log::{error, info, warn};

use crate::types::BenchmarkReport;

/// Runs one full benchmark cycle and returns the combined report.
/// Executes the stream strategy, the optional compaction/settle phase,
/// then the dump strategy, strictly in that order.
///
/// # Arguments
/// * `state` - Application state carrying the shared orchestrator.
///
/// # Returns
/// * `(StatusCode::OK, BenchmarkReport)` with both run results on success.
/// * `StatusCode::INTERNAL_SERVER_ERROR` with no body when a run fails.
pub(crate) async fn run_benchmark(
    State(state): State<AppState>,
) -> Result<Json<BenchmarkReport>, StatusCode> {
    info!("Benchmark requested");

    match state.orchestrator.run_cycle().await {
        Ok(report) => Ok(Json(report)),
        Err(err) => {
            error!("Benchmark run aborted: {err}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Serves the root index asset from the public directory.
///
/// # Returns
/// * `StatusCode::OK` with the index HTML when the asset exists.
/// * `StatusCode::NOT_FOUND` with a plain-text message when it does not.
pub(crate) async fn index(State(state): State<AppState>) -> Response {
    let index_path = state.public_dir.join("index.html");

    match tokio::fs::read_to_string(&index_path).await {
        Ok(contents) => Html(contents).into_response(),
        Err(err) => {
            warn!("Index asset missing at {}: {err}", index_path.display());
            (StatusCode::NOT_FOUND, "Main page not found").into_response()
        }
    }
}

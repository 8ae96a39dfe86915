pub mod orchestrator;
pub mod routes;
pub mod types;

use axum::routing::get;
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::orchestrator::Orchestrator;

/// Shared service state, constructed once by the process entry point.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub public_dir: Arc<PathBuf>,
}

/// Build the service router: the benchmark endpoint, the root index, and
/// a static-file fallback over the public assets directory.
pub fn app(state: AppState) -> Router {
    let static_files = ServeDir::new(state.public_dir.as_ref());

    Router::new()
        .route("/", get(routes::index))
        .route("/benchmark", get(routes::run_benchmark))
        .fallback_service(static_files)
        .with_state(state)
}

//! Application setup and router configuration.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::BaseCrawlProvider;
use crate::server::routes::{
    crawl_status_handler, generate_handler, root_handler, test_connection_handler,
};

/// Shared application state.
///
/// The provider is a process-wide capability passed explicitly so tests can
/// substitute a scripted double. Nothing here is request-scoped; the service
/// holds no job registry or cache between requests.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn BaseCrawlProvider>,
    pub output_file: Option<PathBuf>,
}

impl AppState {
    pub fn new(provider: Arc<dyn BaseCrawlProvider>) -> Self {
        Self {
            provider,
            output_file: None,
        }
    }

    pub fn with_output_file(mut self, path: Option<PathBuf>) -> Self {
        self.output_file = path;
        self
    }
}

/// Build the axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/test-connection", get(test_connection_handler))
        .route("/generate-llms-txt", post(generate_handler))
        .route("/crawl-status/:job_id", get(crawl_status_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}

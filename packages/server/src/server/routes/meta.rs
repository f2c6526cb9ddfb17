//! Service metadata and provider liveness endpoints.

use axum::{extract::Extension, Json};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::server::app::AppState;

/// GET / — static service information.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "LLMs.txt Generator API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "generate_llms_txt": "/generate-llms-txt (POST)",
            "crawl_status": "/crawl-status/{job_id} (GET)",
            "test_connection": "/test-connection (GET)",
        },
    }))
}

/// GET /test-connection — liveness probe against the crawl provider.
pub async fn test_connection_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Value>> {
    tracing::info!(provider = state.provider.name(), "Testing provider connection");

    state
        .provider
        .probe()
        .await
        .map_err(|e| ApiError::ProviderUnavailable(e.to_string()))?;

    Ok(Json(json!({
        "status": "success",
        "message": "Crawl provider connection is valid.",
    })))
}

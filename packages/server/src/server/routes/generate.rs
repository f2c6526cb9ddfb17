//! Job launch endpoint.
//!
//! POST /generate-llms-txt
//!
//! Validates the target URL and limit, submits an asynchronous crawl job to
//! the provider and hands back the job id plus a status path the caller can
//! resolve against this service's base address. All polling happens against
//! that path; this handler never waits for the crawl.

use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::kernel::validate_target_url;
use crate::server::app::AppState;

/// Default page limit when the caller omits one.
pub const DEFAULT_LIMIT: u32 = 20;

/// Upper bound on the requested page count.
pub const MAX_LIMIT: u32 = 500;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub url: String,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub message: String,
    pub job_id: String,
    pub status_url: String,
}

pub async fn generate_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    let limit = request.limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::InvalidInput(
            "Limit must be between 1 and 500".to_string(),
        ));
    }

    if !validate_target_url(&request.url) {
        return Err(ApiError::InvalidInput(
            "Only HTTP and HTTPS URLs are supported".to_string(),
        ));
    }

    tracing::info!(url = %request.url, limit, "Starting crawl");

    let handle = state
        .provider
        .submit(&request.url, limit)
        .await
        .map_err(ApiError::from_provider)?;

    Ok(Json(GenerateResponse {
        message: "Crawl job started successfully".to_string(),
        status_url: format!("/crawl-status/{}", handle.id),
        job_id: handle.id,
    }))
}

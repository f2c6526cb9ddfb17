//! Typed errors for the service.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. `ProviderError` covers the raw
//! crawl-provider boundary; `ApiError` is the client-visible taxonomy every
//! request handler resolves to.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors from the crawl provider boundary, before classification.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network-level failure reaching the provider
    #[error("network error: {0}")]
    Network(String),

    /// Provider responded with a non-success status
    #[error("provider API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Provider accepted the submission but returned no job id
    #[error("provider returned no job id")]
    MissingJobId,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Network(err.to_string())
    }
}

/// Client-visible error taxonomy.
///
/// Input validation failures never reach the provider; provider failures are
/// classified once via [`ApiError::from_provider`]; aggregation failures only
/// occur after a job is confirmed completed.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad URL scheme or out-of-range limit
    #[error("{0}")]
    InvalidInput(String),

    /// Provider call exceeded its time budget
    #[error("Request timed out. The website may be too large or slow to respond.")]
    ProviderTimeout,

    /// Provider quota or rate signal
    #[error("Rate limit exceeded. Please try again later.")]
    ProviderRateLimited,

    /// Provider reports the target unreachable or nonexistent
    #[error("Website not found or inaccessible.")]
    ProviderNotFound,

    /// Any other provider-side failure
    #[error("An error occurred with the crawling service: {0}")]
    ProviderUnavailable(String),

    /// Job completed but the result set was empty
    #[error("No pages were found to process")]
    NoPagesFound,

    /// Every page in the result set was discarded during grouping
    #[error("No valid pages found after filtering. Processed: {processed}, Filtered: {filtered}")]
    NoValidPagesAfterFiltering { processed: usize, filtered: usize },

    /// Formatting produced zero rendered bytes
    #[error("Generated content is empty")]
    EmptyDocument,

    /// Provider reported a terminal non-success state for an existing job
    #[error("Job {0} failed or was cancelled.")]
    JobFailedOrCancelled(String),
}

impl ApiError {
    /// Classify a raw provider error into the client-visible taxonomy.
    ///
    /// Best-effort substring matching on the provider's error description.
    /// Anything unrecognized degrades to `ProviderUnavailable` rather than
    /// failing the request handler.
    pub fn from_provider(err: ProviderError) -> Self {
        let text = err.to_string();
        let lowered = text.to_lowercase();

        if lowered.contains("timeout") || lowered.contains("timed out") {
            ApiError::ProviderTimeout
        } else if lowered.contains("rate limit") || lowered.contains("quota") {
            ApiError::ProviderRateLimited
        } else if lowered.contains("not found") || text.contains("404") {
            ApiError::ProviderNotFound
        } else {
            ApiError::ProviderUnavailable(text)
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::ProviderTimeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::ProviderRateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::ProviderNotFound => StatusCode::NOT_FOUND,
            ApiError::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::NoPagesFound => StatusCode::NOT_FOUND,
            ApiError::NoValidPagesAfterFiltering { .. } => StatusCode::NOT_FOUND,
            ApiError::EmptyDocument => StatusCode::NOT_FOUND,
            ApiError::JobFailedOrCancelled(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            // Status-route terminal failure is a plain-text notice
            ApiError::JobFailedOrCancelled(_) => (status, self.to_string()).into_response(),
            _ => (status, Json(json!({ "detail": self.to_string() }))).into_response(),
        }
    }
}

/// Result type alias for provider operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Result type alias for request handling.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

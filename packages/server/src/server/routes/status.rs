//! Job status endpoint.
//!
//! GET /crawl-status/:job_id
//!
//! One provider round-trip per call; the polling cadence is entirely the
//! caller's. Plain-text responses: 202 with a progress line while the job is
//! in flight, 200 with the aggregated document once completed, 400 when the
//! provider reports a terminal non-success state.
//!
//! The document is recomputed on every poll that observes completion.
//! Aggregation is a pure function of the provider's post-completion data, so
//! recomputing is idempotent and no cache is held between requests.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::{ApiError, ApiResult};
use crate::kernel::{render_document, write_output, JobStatus};
use crate::server::app::AppState;

pub async fn crawl_status_handler(
    Extension(state): Extension<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Response> {
    tracing::info!(job_id = %job_id, "Checking crawl status");

    let snapshot = state
        .provider
        .get_status(&job_id)
        .await
        .map_err(ApiError::from_provider)?;

    match snapshot.status {
        JobStatus::Completed => {
            let document = render_document(&snapshot.pages)?;

            if let Some(path) = &state.output_file {
                write_output(path, &document);
            }

            Ok(document.into_response())
        }
        JobStatus::Failed | JobStatus::Cancelled => Err(ApiError::JobFailedOrCancelled(job_id)),
        JobStatus::Pending | JobStatus::Running => Ok((
            StatusCode::ACCEPTED,
            format!(
                "Job is still running. Status: {}. Completed {}/{} pages.",
                snapshot.status_text, snapshot.completed, snapshot.total
            ),
        )
            .into_response()),
    }
}

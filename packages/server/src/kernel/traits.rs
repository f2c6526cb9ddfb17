// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no aggregation logic. The crawl
// provider is a black-box submit/poll capability; route handlers depend on
// the trait so tests can substitute a scripted double.
//
// Naming convention: Base* for trait names (e.g., BaseCrawlProvider)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderResult;

/// Handle returned when a crawl job is accepted by the provider.
#[derive(Debug, Clone)]
pub struct JobHandle {
    /// Opaque identifier assigned by the provider; immutable once created
    pub id: String,
}

/// Provider-owned job state. Terminal states never transition further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Map a raw provider status string, case-insensitively.
    ///
    /// Unknown strings mean the provider is still working, so they map to
    /// `Running` rather than erroring.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "pending" | "queued" => JobStatus::Pending,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            "cancelled" => JobStatus::Cancelled,
            _ => JobStatus::Running,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }
}

/// One crawled page from a completed job's result set.
///
/// Pages lacking a source URL are discarded during aggregation (counted,
/// never an error for the whole job).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawledPage {
    /// Absolute URL of the fetched page
    pub source_url: Option<String>,

    /// Display title, if the provider extracted one
    pub title: Option<String>,

    /// Summary text, if the provider extracted one
    pub description: Option<String>,
}

impl CrawledPage {
    /// Create a page with just a source URL.
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: Some(source_url.into()),
            title: None,
            description: None,
        }
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the page description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One status round-trip's view of a job.
#[derive(Debug, Clone)]
pub struct JobSnapshot {
    pub status: JobStatus,

    /// Raw status string as reported by the provider, echoed in progress
    /// bodies so callers see the provider's own vocabulary
    pub status_text: String,

    /// Pages completed so far; only meaningful while the job is in progress
    pub completed: u32,

    /// Total pages the provider expects to crawl
    pub total: u32,

    /// Result set; populated only once the job is completed
    pub pages: Vec<CrawledPage>,
}

impl JobSnapshot {
    /// Snapshot for a job that is still in progress.
    pub fn in_progress(status_text: impl Into<String>, completed: u32, total: u32) -> Self {
        let status_text = status_text.into();
        Self {
            status: JobStatus::parse(&status_text),
            status_text,
            completed,
            total,
            pages: Vec::new(),
        }
    }

    /// Snapshot for a job that ended in a terminal non-success state.
    pub fn terminal_failure(status_text: impl Into<String>) -> Self {
        let status_text = status_text.into();
        Self {
            status: JobStatus::parse(&status_text),
            status_text,
            completed: 0,
            total: 0,
            pages: Vec::new(),
        }
    }

    /// Snapshot for a completed job carrying its result set.
    pub fn completed(pages: Vec<CrawledPage>) -> Self {
        let total = pages.len() as u32;
        Self {
            status: JobStatus::Completed,
            status_text: "completed".to_string(),
            completed: total,
            total,
            pages,
        }
    }
}

/// Crawl provider gateway: a shared, stateless capability initialized once at
/// process start and reused by every request.
///
/// Exactly the submit/poll surface plus a lightweight liveness probe; the
/// provider's internals are never assumed. Each call is one round-trip;
/// polling cadence is entirely the caller's concern.
#[async_trait]
pub trait BaseCrawlProvider: Send + Sync {
    /// Start an asynchronous crawl job. Returns immediately with a handle.
    async fn submit(&self, url: &str, limit: u32) -> ProviderResult<JobHandle>;

    /// Fetch the current state of a job, including the result set when the
    /// job has completed.
    async fn get_status(&self, job_id: &str) -> ProviderResult<JobSnapshot>;

    /// Cheap connectivity check against the provider.
    async fn probe(&self) -> ProviderResult<()>;

    /// Provider name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_known_values() {
        assert_eq!(JobStatus::parse("pending"), JobStatus::Pending);
        assert_eq!(JobStatus::parse("Completed"), JobStatus::Completed);
        assert_eq!(JobStatus::parse("FAILED"), JobStatus::Failed);
        assert_eq!(JobStatus::parse("cancelled"), JobStatus::Cancelled);
    }

    #[test]
    fn test_status_parse_unknown_means_still_working() {
        assert_eq!(JobStatus::parse("scraping"), JobStatus::Running);
        assert_eq!(JobStatus::parse(""), JobStatus::Running);
    }

    #[test]
    fn test_terminal_states() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
    }

    #[test]
    fn test_page_builder() {
        let page = CrawledPage::new("https://example.com/blog")
            .with_title("Blog")
            .with_description("posts");

        assert_eq!(page.source_url.as_deref(), Some("https://example.com/blog"));
        assert_eq!(page.title.as_deref(), Some("Blog"));
        assert_eq!(page.description.as_deref(), Some("posts"));
    }
}

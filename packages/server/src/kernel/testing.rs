//! Mock crawl provider for testing.
//!
//! Provides a configurable double for the BaseCrawlProvider trait with
//! scripted status responses and call tracking, so job launch and status
//! handlers can be tested deterministically without network access.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ProviderError, ProviderResult};
use crate::kernel::traits::{BaseCrawlProvider, CrawledPage, JobHandle, JobSnapshot};

/// Scripted crawl provider.
///
/// `get_status` pops queued snapshots in order; the last scripted response
/// is repeated once the queue is exhausted, mirroring a provider whose
/// terminal state never transitions.
///
/// # Example
///
/// ```rust
/// use llmstxt_core::kernel::{CrawledPage, JobSnapshot, MockProvider};
///
/// let provider = MockProvider::new()
///     .with_snapshot(JobSnapshot::in_progress("scraping", 1, 5))
///     .with_snapshot(JobSnapshot::completed(vec![
///         CrawledPage::new("https://example.com/").with_title("Home"),
///     ]));
/// ```
pub struct MockProvider {
    job_id: String,
    submit_error: Mutex<Option<ProviderError>>,
    probe_error: Mutex<Option<ProviderError>>,
    snapshots: Mutex<VecDeque<ScriptedStatus>>,
    last_snapshot: Mutex<Option<JobSnapshot>>,
    submit_calls: Mutex<Vec<(String, u32)>>,
    status_calls: Mutex<Vec<String>>,
}

enum ScriptedStatus {
    Snapshot(JobSnapshot),
    Error(ProviderError),
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            job_id: "mock-job-1".to_string(),
            submit_error: Mutex::new(None),
            probe_error: Mutex::new(None),
            snapshots: Mutex::new(VecDeque::new()),
            last_snapshot: Mutex::new(None),
            submit_calls: Mutex::new(Vec::new()),
            status_calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockProvider {
    /// Create a new mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific job id for accepted submissions.
    pub fn with_job_id(mut self, id: impl Into<String>) -> Self {
        self.job_id = id.into();
        self
    }

    /// Queue a status snapshot (builder pattern).
    pub fn with_snapshot(self, snapshot: JobSnapshot) -> Self {
        self.snapshots
            .lock()
            .unwrap()
            .push_back(ScriptedStatus::Snapshot(snapshot));
        self
    }

    /// Queue a status error (builder pattern).
    pub fn with_status_error(self, err: ProviderError) -> Self {
        self.snapshots
            .lock()
            .unwrap()
            .push_back(ScriptedStatus::Error(err));
        self
    }

    /// Make the next submit call fail.
    pub fn with_submit_error(self, err: ProviderError) -> Self {
        *self.submit_error.lock().unwrap() = Some(err);
        self
    }

    /// Make probe calls fail.
    pub fn with_probe_error(self, err: ProviderError) -> Self {
        *self.probe_error.lock().unwrap() = Some(err);
        self
    }

    /// Shortcut: a provider that immediately reports a completed job with
    /// the given pages.
    pub fn completed_with(pages: Vec<CrawledPage>) -> Self {
        Self::new().with_snapshot(JobSnapshot::completed(pages))
    }

    /// (url, limit) pairs submit was called with.
    pub fn submit_calls(&self) -> Vec<(String, u32)> {
        self.submit_calls.lock().unwrap().clone()
    }

    /// Job ids get_status was called with.
    pub fn status_calls(&self) -> Vec<String> {
        self.status_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseCrawlProvider for MockProvider {
    async fn submit(&self, url: &str, limit: u32) -> ProviderResult<JobHandle> {
        self.submit_calls
            .lock()
            .unwrap()
            .push((url.to_string(), limit));

        if let Some(err) = self.submit_error.lock().unwrap().take() {
            return Err(err);
        }

        Ok(JobHandle {
            id: self.job_id.clone(),
        })
    }

    async fn get_status(&self, job_id: &str) -> ProviderResult<JobSnapshot> {
        self.status_calls.lock().unwrap().push(job_id.to_string());

        match self.snapshots.lock().unwrap().pop_front() {
            Some(ScriptedStatus::Snapshot(snapshot)) => {
                *self.last_snapshot.lock().unwrap() = Some(snapshot.clone());
                Ok(snapshot)
            }
            Some(ScriptedStatus::Error(err)) => Err(err),
            None => match self.last_snapshot.lock().unwrap().clone() {
                Some(snapshot) => Ok(snapshot),
                None => Err(ProviderError::Api {
                    status: 404,
                    message: format!("Job not found: {}", job_id),
                }),
            },
        }
    }

    async fn probe(&self) -> ProviderResult<()> {
        if let Some(err) = self.probe_error.lock().unwrap().take() {
            return Err(err);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::traits::JobStatus;

    #[tokio::test]
    async fn test_submit_records_calls() {
        let provider = MockProvider::new().with_job_id("abc");

        let handle = provider.submit("https://example.com", 5).await.unwrap();
        assert_eq!(handle.id, "abc");
        assert_eq!(
            provider.submit_calls(),
            vec![("https://example.com".to_string(), 5)]
        );
    }

    #[tokio::test]
    async fn test_snapshots_pop_in_order_then_repeat() {
        let provider = MockProvider::new()
            .with_snapshot(JobSnapshot::in_progress("scraping", 1, 2))
            .with_snapshot(JobSnapshot::completed(vec![CrawledPage::new(
                "https://example.com/",
            )]));

        let first = provider.get_status("j").await.unwrap();
        assert_eq!(first.status, JobStatus::Running);

        let second = provider.get_status("j").await.unwrap();
        assert_eq!(second.status, JobStatus::Completed);

        // Terminal snapshot repeats once the script is exhausted
        let third = provider.get_status("j").await.unwrap();
        assert_eq!(third.status, JobStatus::Completed);
        assert_eq!(provider.status_calls().len(), 3);
    }

    #[tokio::test]
    async fn test_unscripted_status_is_not_found() {
        let provider = MockProvider::new();
        let err = provider.get_status("missing").await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}

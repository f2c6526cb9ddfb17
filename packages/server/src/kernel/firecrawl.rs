//! Firecrawl implementation of the crawl provider gateway.
//!
//! Talks to the Firecrawl REST API directly over reqwest. Crawl jobs are
//! asynchronous on the provider side: `submit` starts a job and returns its
//! id, `get_status` performs exactly one status round-trip. No sleeping or
//! retrying happens here; polling cadence belongs to the caller.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, ProviderResult};
use crate::kernel::traits::{BaseCrawlProvider, CrawledPage, JobHandle, JobSnapshot, JobStatus};

use async_trait::async_trait;

const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1";

/// Content-freshness window passed on every crawl: seven days, in ms.
const SCRAPE_MAX_AGE_MS: u64 = 604_800_000;

/// Network-fetch profile. Fixed policy, not caller-configurable, to keep
/// provider billing and behavior predictable.
const SCRAPE_PROXY: &str = "stealth";

/// Geographic hint for fetches. Fixed policy, same reasoning as the proxy.
const SCRAPE_COUNTRY: &str = "US";

/// Known-good page used by the connectivity probe.
const PROBE_URL: &str = "https://www.scrapethissite.com/pages/simple/";

/// Firecrawl-backed crawl provider.
///
/// One instance is created at process start and shared by every request.
pub struct FirecrawlProvider {
    client: Client,
    api_key: String,
}

// Request/Response types for the Firecrawl API

#[derive(Serialize)]
struct CrawlRequest {
    url: String,
    limit: u32,
    #[serde(rename = "scrapeOptions")]
    scrape_options: ScrapeOptions,
}

#[derive(Serialize)]
struct ScrapeOptions {
    #[serde(rename = "maxAge")]
    max_age: u64,
    proxy: &'static str,
    location: LocationHint,
}

#[derive(Serialize)]
struct LocationHint {
    country: &'static str,
}

#[derive(Deserialize)]
struct CrawlStartResponse {
    success: bool,
    id: Option<String>,
}

#[derive(Deserialize)]
struct CrawlStatusResponse {
    status: String,
    completed: Option<u32>,
    total: Option<u32>,
    data: Option<Vec<CrawlPageData>>,
}

#[derive(Deserialize)]
struct CrawlPageData {
    metadata: Option<PageMetadata>,
}

#[derive(Deserialize)]
struct PageMetadata {
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "sourceURL")]
    source_url: Option<String>,
}

#[derive(Serialize)]
struct ScrapeRequest {
    url: String,
    formats: Vec<String>,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    success: bool,
}

impl FirecrawlProvider {
    /// Create a new provider gateway with the given API key.
    pub fn new(api_key: impl Into<String>) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    async fn post<T: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> ProviderResult<R> {
        let url = format!("{}{}", FIRECRAWL_API_URL, endpoint);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    async fn get<R: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> ProviderResult<R> {
        let url = format!("{}{}", FIRECRAWL_API_URL, endpoint);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    fn scrape_options() -> ScrapeOptions {
        ScrapeOptions {
            max_age: SCRAPE_MAX_AGE_MS,
            proxy: SCRAPE_PROXY,
            location: LocationHint {
                country: SCRAPE_COUNTRY,
            },
        }
    }

    fn page_data_to_crawled_page(data: CrawlPageData) -> CrawledPage {
        match data.metadata {
            Some(metadata) => CrawledPage {
                source_url: metadata.source_url,
                title: metadata.title,
                description: metadata.description,
            },
            None => CrawledPage {
                source_url: None,
                title: None,
                description: None,
            },
        }
    }
}

#[async_trait]
impl BaseCrawlProvider for FirecrawlProvider {
    async fn submit(&self, url: &str, limit: u32) -> ProviderResult<JobHandle> {
        tracing::info!(url = %url, limit, "Submitting crawl job to Firecrawl");

        let request = CrawlRequest {
            url: url.to_string(),
            limit,
            scrape_options: Self::scrape_options(),
        };

        let response: CrawlStartResponse = self.post("/crawl", &request).await?;

        if !response.success {
            return Err(ProviderError::MissingJobId);
        }
        let id = response.id.ok_or(ProviderError::MissingJobId)?;

        tracing::info!(job_id = %id, "Crawl job accepted by Firecrawl");
        Ok(JobHandle { id })
    }

    async fn get_status(&self, job_id: &str) -> ProviderResult<JobSnapshot> {
        let response: CrawlStatusResponse = self.get(&format!("/crawl/{}", job_id)).await?;

        let status = JobStatus::parse(&response.status);
        let pages = response
            .data
            .unwrap_or_default()
            .into_iter()
            .map(Self::page_data_to_crawled_page)
            .collect::<Vec<_>>();

        tracing::debug!(
            job_id = %job_id,
            status = %response.status,
            completed = ?response.completed,
            total = ?response.total,
            pages = pages.len(),
            "Fetched crawl status"
        );

        Ok(JobSnapshot {
            status,
            status_text: response.status,
            completed: response.completed.unwrap_or(0),
            total: response.total.unwrap_or(0),
            pages,
        })
    }

    async fn probe(&self) -> ProviderResult<()> {
        let request = ScrapeRequest {
            url: PROBE_URL.to_string(),
            formats: vec!["markdown".to_string()],
        };

        let response: ScrapeResponse = self.post("/scrape", &request).await?;
        if !response.success {
            return Err(ProviderError::Api {
                status: 502,
                message: "Firecrawl scrape probe failed".to_string(),
            });
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "firecrawl"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider() {
        // Construction succeeds without a valid API key
        let provider = FirecrawlProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "firecrawl");
    }

    #[test]
    fn test_page_data_mapping() {
        let data = CrawlPageData {
            metadata: Some(PageMetadata {
                title: Some("Test Page".to_string()),
                description: Some("A page".to_string()),
                source_url: Some("https://example.com/test".to_string()),
            }),
        };

        let page = FirecrawlProvider::page_data_to_crawled_page(data);
        assert_eq!(page.source_url.as_deref(), Some("https://example.com/test"));
        assert_eq!(page.title.as_deref(), Some("Test Page"));
        assert_eq!(page.description.as_deref(), Some("A page"));
    }

    #[test]
    fn test_page_data_without_metadata() {
        let data = CrawlPageData { metadata: None };

        let page = FirecrawlProvider::page_data_to_crawled_page(data);
        assert!(page.source_url.is_none());
        assert!(page.title.is_none());
    }

    #[test]
    fn test_scrape_options_policy_constants() {
        let options = FirecrawlProvider::scrape_options();
        assert_eq!(options.max_age, 604_800_000);
        assert_eq!(options.proxy, "stealth");
        assert_eq!(options.location.country, "US");
    }
}

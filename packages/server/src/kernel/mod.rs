//! Kernel module - server infrastructure and dependencies.

pub mod aggregate;
pub mod firecrawl;
pub mod output;
pub mod testing;
pub mod traits;
pub mod validate;

pub use aggregate::{format_groups, group_pages, render_document};
pub use firecrawl::FirecrawlProvider;
pub use output::write_output;
pub use testing::MockProvider;
pub use traits::{BaseCrawlProvider, CrawledPage, JobHandle, JobSnapshot, JobStatus};
pub use validate::validate_target_url;

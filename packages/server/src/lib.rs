// llms.txt Generator - API Core
//
// This crate provides the backend service that crawls a target site through
// an external crawl provider and renders the page inventory as an llms.txt
// document. Crawling is fully delegated: the service submits a job, exposes
// its status, and aggregates the result set once the provider finishes.

pub mod config;
pub mod error;
pub mod kernel;
pub mod server;

pub use config::*;
pub use error::{ApiError, ProviderError};

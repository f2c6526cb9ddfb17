//! Target URL validation.
//!
//! Gates every submission before any provider call is made. Pure function,
//! no network access.

use url::Url;

/// Validate that a target URL is absolute, uses http/https and has a host.
///
/// A failing validation short-circuits the request with a client error; it is
/// never silently corrected or defaulted.
pub fn validate_target_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

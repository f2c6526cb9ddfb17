//! Page aggregation: group a crawled page inventory by primary URL path and
//! render it as an llms.txt document.
//!
//! Two-phase by design: pages are bucketed in encounter order, then only the
//! group keys are sorted for display. Intra-group order always follows the
//! provider's result set.

use std::collections::BTreeMap;

use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::kernel::traits::CrawledPage;

/// Label for pages whose URL has no path segments.
const HOMEPAGE_GROUP: &str = "Homepage";

/// Group pages by the first non-empty segment of their URL path.
///
/// Pages without a parsable `source_url` are discarded and counted; they
/// never fail the whole job. The returned map iterates in ascending key
/// order (`BTreeMap`), while each group's pages keep encounter order.
///
/// Errors:
/// - empty input -> [`ApiError::NoPagesFound`]
/// - nothing survived filtering -> [`ApiError::NoValidPagesAfterFiltering`]
pub fn group_pages(pages: &[CrawledPage]) -> ApiResult<BTreeMap<String, Vec<CrawledPage>>> {
    if pages.is_empty() {
        return Err(ApiError::NoPagesFound);
    }

    let mut groups: BTreeMap<String, Vec<CrawledPage>> = BTreeMap::new();
    let mut processed = 0usize;
    let mut filtered = 0usize;

    for page in pages {
        let Some(source_url) = page.source_url.as_deref() else {
            filtered += 1;
            continue;
        };

        let Ok(parsed) = Url::parse(source_url) else {
            tracing::warn!(url = %source_url, "Could not parse URL for grouping, skipping page");
            filtered += 1;
            continue;
        };

        let key = group_key(&parsed);
        groups.entry(key).or_default().push(page.clone());
        processed += 1;
    }

    if processed == 0 {
        return Err(ApiError::NoValidPagesAfterFiltering {
            processed,
            filtered,
        });
    }

    tracing::info!(processed, filtered, groups = groups.len(), "Grouped crawled pages");
    Ok(groups)
}

/// Render grouped pages as the final llms.txt text.
///
/// Each group becomes a `## {key}` heading followed by one `- [title](url)`
/// line per page, with an optional `: description` suffix. Groups are joined
/// by a blank line. Pure and deterministic: identical input yields
/// byte-identical output.
pub fn format_groups(groups: &BTreeMap<String, Vec<CrawledPage>>) -> ApiResult<String> {
    if groups.is_empty() {
        return Err(ApiError::EmptyDocument);
    }

    let mut parts = Vec::with_capacity(groups.len());
    for (group_name, pages) in groups {
        let mut section = format!("## {}", group_name);
        for page in pages {
            let Some(url) = page.source_url.as_deref() else {
                continue;
            };
            let title = match page.title.as_deref() {
                Some(title) if !title.trim().is_empty() => title,
                _ => group_name.as_str(),
            };
            section.push('\n');
            section.push_str(&format!("- [{}]({})", title, url));
            if let Some(description) = page.description.as_deref() {
                section.push_str(&format!(": {}", description));
            }
        }
        parts.push(section);
    }

    let result = parts.join("\n\n");
    if result.trim().is_empty() {
        return Err(ApiError::EmptyDocument);
    }

    Ok(result)
}

/// Convenience: group then format in one call.
pub fn render_document(pages: &[CrawledPage]) -> ApiResult<String> {
    let groups = group_pages(pages)?;
    format_groups(&groups)
}

/// Derive the group key from a parsed URL.
///
/// First non-empty path segment with hyphens replaced by spaces and each
/// word capitalized; `Homepage` when the path has no segments.
fn group_key(url: &Url) -> String {
    let first_segment = url.path().split('/').find(|segment| !segment.is_empty());

    match first_segment {
        Some(segment) => title_case(&segment.replace('-', " ")),
        None => HOMEPAGE_GROUP.to_string(),
    }
}

/// Capitalize the first letter of each whitespace-separated word and
/// lowercase the rest.
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_first_segment_shares_group() {
        let pages = vec![
            CrawledPage::new("https://x.com/about-us/team"),
            CrawledPage::new("https://x.com/About-Us/bio"),
        ];

        let groups = group_pages(&pages).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["About Us"].len(), 2);
    }

    #[test]
    fn test_root_url_groups_under_homepage() {
        let pages = vec![
            CrawledPage::new("https://x.com"),
            CrawledPage::new("https://x.com/"),
        ];

        let groups = group_pages(&pages).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["Homepage"].len(), 2);
    }

    #[test]
    fn test_page_without_source_url_is_filtered() {
        let pages = vec![
            CrawledPage {
                source_url: None,
                title: Some("orphan".to_string()),
                description: None,
            },
            CrawledPage::new("https://x.com/blog/post"),
        ];

        let groups = group_pages(&pages).unwrap();
        assert_eq!(groups.len(), 1);
        assert!(groups.contains_key("Blog"));
    }

    #[test]
    fn test_empty_input_is_no_pages_found() {
        assert!(matches!(group_pages(&[]), Err(ApiError::NoPagesFound)));
    }

    #[test]
    fn test_all_filtered_reports_counts() {
        let pages = vec![
            CrawledPage {
                source_url: None,
                title: None,
                description: None,
            },
            CrawledPage::new("not a url at all"),
        ];

        match group_pages(&pages) {
            Err(ApiError::NoValidPagesAfterFiltering {
                processed,
                filtered,
            }) => {
                assert_eq!(processed, 0);
                assert_eq!(filtered, 2);
            }
            other => panic!("expected NoValidPagesAfterFiltering, got {:?}", other),
        }
    }

    #[test]
    fn test_intra_group_order_is_encounter_order() {
        let pages = vec![
            CrawledPage::new("https://x.com/blog/second").with_title("Second"),
            CrawledPage::new("https://x.com/blog/first").with_title("First"),
        ];

        let groups = group_pages(&pages).unwrap();
        let titles: Vec<_> = groups["Blog"]
            .iter()
            .map(|p| p.title.as_deref().unwrap())
            .collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[test]
    fn test_format_sorts_groups_ascending() {
        let pages = vec![
            CrawledPage::new("https://x.com/zebra/a"),
            CrawledPage::new("https://x.com/apple/b"),
            CrawledPage::new("https://x.com/"),
        ];

        let document = render_document(&pages).unwrap();
        let apple = document.find("## Apple").unwrap();
        let homepage = document.find("## Homepage").unwrap();
        let zebra = document.find("## Zebra").unwrap();
        assert!(apple < homepage);
        assert!(homepage < zebra);
    }

    #[test]
    fn test_format_is_deterministic() {
        let pages = vec![
            CrawledPage::new("https://x.com/blog/a").with_title("A"),
            CrawledPage::new("https://x.com/docs/b").with_title("B"),
        ];

        let groups = group_pages(&pages).unwrap();
        assert_eq!(format_groups(&groups).unwrap(), format_groups(&groups).unwrap());
    }

    #[test]
    fn test_title_falls_back_to_group_key() {
        let pages = vec![CrawledPage::new("https://x.com/blog/post")];

        let document = render_document(&pages).unwrap();
        assert_eq!(document, "## Blog\n- [Blog](https://x.com/blog/post)");
    }

    #[test]
    fn test_whitespace_title_falls_back_to_group_key() {
        let pages = vec![CrawledPage::new("https://x.com/blog/post").with_title("   ")];

        let document = render_document(&pages).unwrap();
        assert!(document.contains("- [Blog]("));
    }

    #[test]
    fn test_description_suffix() {
        let pages = vec![CrawledPage::new("https://x.com/blog/post-1")
            .with_title("Post 1")
            .with_description("first post")];

        let document = render_document(&pages).unwrap();
        assert_eq!(
            document,
            "## Blog\n- [Post 1](https://x.com/blog/post-1): first post"
        );
    }

    #[test]
    fn test_end_to_end_document() {
        let pages = vec![
            CrawledPage::new("https://example.com/").with_title("Home"),
            CrawledPage::new("https://example.com/blog/post-1")
                .with_title("Post 1")
                .with_description("first post"),
        ];

        let expected = "## Blog\n- [Post 1](https://example.com/blog/post-1): first post\n\n## Homepage\n- [Home](https://example.com/)";
        assert_eq!(render_document(&pages).unwrap(), expected);
    }

    #[test]
    fn test_format_empty_map_is_empty_document() {
        let groups: BTreeMap<String, Vec<CrawledPage>> = BTreeMap::new();
        assert!(matches!(
            format_groups(&groups),
            Err(ApiError::EmptyDocument)
        ));
    }
}

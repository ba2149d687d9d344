//! HTML extraction helpers
//!
//! All `scraper` work is synchronous and self-contained: callers parse,
//! extract owned strings, and drop the document before the next await point
//! (`scraper::Html` is not `Send`).

use scraper::{Html, Selector};
use url::Url;

/// Extracts all followable hyperlink targets from an HTML page
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` tags, resolved against `base_url`.
///
/// **Exclude:** `javascript:`, `mailto:`, `tel:` and `data:` links,
/// fragment-only anchors, download links, and anything that resolves to a
/// non-HTTP(S) URL.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The base URL for resolving relative links
///
/// # Example
///
/// ```
/// use storycrawl::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/story/a">A</a></body></html>"#;
/// let base = Url::parse("https://example.com/tag/programming").unwrap();
/// let links = extract_links(html, &base);
/// assert_eq!(links[0].as_str(), "https://example.com/story/a");
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Selects the first element matching `selector` and returns its trimmed text
///
/// Returns `None` when the selector matches nothing or the matched element
/// has no text. An unparseable selector also yields `None`; config
/// validation rejects those before a run starts.
///
/// # Example
///
/// ```
/// use storycrawl::crawler::select_text;
///
/// let html = r#"<html><body><h1 data-testid="hed">  Title  </h1></body></html>"#;
/// assert_eq!(
///     select_text(html, r#"h1[data-testid="hed"]"#),
///     Some("Title".to_string())
/// );
/// assert_eq!(select_text(html, "h2"), None);
/// ```
pub fn select_text(html: &str, selector: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector).ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only anchors
/// - Invalid URLs or non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Skip fragment-only links (same page anchors)
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

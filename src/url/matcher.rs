use url::Url;

/// Checks whether a discovered link points at an article detail page
///
/// The pattern is the Rust form of the glob `https://<site>/story/**`:
/// the candidate must live on the same site as the listing base URL and its
/// path must start with the configured detail prefix. Anything after the
/// prefix is accepted.
///
/// # Arguments
///
/// * `candidate` - The discovered link (already normalized)
/// * `base` - The listing base URL defining the site
/// * `prefix` - The detail path prefix, e.g. `/story/`
///
/// # Examples
///
/// ```
/// use storycrawl::url::is_detail_url;
/// use url::Url;
///
/// let base = Url::parse("https://www.wired.com/tag/programming").unwrap();
/// let story = Url::parse("https://www.wired.com/story/some-article").unwrap();
/// let other = Url::parse("https://www.wired.com/video/some-clip").unwrap();
///
/// assert!(is_detail_url(&story, &base, "/story/"));
/// assert!(!is_detail_url(&other, &base, "/story/"));
/// ```
pub fn is_detail_url(candidate: &Url, base: &Url, prefix: &str) -> bool {
    let (Some(candidate_host), Some(base_host)) = (candidate.host_str(), base.host_str()) else {
        return false;
    };

    if !hosts_match(candidate_host, base_host) {
        return false;
    }

    candidate.path().starts_with(prefix)
}

/// Compares hosts ignoring case and a leading `www.` on either side,
/// so `wired.com` and `www.wired.com` count as the same site.
fn hosts_match(a: &str, b: &str) -> bool {
    strip_www(&a.to_lowercase()) == strip_www(&b.to_lowercase())
}

fn strip_www(host: &str) -> String {
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

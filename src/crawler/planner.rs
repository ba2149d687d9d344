//! Page-set planner
//!
//! Derives the concrete set of listing-page URLs to visit from the requested
//! item count. Pagination is coarse: a full page of candidates may surface
//! more detail URLs than remain needed, which is why the detail handler
//! carries its own stop guard.

use crate::CrawlError;
use url::Url;

/// Plans the ordered set of listing pages for a run
///
/// Returns exactly `ceil(max_items / page_size)` URLs. Page 1 is the base
/// URL unmodified; page N > 1 gets the query parameter `page=N`.
///
/// Pure and deterministic. The only failure mode is invalid input.
///
/// # Arguments
///
/// * `base_url` - The listing base URL (page 1)
/// * `max_items` - The requested item count (must be >= 1)
/// * `page_size` - Number of items per listing page (must be >= 1)
///
/// # Examples
///
/// ```
/// use storycrawl::crawler::{plan_listing_pages, ARTICLES_PER_PAGE};
/// use url::Url;
///
/// let base = Url::parse("https://www.wired.com/tag/programming").unwrap();
/// let pages = plan_listing_pages(&base, 48, ARTICLES_PER_PAGE).unwrap();
/// assert_eq!(pages.len(), 2);
/// assert_eq!(pages[1].as_str(), "https://www.wired.com/tag/programming?page=2");
/// ```
pub fn plan_listing_pages(
    base_url: &Url,
    max_items: u32,
    page_size: u32,
) -> Result<Vec<Url>, CrawlError> {
    if max_items < 1 {
        return Err(CrawlError::InvalidLimit { max_items });
    }
    debug_assert!(page_size >= 1);

    let total_pages = max_items.div_ceil(page_size);

    let pages = (1..=total_pages)
        .map(|page| {
            let mut url = base_url.clone();
            if page > 1 {
                url.set_query(Some(&format!("page={}", page)));
            }
            url
        })
        .collect();

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::ARTICLES_PER_PAGE;

    fn base() -> Url {
        Url::parse("https://www.wired.com/tag/programming").unwrap()
    }

    #[test]
    fn test_exactly_one_page() {
        let pages = plan_listing_pages(&base(), 24, ARTICLES_PER_PAGE).unwrap();
        assert_eq!(pages, vec![base()]);
    }

    #[test]
    fn test_exactly_two_pages() {
        let pages = plan_listing_pages(&base(), 48, ARTICLES_PER_PAGE).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], base());
        assert_eq!(
            pages[1].as_str(),
            "https://www.wired.com/tag/programming?page=2"
        );
    }

    #[test]
    fn test_partial_second_page() {
        let pages = plan_listing_pages(&base(), 25, ARTICLES_PER_PAGE).unwrap();
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn test_single_item() {
        let pages = plan_listing_pages(&base(), 1, ARTICLES_PER_PAGE).unwrap();
        assert_eq!(pages, vec![base()]);
    }

    #[test]
    fn test_page_count_is_ceiling() {
        for max_items in 1..=120 {
            let pages = plan_listing_pages(&base(), max_items, ARTICLES_PER_PAGE).unwrap();
            let expected = (max_items as usize).div_ceil(ARTICLES_PER_PAGE as usize);
            assert_eq!(pages.len(), expected, "max_items={}", max_items);
        }
    }

    #[test]
    fn test_zero_items_is_invalid() {
        let result = plan_listing_pages(&base(), 0, ARTICLES_PER_PAGE);
        assert!(matches!(
            result.unwrap_err(),
            CrawlError::InvalidLimit { max_items: 0 }
        ));
    }

    #[test]
    fn test_deterministic() {
        let a = plan_listing_pages(&base(), 100, ARTICLES_PER_PAGE).unwrap();
        let b = plan_listing_pages(&base(), 100, ARTICLES_PER_PAGE).unwrap();
        assert_eq!(a, b);
    }
}

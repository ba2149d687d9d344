//! Crawler module for crawl orchestration
//!
//! This module contains the core crawling logic, including:
//! - Page-set planning from the requested item count
//! - The deduplicating FIFO frontier
//! - Label-based route dispatch to the listing and detail handlers
//! - HTTP fetching and HTML field/link extraction
//! - Overall crawl coordination with bounded concurrency

mod coordinator;
mod fetcher;
mod frontier;
mod handlers;
mod parser;
mod planner;
mod router;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_page, FetchError, FetchedPage};
pub use frontier::{CrawlRequest, Frontier, Label};
pub use parser::{extract_links, select_text};
pub use planner::plan_listing_pages;

/// Number of articles one listing page surfaces
pub const ARTICLES_PER_PAGE: u32 = 24;

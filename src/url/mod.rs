//! URL handling for the crawler
//!
//! This module provides URL canonicalization (so the frontier's seen-set
//! compares like with like) and the detail-page pattern check that decides
//! which discovered links become Detail requests.

mod matcher;
mod normalize;

pub use matcher::is_detail_url;
pub use normalize::normalize_url;

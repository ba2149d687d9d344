//! Route dispatch
//!
//! Labels form a closed two-variant enum, so dispatch is an exhaustive
//! match: an unroutable request cannot be constructed in the first place.

use crate::crawler::frontier::{CrawlRequest, Label};
use crate::crawler::handlers::{handle_detail, handle_listing, HandlerContext};

/// Dispatches a dequeued request to its handler
pub(crate) async fn route(ctx: &HandlerContext, request: &CrawlRequest) -> crate::Result<()> {
    match request.label() {
        Label::Listing => handle_listing(ctx, request).await,
        Label::Detail => handle_detail(ctx, request).await,
    }
}

//! Listing and detail request handlers
//!
//! Per-request failures are absorbed here: a bad page is logged and dropped,
//! and the run keeps assembling whatever valid records remain. Only sink
//! failures propagate to the coordinator loop, where they are logged.

use crate::config::Config;
use crate::crawler::fetcher::fetch_page;
use crate::crawler::frontier::{CrawlRequest, Frontier};
use crate::crawler::parser::{extract_links, select_text};
use crate::output::{ExtractedRecord, RecordSink, UsageEvent, UsageSink};
use crate::state::ProcessedCounter;
use crate::summarizer::Summarizer;
use crate::url::{is_detail_url, normalize_url};
use chrono::Utc;
use reqwest::Client;
use std::sync::{Arc, Mutex};
use url::Url;

/// Shared handles every handler invocation needs
///
/// Cheap to clone: everything is an `Arc` or a reqwest `Client` (itself
/// reference-counted). The processed counter and frontier are owned by the
/// coordinator and shared by reference, never global.
#[derive(Clone)]
pub(crate) struct HandlerContext {
    pub config: Arc<Config>,
    pub base_url: Url,
    pub client: Client,
    pub frontier: Arc<Frontier>,
    pub progress: Arc<ProcessedCounter>,
    pub summarizer: Option<Summarizer>,
    pub records: Arc<Mutex<dyn RecordSink>>,
    pub usage: Arc<Mutex<dyn UsageSink>>,
}

/// Processes a listing page: discover detail URLs and enqueue them
///
/// A fetch error here is reported and the page skipped; listing pages are
/// non-essential sources of candidates and one bad page must not stop the
/// run. A page with zero matching links is simply quiet.
pub(crate) async fn handle_listing(
    ctx: &HandlerContext,
    request: &CrawlRequest,
) -> crate::Result<()> {
    tracing::info!(url = %request.url(), "scraping listing page");

    let page = match fetch_page(&ctx.client, request.url()).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!(url = %request.url(), error = %e, "listing page fetch failed, skipping");
            return Ok(());
        }
    };

    let links = extract_links(&page.body, request.url());

    let mut enqueued = 0usize;
    for link in &links {
        if !is_detail_url(link, &ctx.base_url, &ctx.config.crawl.detail_path_prefix) {
            continue;
        }

        let normalized = match normalize_url(link.as_str()) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(url = %link, error = %e, "skipping unnormalizable link");
                continue;
            }
        };

        if ctx.frontier.enqueue(CrawlRequest::detail(normalized)) {
            enqueued += 1;
        }
    }

    tracing::debug!(
        url = %request.url(),
        candidates = links.len(),
        enqueued,
        "listing page processed"
    );

    Ok(())
}

/// Processes a detail page: extract fields, summarize, emit one record
///
/// The processed-count guard runs first: once the target is met, excess
/// detail requests still sitting in the frontier return here without any
/// side effect. For content-bearing pages a billable slot is claimed
/// atomically before the record is emitted, so a run never emits more than
/// `max-items` content-bearing records no matter how many handlers race.
pub(crate) async fn handle_detail(
    ctx: &HandlerContext,
    request: &CrawlRequest,
) -> crate::Result<()> {
    // Fast path: target already met, do no work at all
    if ctx.progress.is_satisfied() {
        if ctx.progress.mark_target_reached() {
            tracing::info!(
                max_items = ctx.progress.max_items(),
                "item target reached, skipping remaining detail requests"
            );
        }
        return Ok(());
    }

    tracing::info!(url = %request.url(), "processing article");

    let page = match fetch_page(&ctx.client, request.url()).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!(url = %request.url(), error = %e, "detail page fetch failed, dropping");
            return Ok(());
        }
    };

    // Selector misses are null fields, not failures
    let title = select_text(&page.body, &ctx.config.selectors.title);
    let content = select_text(&page.body, &ctx.config.selectors.content);

    // Content-bearing records are the billable unit: claim a slot before
    // emitting so the limit cannot be overshot by racing handlers.
    let claimed = if content.is_some() {
        if !ctx.progress.try_claim() {
            tracing::debug!(url = %request.url(), "limit reached while in flight, dropping");
            return Ok(());
        }
        true
    } else {
        false
    };

    let summary = match (&content, &ctx.summarizer) {
        (Some(text), Some(summarizer)) => match summarizer.summarize(text).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!(url = %request.url(), error = %e, "summarization failed, emitting record without summary");
                None
            }
        },
        _ => None,
    };

    let record = ExtractedRecord {
        title,
        content,
        url: request.url().as_str().to_string(),
        summary,
        fetched_at: Utc::now(),
    };

    {
        let mut sink = ctx.records.lock().unwrap();
        sink.emit(&record)?;
    }

    if claimed {
        // Usage follows the record emission it meters
        {
            let mut usage = ctx.usage.lock().unwrap();
            usage.record_usage(&UsageEvent::article_summary(&record.url))?;
        }

        if ctx.progress.is_satisfied() && ctx.progress.mark_target_reached() {
            tracing::info!(
                max_items = ctx.progress.max_items(),
                "item target reached"
            );
        }
    }

    Ok(())
}

//! Crawl frontier: a deduplicating FIFO queue of pending requests
//!
//! Every unique URL is enqueued at most once for the life of the run. The
//! seen-check and the insert happen under a single lock acquisition, so two
//! workers discovering the same URL concurrently cannot both enqueue it.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use url::Url;

/// Route label selecting which handler processes a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// A paginated listing page enumerating links to detail pages
    Listing,

    /// An article detail page containing the content record to extract
    Detail,
}

/// A pending crawl request, immutable once enqueued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    url: Url,
    label: Label,
}

impl CrawlRequest {
    pub fn listing(url: Url) -> Self {
        Self {
            url,
            label: Label::Listing,
        }
    }

    pub fn detail(url: Url) -> Self {
        Self {
            url,
            label: Label::Detail,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn label(&self) -> Label {
        self.label
    }
}

#[derive(Debug, Default)]
struct FrontierInner {
    queue: VecDeque<CrawlRequest>,
    seen: HashSet<String>,
}

/// The queue of pending requests with per-URL dedup
///
/// Strict FIFO: listing pages drain before the detail pages they discover
/// only insofar as arrival order makes that happen; no stronger ordering is
/// provided. The mutex is never held across an await point.
#[derive(Debug, Default)]
pub struct Frontier {
    inner: Mutex<FrontierInner>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a request unless its URL has been seen before
    ///
    /// The URL is marked seen immediately, before the request is processed,
    /// so a second discovery of the same URL is a silent no-op even while
    /// the first is still pending.
    ///
    /// Returns whether the request was newly added.
    pub fn enqueue(&self, request: CrawlRequest) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if !inner.seen.insert(request.url.as_str().to_string()) {
            return false;
        }
        inner.queue.push_back(request);
        true
    }

    /// Removes and returns the next pending request in arrival order
    pub fn dequeue(&self) -> Option<CrawlRequest> {
        self.inner.lock().unwrap().queue.pop_front()
    }

    /// Returns the number of pending requests
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().queue.len()
    }

    /// Returns whether the frontier has no pending requests
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().queue.is_empty()
    }
}

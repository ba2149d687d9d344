//! Crawl coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Seeding the frontier with planned listing pages
//! - Dequeuing and routing requests with bounded concurrency
//! - Enforcing the processed-count stop condition
//! - Cooperative cancellation
//! - Reporting the terminal run status

use crate::config::{Config, OutputFormat};
use crate::crawler::fetcher::build_http_client;
use crate::crawler::frontier::{CrawlRequest, Frontier};
use crate::crawler::handlers::HandlerContext;
use crate::crawler::planner::plan_listing_pages;
use crate::crawler::router::route;
use crate::crawler::ARTICLES_PER_PAGE;
use crate::output::{
    JsonLinesSink, JsonLinesUsageLog, RecordSink, SqliteSink, UsageSink,
};
use crate::state::{ProcessedCounter, RunOutcome};
use crate::summarizer::Summarizer;
use crate::CrawlError;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Main crawl coordinator structure
///
/// Owns the frontier and the processed-count guard; handlers receive both
/// by shared reference through the handler context.
pub struct Coordinator {
    ctx: HandlerContext,
    max_concurrent: usize,
    cancel: Arc<AtomicBool>,
}

impl Coordinator {
    /// Creates a coordinator with sinks built from the output configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The validated crawl configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlError)` - Failed to build the HTTP client, summarizer, or sinks
    pub fn new(config: Config) -> Result<Self, CrawlError> {
        let (records, usage): (Arc<Mutex<dyn RecordSink>>, Arc<Mutex<dyn UsageSink>>) =
            match config.output.format {
                OutputFormat::Jsonl => (
                    Arc::new(Mutex::new(JsonLinesSink::open(Path::new(
                        &config.output.records_path,
                    ))?)),
                    Arc::new(Mutex::new(JsonLinesUsageLog::open(Path::new(
                        &config.output.usage_path,
                    ))?)),
                ),
                OutputFormat::Sqlite => {
                    // One connection serves both tables
                    let sink = Arc::new(Mutex::new(SqliteSink::open(Path::new(
                        &config.output.database_path,
                    ))?));
                    let records: Arc<Mutex<dyn RecordSink>> = sink.clone();
                    let usage: Arc<Mutex<dyn UsageSink>> = sink;
                    (records, usage)
                }
            };

        Self::with_sinks(config, records, usage)
    }

    /// Creates a coordinator with caller-supplied sinks
    ///
    /// Used by tests to capture records in memory; `new` delegates here.
    pub fn with_sinks(
        config: Config,
        records: Arc<Mutex<dyn RecordSink>>,
        usage: Arc<Mutex<dyn UsageSink>>,
    ) -> Result<Self, CrawlError> {
        let base_url = Url::parse(&config.crawl.base_url)?;
        let client = build_http_client(&config.user_agent)?;

        let summarizer = if config.summarizer.enabled {
            Some(Summarizer::from_config(&config.summarizer)?)
        } else {
            None
        };

        let progress = Arc::new(ProcessedCounter::new(config.crawl.max_items));
        let max_concurrent = config.crawl.max_concurrent_requests as usize;

        let ctx = HandlerContext {
            config: Arc::new(config),
            base_url,
            client,
            frontier: Arc::new(Frontier::new()),
            progress,
            summarizer,
            records,
            usage,
        };

        Ok(Self {
            ctx,
            max_concurrent,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Returns the shared cancellation flag
    ///
    /// Setting it stops the loop at the next iteration; in-flight handlers
    /// run to completion.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Enqueues a request directly, bypassing the planner
    ///
    /// Subject to the frontier's dedup like any other enqueue. Returns
    /// whether the request was newly added.
    pub fn enqueue(&self, request: CrawlRequest) -> bool {
        self.ctx.frontier.enqueue(request)
    }

    /// Returns the number of content-bearing records emitted so far
    pub fn processed(&self) -> u64 {
        self.ctx.progress.processed()
    }

    /// Runs the crawl to one of its terminal states
    ///
    /// Seeds the frontier from the page-set planner, then repeatedly
    /// dequeues and routes requests through a bounded worker pool until the
    /// frontier drains or the item target is reached. Per-request failures
    /// never unwind into this loop.
    pub async fn run(&mut self) -> Result<RunOutcome, CrawlError> {
        // Seeding
        let planned = plan_listing_pages(
            &self.ctx.base_url,
            self.ctx.config.crawl.max_items,
            ARTICLES_PER_PAGE,
        )?;
        let page_count = planned.len();
        for url in planned {
            self.ctx.frontier.enqueue(CrawlRequest::listing(url));
        }

        tracing::info!(
            listing_pages = page_count,
            max_items = self.ctx.config.crawl.max_items,
            max_concurrent = self.max_concurrent,
            "starting crawl"
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks: JoinSet<()> = JoinSet::new();
        let start_time = std::time::Instant::now();
        let mut dispatched = 0u64;

        loop {
            if self.cancel.load(Ordering::Acquire) {
                tracing::info!("cancellation requested, stopping dispatch");
                break;
            }

            if self.ctx.progress.is_satisfied() {
                break;
            }

            let Some(request) = self.ctx.frontier.dequeue() else {
                if tasks.is_empty() {
                    // Nothing pending and nothing in flight
                    break;
                }
                // An in-flight handler may still enqueue more work
                tasks.join_next().await;
                continue;
            };

            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .expect("semaphore closed");
            let ctx = self.ctx.clone();

            tasks.spawn(async move {
                let _permit = permit;
                if let Err(e) = route(&ctx, &request).await {
                    tracing::error!(url = %request.url(), error = %e, "handler failed");
                }
            });

            dispatched += 1;
            if dispatched % 10 == 0 {
                let elapsed = start_time.elapsed();
                tracing::info!(
                    dispatched,
                    processed = self.ctx.progress.processed(),
                    pending = self.ctx.frontier.len(),
                    elapsed_secs = elapsed.as_secs(),
                    "crawl progress"
                );
            }
        }

        // Drain in-flight handlers before reporting
        while tasks.join_next().await.is_some() {}

        let outcome = if self.ctx.progress.is_satisfied() {
            RunOutcome::TargetReached
        } else {
            RunOutcome::Drained
        };

        if self.cancel.load(Ordering::Acquire) && outcome == RunOutcome::Drained {
            // Distinguish a cut-short run from a site that genuinely ran out
            tracing::warn!(
                processed = self.ctx.progress.processed(),
                dispatched,
                elapsed_secs = start_time.elapsed().as_secs(),
                "crawl cancelled before completion"
            );
        } else {
            tracing::info!(
                outcome = %outcome,
                processed = self.ctx.progress.processed(),
                dispatched,
                elapsed_secs = start_time.elapsed().as_secs(),
                "crawl finished"
            );
        }

        Ok(outcome)
    }
}

/// Runs a complete crawl with sinks built from the configuration
///
/// # Arguments
///
/// * `config` - The validated crawl configuration
///
/// # Returns
///
/// * `Ok(RunOutcome)` - The terminal status of the run
/// * `Err(CrawlError)` - Setup failed before the loop started
///
/// # Example
///
/// ```no_run
/// use storycrawl::config::load_config;
/// use storycrawl::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let outcome = run_crawl(config).await?;
/// println!("crawl ended: {}", outcome);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<RunOutcome, CrawlError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}

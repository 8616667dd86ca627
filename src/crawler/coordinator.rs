//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the traversal, including:
//! - Seeding and draining the frontier
//! - Dispatching fetches into a bounded concurrent pool
//! - Routing fetched pages through the extractors
//! - Feeding discovered links back to the frontier and records to the sink
//! - Retry/dead-letter policy and the final run report

use crate::config::Config;
use crate::crawler::fetcher::{FetchError, Fetcher, HttpFetcher};
use crate::crawler::frontier::{Frontier, FrontierEntry, RequeueOutcome};
use crate::extract::{extract_page, ExtractError, Extraction, PageKind};
use crate::sink::{JsonLinesSink, RecordSink, RunReport};
use crate::url::normalize_url;
use crate::PlaybillError;
use chrono::Utc;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use url::Url;

/// Traversal states of a crawl run
///
/// A run is `Running` while the frontier still yields entries, `Draining`
/// once the frontier is empty (or a stop was requested) but fetches remain
/// in flight, and `Done` when both are exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Running,
    Draining,
    Done,
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Handle for asking a running coordinator to stop
///
/// Stopping prevents new dispatches; in-flight fetches drain to completion,
/// so every record that is emitted is a complete extraction.
#[derive(Debug, Clone)]
pub struct StopHandle {
    stop: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

/// Counters accumulated while the run is in progress
#[derive(Debug, Clone, Copy, Default)]
struct RunStats {
    fetched: u64,
    succeeded: u64,
    retried: u64,
    records_emitted: u64,
}

/// What one fetch task hands back to the coordinator
struct FetchTask {
    entry: FrontierEntry,
    outcome: TaskOutcome,
}

enum TaskOutcome {
    Extracted(Extraction),
    FetchFailed(FetchError),
    Malformed(ExtractError),
}

/// Main crawler coordinator structure
///
/// The coordinator is the only component that mutates the frontier or calls
/// the sink; fetch tasks fetch and run the pure extractors, nothing else.
pub struct Coordinator<F: Fetcher + 'static> {
    config: Arc<Config>,
    fetcher: Arc<F>,
    frontier: Arc<Mutex<Frontier>>,
    sink: Arc<dyn RecordSink>,
    stop: Arc<AtomicBool>,
    state: CrawlState,
    stats: RunStats,
}

impl<F: Fetcher + 'static> Coordinator<F> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawl configuration
    /// * `fetcher` - The transport implementation
    /// * `sink` - Where extracted credits go
    pub fn new(config: Config, fetcher: F, sink: Arc<dyn RecordSink>) -> Self {
        let frontier = Frontier::new(config.crawl.retry_ceiling);

        Self {
            config: Arc::new(config),
            fetcher: Arc::new(fetcher),
            frontier: Arc::new(Mutex::new(frontier)),
            sink,
            stop: Arc::new(AtomicBool::new(false)),
            state: CrawlState::Running,
            stats: RunStats::default(),
        }
    }

    /// Returns a handle that can stop this run from another task
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            stop: Arc::clone(&self.stop),
        }
    }

    /// Returns the current traversal state
    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Runs the crawl to completion
    ///
    /// This is the core traversal loop:
    /// 1. Route any completed fetches so their discoveries are claimable
    /// 2. Claim the next frontier entry (unless a stop was requested)
    /// 3. Dispatch it into the bounded fetch pool
    /// 4. When the frontier is empty, drain in-flight fetches
    /// 5. Terminate once neither pending entries nor in-flight fetches remain
    ///
    /// Per-URL failures never terminate the run; they are retried or
    /// dead-lettered. The run itself fails only on a bad seed URL or a sink
    /// write failure.
    pub async fn run(&mut self) -> Result<RunReport, PlaybillError> {
        let started_at = Utc::now();
        let started = Instant::now();

        // Seed the frontier; a bad seed fails the run before any dispatch
        let seed = normalize_url(&self.config.crawl.seed_url)?;
        tracing::info!("Seeding frontier with {}", seed);
        self.frontier
            .lock()
            .unwrap()
            .enqueue(seed, PageKind::Film);

        let semaphore = Arc::new(Semaphore::new(
            self.config.crawl.max_concurrent_fetches as usize,
        ));
        let delay = Duration::from_millis(self.config.crawl.request_delay_ms);
        let mut in_flight: JoinSet<FetchTask> = JoinSet::new();

        self.state = CrawlState::Running;

        loop {
            // Route completed fetches first so newly discovered links are
            // visible to the claim below
            while let Some(joined) = in_flight.try_join_next() {
                self.finish(joined)?;
            }

            let claimed = if self.stop.load(Ordering::SeqCst) {
                None
            } else {
                self.frontier.lock().unwrap().claim_next()
            };

            match claimed {
                Some(entry) => {
                    self.state = CrawlState::Running;

                    let permit = match Arc::clone(&semaphore).acquire_owned().await {
                        Ok(permit) => permit,
                        // The semaphore is never closed
                        Err(_) => break,
                    };

                    self.dispatch(&mut in_flight, entry, permit);

                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                None => {
                    if in_flight.is_empty() {
                        self.state = CrawlState::Done;
                        break;
                    }

                    // Frontier empty (or stop requested) with fetches still
                    // out; wait for one to come back
                    self.state = CrawlState::Draining;
                    if let Some(joined) = in_flight.join_next().await {
                        self.finish(joined)?;
                    }
                }
            }
        }

        self.sink.finalize()?;

        let finished_at = Utc::now();
        let dead_letters = self.frontier.lock().unwrap().dead_letters().to_vec();

        let report = RunReport {
            started_at,
            finished_at,
            duration_seconds: started.elapsed().as_secs(),
            fetched: self.stats.fetched,
            succeeded: self.stats.succeeded,
            retried: self.stats.retried,
            dead_lettered: dead_letters.len() as u64,
            records_emitted: self.stats.records_emitted,
            final_state: self.state,
            dead_letters,
        };

        tracing::info!(
            "Crawl finished in {:?}: {} fetch attempts, {} pages extracted, {} records, {} dead-lettered",
            started.elapsed(),
            report.fetched,
            report.succeeded,
            report.records_emitted,
            report.dead_lettered
        );

        Ok(report)
    }

    /// Spawns one fetch into the pool
    ///
    /// The permit rides inside the task so the pool bound holds for the full
    /// fetch, and extraction runs on the fetching task since it is pure.
    fn dispatch(
        &self,
        in_flight: &mut JoinSet<FetchTask>,
        entry: FrontierEntry,
        permit: OwnedSemaphorePermit,
    ) {
        let fetcher = Arc::clone(&self.fetcher);

        in_flight.spawn(async move {
            let _permit = permit;
            tracing::debug!("Fetching {} ({})", entry.url, entry.kind);

            let outcome = match fetcher.fetch(&entry.url).await {
                Ok(page) => {
                    // Resolve discovered links against the post-redirect URL
                    let base =
                        Url::parse(&page.final_url).unwrap_or_else(|_| entry.url.clone());

                    match extract_page(entry.kind, &page.body, &base) {
                        Ok(extraction) => TaskOutcome::Extracted(extraction),
                        Err(e) => TaskOutcome::Malformed(e),
                    }
                }
                Err(e) => TaskOutcome::FetchFailed(e),
            };

            FetchTask { entry, outcome }
        });
    }

    /// Unwraps a joined task, isolating panics to the URL they occurred on
    fn finish(
        &mut self,
        joined: Result<FetchTask, tokio::task::JoinError>,
    ) -> Result<(), PlaybillError> {
        match joined {
            Ok(task) => self.route(task),
            Err(e) => {
                tracing::error!("Fetch task aborted: {}", e);
                Ok(())
            }
        }
    }

    /// Routes one completed fetch: links to the frontier, credits to the
    /// sink, failures to the retry policy
    fn route(&mut self, task: FetchTask) -> Result<(), PlaybillError> {
        self.stats.fetched += 1;

        // Progress reporting every 10 completed fetches
        if self.stats.fetched % 10 == 0 {
            tracing::info!(
                "Progress: {} fetched, {} pending, {} records emitted",
                self.stats.fetched,
                self.frontier.lock().unwrap().pending_len(),
                self.stats.records_emitted
            );
        }

        match task.outcome {
            TaskOutcome::Extracted(extraction) => {
                self.stats.succeeded += 1;

                {
                    let mut frontier = self.frontier.lock().unwrap();
                    for (url, kind) in extraction.links {
                        if frontier.enqueue(url.clone(), kind) {
                            tracing::debug!("Discovered {} ({})", url, kind);
                        }
                    }
                }

                // Records are atomic per extraction: none of them exist
                // until the whole page extracted cleanly
                for credit in &extraction.credits {
                    self.sink.accept(credit)?;
                    self.stats.records_emitted += 1;
                }
            }

            TaskOutcome::FetchFailed(error) if error.is_transient() => {
                let outcome = self
                    .frontier
                    .lock()
                    .unwrap()
                    .requeue(task.entry, &error.to_string());

                if outcome == RequeueOutcome::Requeued {
                    self.stats.retried += 1;
                }
            }

            TaskOutcome::FetchFailed(error) => {
                self.frontier
                    .lock()
                    .unwrap()
                    .dead_letter(task.entry, &error.to_string());
            }

            TaskOutcome::Malformed(error) => {
                tracing::warn!("Extraction failed for {}: {}", task.entry.url, error);
                self.frontier
                    .lock()
                    .unwrap()
                    .dead_letter(task.entry, &error.to_string());
            }
        }

        Ok(())
    }
}

/// Runs the main crawl operation with the production fetcher and sink
///
/// This function wires the pieces together for a real run:
///
/// 1. Build the HTTP fetcher from the configured timeout and user agent
/// 2. Open the JSON-lines record sink
/// 3. Hook Ctrl-C up to the stop handle so interrupts drain cleanly
/// 4. Run the coordinator to completion and return its report
///
/// # Arguments
///
/// * `config` - The crawl configuration
///
/// # Returns
///
/// * `Ok(RunReport)` - The run completed (dead letters are in the report)
/// * `Err(PlaybillError)` - The run could not start or the sink failed
pub async fn run_crawl(config: Config) -> Result<RunReport, PlaybillError> {
    let fetcher = HttpFetcher::new(&config.crawl, &config.user_agent)?;
    let sink: Arc<dyn RecordSink> =
        Arc::new(JsonLinesSink::create(Path::new(&config.output.records_path))?);

    let mut coordinator = Coordinator::new(config, fetcher, sink);

    let stop = coordinator.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, draining in-flight fetches");
            stop.stop();
        }
    });

    coordinator.run().await
}

//! Crawl pipeline: frontier, fetching, and coordination
//!
//! This module contains the traversal machinery, including:
//! - The frontier with deduplication and dead-letter policy
//! - The fetcher seam and its reqwest implementation
//! - The coordinator that drives the run to completion

mod coordinator;
mod fetcher;
mod frontier;

pub use coordinator::{run_crawl, Coordinator, CrawlState, StopHandle};
pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use frontier::{DeadLetter, Frontier, FrontierEntry, RequeueOutcome};

use crate::config::Config;
use crate::sink::RunReport;
use crate::PlaybillError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP fetcher and open the record sink
/// 2. Seed the frontier with the configured film page
/// 3. Fetch, extract, and follow links until the frontier drains
/// 4. Return the run report
///
/// # Arguments
///
/// * `config` - The crawl configuration
///
/// # Returns
///
/// * `Ok(RunReport)` - The run completed
/// * `Err(PlaybillError)` - The run could not start or the sink failed
pub async fn crawl(config: Config) -> Result<RunReport, PlaybillError> {
    run_crawl(config).await
}

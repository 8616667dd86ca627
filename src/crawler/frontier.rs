//! Crawl frontier: pending URLs, deduplication, retry accounting, dead letters
//!
//! The frontier is the single shared mutable resource of a run. It is used
//! behind a mutex; every method takes `&mut self` and relies on the caller
//! for exclusion, which is what makes the dedup invariant hold under
//! concurrent discovery: two enqueues of the same URL yield one entry.

use crate::extract::PageKind;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL waiting to be fetched, tagged with the extractor that will handle it
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    /// The URL to fetch
    pub url: Url,

    /// The page kind the URL was discovered as
    pub kind: PageKind,

    /// Fetch attempts made so far
    pub attempts: u32,
}

/// A URL permanently given up on, with the error that finished it
#[derive(Debug, Clone)]
pub struct DeadLetter {
    pub url: String,
    pub kind: PageKind,
    pub error: String,
}

/// Outcome of returning a transiently-failed entry to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequeueOutcome {
    /// The entry went back into the pending queue
    Requeued,

    /// The entry hit the retry ceiling and was dead-lettered
    DeadLettered,
}

/// The evolving set of discovered-but-not-yet-fetched URLs driving a run
///
/// Deduplication is by normalized URL string: once a URL has been enqueued it
/// is never enqueued again, whether pending, in flight, fetched, or
/// dead-lettered. The visited set grows monotonically for the lifetime of
/// one run and is discarded with the frontier.
#[derive(Debug)]
pub struct Frontier {
    pending: VecDeque<FrontierEntry>,
    seen: HashSet<String>,
    dead: Vec<DeadLetter>,
    retry_ceiling: u32,
}

impl Frontier {
    /// Creates an empty frontier with the given retry ceiling
    ///
    /// The ceiling counts total fetch attempts: an entry that has failed
    /// `retry_ceiling` times is dead-lettered rather than requeued.
    pub fn new(retry_ceiling: u32) -> Self {
        Self {
            pending: VecDeque::new(),
            seen: HashSet::new(),
            dead: Vec::new(),
            retry_ceiling,
        }
    }

    /// Adds a URL if it has never been seen
    ///
    /// # Returns
    ///
    /// Whether the URL was newly added. `false` means it was already pending,
    /// in flight, fetched, or dead-lettered.
    pub fn enqueue(&mut self, url: Url, kind: PageKind) -> bool {
        if !self.seen.insert(url.as_str().to_string()) {
            return false;
        }

        self.pending.push_back(FrontierEntry {
            url,
            kind,
            attempts: 0,
        });
        true
    }

    /// Removes and returns one pending entry, oldest first
    pub fn claim_next(&mut self) -> Option<FrontierEntry> {
        self.pending.pop_front()
    }

    /// Returns a transiently-failed entry to the queue, or dead-letters it
    /// once the retry ceiling is reached
    ///
    /// The attempt that just failed is counted here, so an entry claimed
    /// fresh (attempts = 0) and failed has one attempt on record.
    pub fn requeue(&mut self, mut entry: FrontierEntry, error: &str) -> RequeueOutcome {
        entry.attempts += 1;

        if entry.attempts >= self.retry_ceiling {
            tracing::warn!(
                "Dead-lettering {} after {} attempts: {}",
                entry.url,
                entry.attempts,
                error
            );
            self.dead.push(DeadLetter {
                url: entry.url.to_string(),
                kind: entry.kind,
                error: error.to_string(),
            });
            return RequeueOutcome::DeadLettered;
        }

        tracing::debug!(
            "Requeueing {} (attempt {} of {}): {}",
            entry.url,
            entry.attempts,
            self.retry_ceiling,
            error
        );
        self.pending.push_back(entry);
        RequeueOutcome::Requeued
    }

    /// Abandons an entry immediately, without consuming retries
    ///
    /// Used for permanent failures: 4xx responses, malformed URLs, and
    /// structural extraction errors.
    pub fn dead_letter(&mut self, entry: FrontierEntry, error: &str) {
        tracing::warn!("Dead-lettering {}: {}", entry.url, error);
        self.dead.push(DeadLetter {
            url: entry.url.to_string(),
            kind: entry.kind,
            error: error.to_string(),
        });
    }

    /// Returns the number of pending entries
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns whether the pending queue is empty
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns the dead-letter list accumulated so far
    pub fn dead_letters(&self) -> &[DeadLetter] {
        &self.dead
    }
}

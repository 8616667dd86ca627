//! Run report generation
//!
//! Emitted once when a crawl reaches its terminal state: counts for operator
//! visibility plus the dead-letter list, printable to the console and
//! exportable as markdown.

use crate::crawler::{CrawlState, DeadLetter};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Summary of one crawl run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run reached its terminal state
    pub finished_at: DateTime<Utc>,

    /// Wall-clock duration in seconds
    pub duration_seconds: u64,

    /// Completed fetch attempts, retries included
    pub fetched: u64,

    /// Pages fetched and extracted successfully
    pub succeeded: u64,

    /// Transient failures that went back into the frontier
    pub retried: u64,

    /// URLs permanently abandoned
    pub dead_lettered: u64,

    /// Credit records accepted by the sink
    pub records_emitted: u64,

    /// Terminal traversal state
    pub final_state: CrawlState,

    /// Every abandoned URL with its final error
    pub dead_letters: Vec<DeadLetter>,
}

impl RunReport {
    /// Returns whether this run should fail the process
    ///
    /// Dead letters never abort a run; under strict mode they turn the
    /// completed run into a failed one.
    pub fn is_failure(&self, strict: bool) -> bool {
        strict && !self.dead_letters.is_empty()
    }

    /// Formats the report as markdown
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Playbill Crawl Report\n\n");

        md.push_str("## Run Information\n\n");
        md.push_str(&format!("- **Started**: {}\n", self.started_at));
        md.push_str(&format!("- **Finished**: {}\n", self.finished_at));
        md.push_str(&format!(
            "- **Duration**: {} seconds\n",
            self.duration_seconds
        ));
        md.push_str(&format!("- **Final State**: {}\n\n", self.final_state));

        md.push_str("## Counts\n\n");
        md.push_str("| Metric | Count |\n");
        md.push_str("|--------|-------|\n");
        md.push_str(&format!("| Fetch attempts | {} |\n", self.fetched));
        md.push_str(&format!("| Pages extracted | {} |\n", self.succeeded));
        md.push_str(&format!("| Retries | {} |\n", self.retried));
        md.push_str(&format!("| Dead-lettered | {} |\n", self.dead_lettered));
        md.push_str(&format!("| Records emitted | {} |\n\n", self.records_emitted));

        md.push_str("## Dead Letters\n\n");
        if self.dead_letters.is_empty() {
            md.push_str("None.\n");
        } else {
            for letter in &self.dead_letters {
                md.push_str(&format!(
                    "- `{}` ({}): {}\n",
                    letter.url, letter.kind, letter.error
                ));
            }
        }

        md
    }

    /// Writes the markdown report to a file
    pub fn write_markdown(&self, path: &Path) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.to_markdown().as_bytes())?;
        Ok(())
    }
}

/// Prints a human-readable summary to stdout
pub fn print_report(report: &RunReport) {
    println!("=== Crawl Report ===\n");

    println!("Run:");
    println!("  Final state: {}", report.final_state);
    println!("  Duration: {}s", report.duration_seconds);
    println!();

    println!("Counts:");
    println!("  Fetch attempts: {}", report.fetched);
    println!("  Pages extracted: {}", report.succeeded);
    println!("  Retries: {}", report.retried);
    println!("  Dead-lettered: {}", report.dead_lettered);
    println!("  Records emitted: {}", report.records_emitted);
    println!();

    if !report.dead_letters.is_empty() {
        println!("Dead Letters ({}):", report.dead_letters.len());
        for letter in &report.dead_letters {
            println!("  - {} ({}): {}", letter.url, letter.kind, letter.error);
        }
        println!();
    }

    let success_rate = if report.fetched > 0 {
        (report.succeeded as f64 / report.fetched as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "Success Rate: {:.1}% ({} / {} fetch attempts)",
        success_rate, report.succeeded, report.fetched
    );
}

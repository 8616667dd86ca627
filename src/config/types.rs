use serde::Deserialize;

/// Main configuration structure for Playbill
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Film page the traversal starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-concurrent-fetches", default = "default_concurrency")]
    pub max_concurrent_fetches: u32,

    /// Total fetch attempts per URL before it is dead-lettered
    #[serde(rename = "retry-ceiling", default = "default_retry_ceiling")]
    pub retry_ceiling: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Delay between fetch dispatches in milliseconds
    #[serde(rename = "request-delay-ms", default)]
    pub request_delay_ms: u64,

    /// Fail the run when any URL was dead-lettered
    #[serde(default)]
    pub strict: bool,
}

fn default_concurrency() -> u32 {
    8
}

fn default_retry_ceiling() -> u32 {
    3
}

fn default_timeout_secs() -> u64 {
    30
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the JSON-lines records file
    #[serde(rename = "records-path")]
    pub records_path: String,

    /// Path to the markdown run report
    #[serde(rename = "report-path")]
    pub report_path: String,
}

//! Playbill: a polite filmography crawler
//!
//! Starting from a single film's page, Playbill follows the link to the
//! film's full cast listing, visits every credited actor's page, and emits
//! one record per (actor, title) credit, driving the traversal through an
//! explicit frontier with deduplication, retry, and dead-letter policy.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod sink;
pub mod url;

use thiserror::Error;

/// Main error type for Playbill operations
#[derive(Debug, Error)]
pub enum PlaybillError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Extraction error: {0}")]
    Extract(#[from] extract::ExtractError),

    #[error("Sink error: {0}")]
    Sink(#[from] sink::SinkError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for Playbill operations
pub type Result<T> = std::result::Result<T, PlaybillError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlState, StopHandle};
pub use extract::{Credit, PageKind};
pub use sink::{RecordSink, RunReport};
pub use url::{normalize_url, resolve_href};

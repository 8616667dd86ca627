//! HTTP fetching for the crawler
//!
//! The [`Fetcher`] trait is the seam between the coordinator and the
//! network; production runs use [`HttpFetcher`] on reqwest, tests substitute
//! their own. Failures are classified at this layer into transient
//! (retryable) and permanent, which is all the retry policy needs to know.

use crate::config::{CrawlConfig, UserAgentConfig};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value
    pub content_type: String,

    /// Page body
    pub body: String,
}

/// Fetch failures, split by whether a retry can help
#[derive(Debug, Error)]
pub enum FetchError {
    /// Worth retrying: timeouts, connection trouble, 5xx, 429
    #[error("transient fetch failure: {reason}")]
    Transient { reason: String },

    /// Retrying cannot help: 4xx, malformed responses, wrong content type
    #[error("permanent fetch failure: {reason}")]
    Permanent { reason: String },
}

impl FetchError {
    /// Returns true if the failure is worth retrying
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

/// The transport seam between the coordinator and the network
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches one URL, suspending on network I/O
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

/// Production fetcher backed by reqwest
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher with timeout and user agent from configuration
    pub fn new(crawl: &CrawlConfig, user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(crawl, user_agent)?;
        Ok(Self { client })
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `crawl` - Crawl configuration (per-request timeout)
/// * `user_agent` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    crawl: &CrawlConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let agent = format!(
        "{}/{} (+{}; {})",
        user_agent.crawler_name,
        user_agent.crawler_version,
        user_agent.contact_url,
        user_agent.contact_email
    );

    Client::builder()
        .user_agent(agent)
        .timeout(Duration::from_secs(crawl.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// Fetches a URL and classifies the outcome
    ///
    /// | Condition | Classification |
    /// |-----------|----------------|
    /// | Timeout, connection failure | Transient |
    /// | HTTP 5xx, HTTP 429 | Transient |
    /// | HTTP 4xx (other) | Permanent |
    /// | Content-Type not HTML | Permanent |
    /// | Body read failure | Transient |
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return Err(classify_request_error(&e)),
        };

        let status = response.status();
        let final_url = response.url().to_string();

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(FetchError::Transient {
                reason: format!("HTTP {}", status.as_u16()),
            });
        }

        if !status.is_success() {
            return Err(FetchError::Permanent {
                reason: format!("HTTP {}", status.as_u16()),
            });
        }

        // Check Content-Type; an empty header is tolerated, a non-HTML one
        // means the URL does not lead to a page we can extract from
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.is_empty() && !content_type.contains("text/html") {
            return Err(FetchError::Permanent {
                reason: format!("expected HTML, got {}", content_type),
            });
        }

        match response.text().await {
            Ok(body) => Ok(FetchedPage {
                final_url,
                status_code: status.as_u16(),
                content_type,
                body,
            }),
            Err(e) => Err(FetchError::Transient {
                reason: format!("body read failed: {}", e),
            }),
        }
    }
}

/// Classifies a reqwest error into the retry taxonomy
fn classify_request_error(error: &reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Transient {
            reason: "request timeout".to_string(),
        }
    } else if error.is_connect() {
        FetchError::Transient {
            reason: format!("connection failed: {}", error),
        }
    } else if error.is_builder() || error.is_request() {
        FetchError::Permanent {
            reason: error.to_string(),
        }
    } else {
        FetchError::Transient {
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> (CrawlConfig, UserAgentConfig) {
        (
            CrawlConfig {
                seed_url: "https://www.imdb.com/title/tt0111161/".to_string(),
                max_concurrent_fetches: 8,
                retry_ceiling: 3,
                request_timeout_secs: 30,
                request_delay_ms: 0,
                strict: false,
            },
            UserAgentConfig {
                crawler_name: "Playbill".to_string(),
                crawler_version: "0.1".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
        )
    }

    #[test]
    fn test_build_http_client() {
        let (crawl, user_agent) = create_test_config();
        let client = build_http_client(&crawl, &user_agent);
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_fetcher_new() {
        let (crawl, user_agent) = create_test_config();
        assert!(HttpFetcher::new(&crawl, &user_agent).is_ok());
    }

    #[test]
    fn test_is_transient() {
        let transient = FetchError::Transient {
            reason: "HTTP 503".to_string(),
        };
        let permanent = FetchError::Permanent {
            reason: "HTTP 404".to_string(),
        };

        assert!(transient.is_transient());
        assert!(!permanent.is_transient());
    }

    // Status-code classification is exercised end-to-end against a mock
    // server in tests/crawl_tests.rs
}

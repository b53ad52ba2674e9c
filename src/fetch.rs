//! Page retrieval for the source extractors.
//!
//! [`Fetch`] is the only capability the collectors need from the network.
//! [`HttpFetcher`] is the production implementation; tests substitute canned
//! pages.

use crate::error::FetchError;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::{debug, instrument};

/// Identifying header sent with every request. Several finance pages serve
/// an empty shell to unknown clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Retrieve the raw content behind a target URL.
pub trait Fetch {
    /// Fetch `target` and return its decoded body.
    ///
    /// Implementations must bound the wait; a timeout is reported as
    /// [`FetchError::Timeout`].
    async fn fetch(&self, target: &str) -> Result<String, FetchError>;
}

/// HTTP fetcher backed by one shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, target: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(target, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                target: target.to_string(),
                status: status.as_u16(),
            });
        }

        // `text()` decodes using the charset from Content-Type (EUC-KR on the finance pages).
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(target, e))?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Canned-page fetcher shared by the collector tests.

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves fixed bodies by URL; unknown URLs fail like an unreachable host.
    #[derive(Debug, Default)]
    pub struct StaticFetcher {
        pages: HashMap<String, String>,
        timeouts: Vec<String>,
        pub requested: Mutex<Vec<String>>,
    }

    impl StaticFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        pub fn with_timeout(mut self, url: &str) -> Self {
            self.timeouts.push(url.to_string());
            self
        }
    }

    impl Fetch for StaticFetcher {
        async fn fetch(&self, target: &str) -> Result<String, FetchError> {
            self.requested.lock().unwrap().push(target.to_string());
            if self.timeouts.iter().any(|t| t == target) {
                return Err(FetchError::Timeout {
                    target: target.to_string(),
                });
            }
            self.pages.get(target).cloned().ok_or(FetchError::Status {
                target: target.to_string(),
                status: 404,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StaticFetcher;
    use super::*;

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new(Duration::from_secs(15)).is_ok());
    }

    #[tokio::test]
    async fn test_static_fetcher_failure_kinds() {
        let fetcher = StaticFetcher::new()
            .with_page("https://a.test/", "<html></html>")
            .with_timeout("https://slow.test/");

        assert_eq!(fetcher.fetch("https://a.test/").await.unwrap(), "<html></html>");
        assert!(matches!(
            fetcher.fetch("https://slow.test/").await,
            Err(FetchError::Timeout { .. })
        ));
        assert!(matches!(
            fetcher.fetch("https://missing.test/").await,
            Err(FetchError::Status { status: 404, .. })
        ));
        assert_eq!(fetcher.requested.lock().unwrap().len(), 3);
    }
}

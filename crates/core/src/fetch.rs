//! Page retrieval from URLs, files, and stdin.
//!
//! Fetching sits outside the extraction engine: it only produces the HTML
//! text that [`Document::parse`](crate::Document::parse) consumes. There are
//! no retries here; a failed fetch simply fails the poll cycle.

use std::fs;
use std::path::PathBuf;

use crate::{FlatscoutError, Result};

#[cfg(feature = "fetch")]
pub use self::http::{FetchConfig, fetch_url};

#[cfg(feature = "fetch")]
mod http {
    use std::time::Duration;

    use reqwest::Client;
    use url::Url;

    use crate::{FlatscoutError, Result};

    /// HTTP client configuration for fetching listing pages.
    #[derive(Debug, Clone)]
    pub struct FetchConfig {
        /// Request timeout in seconds.
        pub timeout: u64,
        /// Custom User-Agent string.
        pub user_agent: String,
    }

    impl Default for FetchConfig {
        fn default() -> Self {
            Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; Flatscout/0.1)".to_string() }
        }
    }

    /// Fetches HTML content from a URL.
    ///
    /// Performs a single GET request and returns the body as text. Non-success
    /// status codes are reported as errors instead of being parsed.
    pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
        let parsed_url = Url::parse(url).map_err(|e| FlatscoutError::InvalidUrl(e.to_string()))?;

        if !matches!(parsed_url.scheme(), "http" | "https") {
            return Err(FlatscoutError::InvalidUrl(format!(
                "unsupported scheme `{}` (expected http or https)",
                parsed_url.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(FlatscoutError::HttpError)?;

        tracing::debug!(url = %parsed_url, "fetching listing page");

        let response = client
            .get(parsed_url)
            .header("User-Agent", &config.user_agent)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "de-DE,de;q=0.9,en;q=0.8")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FlatscoutError::Timeout { timeout: config.timeout }
                } else {
                    FlatscoutError::HttpError(e)
                }
            })?
            .error_for_status()?;

        let content = response.text().await?;

        Ok(content)
    }
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(FlatscoutError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(FlatscoutError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("Flatscout"));
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_fetch_url_invalid() {
        let result = fetch_url("not-a-url", &FetchConfig::default()).await;
        assert!(matches!(result, Err(FlatscoutError::InvalidUrl(_))));
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_fetch_url_rejects_other_schemes() {
        let result = fetch_url("ftp://example.org/list.html", &FetchConfig::default()).await;
        assert!(matches!(result, Err(FlatscoutError::InvalidUrl(msg)) if msg.contains("ftp")));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.html");
        assert!(matches!(result, Err(FlatscoutError::FileNotFound(_))));
    }

    #[test]
    fn test_fetch_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<html><body>Listings</body></html>").unwrap();

        let content = fetch_file(file.path().to_str().unwrap()).unwrap();
        assert!(content.contains("Listings"));
    }
}

use crate::config::FetchConfig;
use crate::crawlers::crawler::PageFetcher;
use crate::error::FetchError;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;

/// Page fetcher that renders pages in a WebDriver session
///
/// Useful for sites that build their content with JavaScript. The session is
/// opened on the first fetch, reused for later ones, and closed by
/// [`PageFetcher::shutdown`]. WebDriver reports no HTTP status or content
/// type, so only navigation and source failures are surfaced.
pub struct WebDriverFetcher {
    webdriver_url: String,
    delay: Duration,
    page_timeout: Duration,
    client: Mutex<Option<Client>>,
}

impl WebDriverFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            delay: Duration::from_millis(config.delay_ms),
            page_timeout: Duration::from_secs(config.timeout_secs),
            client: Mutex::new(None),
        }
    }

    pub fn webdriver_url(&self) -> &str {
        &self.webdriver_url
    }

    /// Navigate and read the rendered source
    async fn render(&self, client: &Client, url: &str) -> Result<String, FetchError> {
        let navigation = timeout(self.page_timeout, async {
            client
                .goto(url)
                .await
                .map_err(|e| navigation_error(e, "accessing", url))?;
            client
                .source()
                .await
                .map_err(|e| navigation_error(e, "getting source for", url))
        })
        .await;

        match navigation {
            Ok(result) => result,
            Err(_) => {
                ::log::error!("Timeout rendering: {}", url);
                Err(FetchError::Timeout {
                    url: url.to_string(),
                })
            }
        }
    }
}

#[async_trait]
impl PageFetcher for WebDriverFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        ::log::info!("Rendering page {} via WebDriver", url);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut guard = self.client.lock().await;

        // Lazily initialize the WebDriver client
        if guard.is_none() {
            *guard = Some(connect_to_webdriver(&self.webdriver_url, url).await?);
        }
        let Some(client) = guard.as_ref() else {
            return Err(FetchError::WebDriver {
                url: url.to_string(),
                message: "no WebDriver session".to_string(),
            });
        };

        let result = self.render(client, url).await;

        // A lost session is replaced once before giving up on the page
        if let Err(FetchError::WebDriver { message, .. }) = &result {
            if message.contains("Unable to find session") {
                ::log::warn!("WebDriver session lost, reconnecting to {}", self.webdriver_url);
                let fresh = connect_to_webdriver(&self.webdriver_url, url).await?;
                let retried = self.render(&fresh, url).await;
                *guard = Some(fresh);
                return retried;
            }
        }

        result
    }

    async fn shutdown(&self) {
        if let Some(client) = self.client.lock().await.take() {
            if let Err(e) = client.close().await {
                ::log::warn!("Failed to close WebDriver session: {}", e);
            }
        }
    }
}

/// Connects to the WebDriver instance
async fn connect_to_webdriver(webdriver_url: &str, page_url: &str) -> Result<Client, FetchError> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            Ok(client)
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            ::log::error!(
                "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
            );
            Err(FetchError::WebDriver {
                url: page_url.to_string(),
                message: format!("cannot connect to {}: {}", webdriver_url, e),
            })
        }
    }
}

/// Converts navigation or page source errors into a fetch failure
fn navigation_error(error: fantoccini::error::CmdError, context: &str, url: &str) -> FetchError {
    let message = error.to_string();
    if message.contains("Unable to find session") {
        ::log::warn!("Lost session while {} {}", context, url);
    } else {
        ::log::error!("Failed {} {}: {}", context, url, message);
    }
    FetchError::WebDriver {
        url: url.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_webdriver_is_a_fetch_failure() {
        let config = FetchConfig {
            delay_ms: 0,
            webdriver_url: "http://127.0.0.1:9".to_string(),
            ..FetchConfig::default()
        };
        let fetcher = WebDriverFetcher::new(&config);
        assert_eq!(fetcher.webdriver_url(), "http://127.0.0.1:9");

        let err = fetcher.fetch("https://acme.test/").await.unwrap_err();
        assert!(matches!(err, FetchError::WebDriver { .. }));
        assert_eq!(err.url(), "https://acme.test/");

        // Nothing to close, must not panic
        fetcher.shutdown().await;
    }
}

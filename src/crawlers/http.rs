use crate::config::FetchConfig;
use crate::crawlers::crawler::PageFetcher;
use crate::error::{Error, FetchError};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;
use url::Url;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Plain HTTP page fetcher with a fixed politeness delay
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    delay: Duration,
}

impl HttpFetcher {
    /// Build a fetcher from configuration
    pub fn new(config: &FetchConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        let accept_language = HeaderValue::from_str(&config.accept_language)
            .map_err(|e| Error::Config(format!("invalid accept_language: {}", e)))?;
        headers.insert(ACCEPT_LANGUAGE, accept_language);

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            delay: Duration::from_millis(config.delay_ms),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        ::log::info!("Fetching page {}", url);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.to_lowercase().contains("html") {
            return Err(FetchError::NotHtml {
                url: url.to_string(),
                content_type,
            });
        }

        let body = resp.text().await.map_err(|e| request_error(url, e))?;
        ::log::debug!("Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }

    /// Informational only: the result is logged and never enforced.
    async fn robots_txt(&self, base_url: &Url) -> Option<String> {
        let robots_url = base_url.join("/robots.txt").ok()?;

        match self.client.get(robots_url.as_str()).send().await {
            Ok(resp) if resp.status().is_success() => {
                ::log::info!("robots.txt found at {}", robots_url);
                match resp.text().await {
                    Ok(body) => Some(body),
                    Err(e) => {
                        ::log::warn!("Could not read robots.txt at {}: {}", robots_url, e);
                        None
                    }
                }
            }
            Ok(resp) => {
                ::log::info!("No robots.txt at {} (HTTP {})", robots_url, resp.status());
                None
            }
            Err(e) => {
                ::log::warn!("Could not check robots.txt at {}: {}", robots_url, e);
                None
            }
        }
    }
}

fn request_error(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            source: err,
        }
    }
}

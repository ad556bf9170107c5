use crate::crawlers::crawler::PageFetcher;
use crate::error::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves pages from memory; unknown URLs answer HTTP 404
///
/// Useful for offline runs and for exercising the pipeline without a network.
/// URLs are matched exactly, so register both `https://site` and
/// `https://site/` when either form may be requested.
#[derive(Debug, Default)]
pub struct CannedFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl CannedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// URLs requested so far, in order
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|requested| requested.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PageFetcher for CannedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(url.to_string());
        }

        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_known_pages_only() {
        let fetcher = CannedFetcher::new().with_page("https://acme.test/about", "<h1>About</h1>");

        assert_eq!(
            fetcher.fetch("https://acme.test/about").await.unwrap(),
            "<h1>About</h1>"
        );
        let err = fetcher.fetch("https://acme.test/missing").await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(
            fetcher.requested(),
            vec!["https://acme.test/about", "https://acme.test/missing"]
        );
    }
}

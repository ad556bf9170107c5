use crate::error::FetchError;
use async_trait::async_trait;
use url::Url;

/// Downloads a single page and returns its HTML
///
/// Implementations apply their own politeness delay before every page fetch
/// and report HTTP, content-type and network failures as distinct
/// [`FetchError`] variants. Whether a failure is fatal is the caller's call.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page at `url`
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;

    /// Fetch `/robots.txt` for the site of `base_url`, if the fetcher can
    async fn robots_txt(&self, _base_url: &Url) -> Option<String> {
        None
    }

    /// Release any resources held across fetches (sessions, connections)
    async fn shutdown(&self) {}
}

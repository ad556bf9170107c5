pub mod canned;
pub mod crawler;
pub mod http;
pub mod web;

pub use canned::CannedFetcher;
pub use crawler::PageFetcher;
pub use http::HttpFetcher;
pub use web::WebDriverFetcher;

use crate::config::{FetchConfig, Renderer};
use crate::error::{Error, Result};
use crate::filter::UrlFilter;
use crate::parsers;
use std::sync::Arc;
use url::Url;

/// Build the fetcher selected by `config.renderer`
pub fn build_fetcher(config: &FetchConfig) -> Result<Arc<dyn PageFetcher>> {
    match config.renderer {
        Renderer::Http => Ok(Arc::new(HttpFetcher::new(config)?)),
        Renderer::WebDriver => {
            ::log::info!(
                "Rendering pages through WebDriver at {} (set WEBDRIVER_URL to override)",
                config.webdriver_url
            );
            Ok(Arc::new(WebDriverFetcher::new(config)))
        }
    }
}

/// Parse a user-supplied site URL
pub fn parse_base_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).map_err(|source| Error::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
        return Err(Error::InvalidUrl {
            url: url.to_string(),
            source: url::ParseError::EmptyHost,
        });
    }
    Ok(parsed)
}

/// Download the home page and list its same-site links
///
/// A home page failure is fatal: without it there is nothing to build from.
/// Links are resolved, deduplicated and narrowed to the base host and its
/// subdomains.
pub async fn scrape(fetcher: &dyn PageFetcher, url: &str) -> Result<(String, Vec<String>)> {
    let base = parse_base_url(url)?;

    let html = fetcher.fetch(url).await.map_err(|e| {
        ::log::error!("Home page could not be fetched: {}", e);
        Error::HomePage(e)
    })?;

    let raw_links = parsers::extract_links(&html, url);
    let links = match UrlFilter::for_site(&base) {
        Some(filter) => filter.same_site_links(&raw_links),
        None => Vec::new(),
    };

    ::log::info!(
        "Main page scraped: {} raw links, {} on site",
        raw_links.len(),
        links.len()
    );
    Ok((html, links))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    #[tokio::test]
    async fn test_scrape_returns_same_site_links() {
        let home = r##"<title>Acme — Home</title>
            <a href="/about">About</a>
            <a href="/privacy">Privacy</a>
            <a href="https://external.example/x">Elsewhere</a>
            <a href="#top">Top</a>"##;
        let fetcher = CannedFetcher::new().with_page("https://acme.test", home);

        let (html, links) = scrape(&fetcher, "https://acme.test").await.unwrap();
        assert_eq!(html, home);
        assert_eq!(
            links,
            vec!["https://acme.test/about", "https://acme.test/privacy"]
        );
    }

    #[tokio::test]
    async fn test_scrape_home_failure_is_fatal() {
        let fetcher = CannedFetcher::new();
        let err = scrape(&fetcher, "https://acme.test").await.unwrap_err();
        assert!(matches!(err, Error::HomePage(FetchError::Status { status: 404, .. })));
    }

    #[test]
    fn test_parse_base_url() {
        assert!(parse_base_url("https://acme.test").is_ok());
        assert!(parse_base_url("  http://acme.test/en  ").is_ok());
        assert!(matches!(parse_base_url("acme.test"), Err(Error::InvalidUrl { .. })));
        assert!(matches!(parse_base_url("ftp://acme.test"), Err(Error::InvalidUrl { .. })));
        assert!(matches!(parse_base_url("mailto:x@acme.test"), Err(Error::InvalidUrl { .. })));
    }

    #[test]
    fn test_build_fetcher_for_each_renderer() {
        let mut config = FetchConfig::default();
        assert!(build_fetcher(&config).is_ok());
        config.renderer = Renderer::WebDriver;
        assert!(build_fetcher(&config).is_ok());
    }
}

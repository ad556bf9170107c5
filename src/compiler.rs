//! Page compilation
//!
//! Turns a link selection into [`PageRecord`]s: the home page first, built
//! from the HTML already downloaded by the scrape step, then one record per
//! selected link that could be fetched.

use crate::crawlers::PageFetcher;
use crate::filter::UrlFilter;
use crate::parsers::{clean_text, extract_metadata};
use crate::results::{LinkSelection, PageRecord};
use url::Url;

/// Build a record from a page's HTML
pub fn page_record(page_type: &str, url: &str, html: &str) -> PageRecord {
    let content = clean_text(html);
    let metadata = extract_metadata(html);
    let summary = PageRecord::derive_summary(&metadata.description, &content);

    PageRecord {
        page_type: page_type.to_string(),
        url: url.to_string(),
        content,
        title: metadata.title,
        headings: metadata.headings,
        description: metadata.description,
        summary,
    }
}

/// Fetch every selected page and compile it alongside the home page
///
/// The home record always comes first and keeps `base_url` exactly as given.
/// Selected links that resolve to the home page are skipped, and so is any
/// page that fails to download. Any other link typed `home` is compiled as a
/// plain `page`, so the first record is the only home record.
pub async fn compile(
    fetcher: &dyn PageFetcher,
    selection: &LinkSelection,
    home_html: &str,
    base_url: &str,
) -> Vec<PageRecord> {
    let mut pages = vec![page_record("home", base_url, home_html)];

    let site = Url::parse(base_url)
        .ok()
        .and_then(|base| UrlFilter::for_site(&base));

    for link in &selection.links {
        let is_home = match &site {
            Some(site) => site.normalize(&link.url).is_some_and(|url| site.is_home(&url)),
            None => link.url == base_url,
        };
        if is_home {
            ::log::debug!("Skipping {}: same as home page", link.url);
            continue;
        }

        match fetcher.fetch(&link.url).await {
            Ok(html) => {
                let page_type = if link.page_type == "home" {
                    ::log::debug!("Retagging {} as page: home is already compiled", link.url);
                    "page"
                } else {
                    link.page_type.as_str()
                };
                let record = page_record(page_type, &link.url, &html);
                ::log::info!(
                    "Compiled {} page {} ({} chars)",
                    record.page_type,
                    record.url,
                    record.content.chars().count()
                );
                pages.push(record);
            }
            Err(e) => {
                ::log::warn!("Skipping {} page: {}", link.page_type, e);
            }
        }
    }

    ::log::info!(
        "Compiled {} pages ({} selected)",
        pages.len(),
        selection.len()
    );
    pages
}

/// Recompute any empty summary from its page's description or content
pub fn backfill_summaries(pages: &mut [PageRecord]) {
    for page in pages.iter_mut().filter(|p| p.summary.is_empty()) {
        page.summary = PageRecord::derive_summary(&page.description, &page.content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawlers::CannedFetcher;
    use crate::results::SelectedLink;

    const HOME: &str = r#"<html><head><title>Acme</title>
        <meta name="description" content="Acme builds rockets."></head>
        <body><h1>Welcome</h1><p>Rockets for everyone.</p></body></html>"#;

    const ABOUT: &str = r#"<html><head><title>About Acme</title></head>
        <body><nav>Menu</nav><h1>About us</h1><h2>History</h2>
        <p>Founded in 1999.</p><script>track()</script></body></html>"#;

    fn selection(links: &[(&str, &str)]) -> LinkSelection {
        LinkSelection::new(
            links
                .iter()
                .map(|(page_type, url)| SelectedLink::new(*page_type, *url))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_home_record_comes_first() {
        let fetcher = CannedFetcher::new().with_page("https://acme.test/about", ABOUT);
        let pages = compile(
            &fetcher,
            &selection(&[("about page", "https://acme.test/about")]),
            HOME,
            "https://acme.test",
        )
        .await;

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_type, "home");
        assert_eq!(pages[0].url, "https://acme.test");
        assert_eq!(pages[0].title, "Acme");
        assert_eq!(pages[0].summary, "Acme builds rockets.");

        let about = &pages[1];
        assert_eq!(about.page_type, "about page");
        assert_eq!(about.headings, vec!["About us", "History"]);
        assert!(about.content.contains("Founded in 1999."));
        assert!(!about.content.contains("Menu"));
        assert!(!about.content.contains("track()"));
        // No description, and the content is short enough to be its own summary
        assert_eq!(about.summary, about.content);
    }

    #[tokio::test]
    async fn test_failed_pages_are_skipped() {
        let fetcher = CannedFetcher::new().with_page("https://acme.test/about", ABOUT);
        let pages = compile(
            &fetcher,
            &selection(&[
                ("careers", "https://acme.test/careers"),
                ("about page", "https://acme.test/about"),
            ]),
            HOME,
            "https://acme.test",
        )
        .await;

        let types: Vec<_> = pages.iter().map(|p| p.page_type.as_str()).collect();
        assert_eq!(types, vec!["home", "about page"]);
    }

    #[tokio::test]
    async fn test_links_to_home_are_not_fetched_again() {
        let fetcher = CannedFetcher::new();
        let pages = compile(
            &fetcher,
            &selection(&[("home", "https://acme.test/"), ("home", "https://acme.test/#top")]),
            HOME,
            "https://acme.test",
        )
        .await;

        assert_eq!(pages.len(), 1);
        assert!(fetcher.requested().is_empty());
    }

    #[tokio::test]
    async fn test_home_variants_yield_one_home_record() {
        let fetcher = CannedFetcher::new()
            .with_page("https://acme.test/", HOME)
            .with_page("https://acme.test/landing", HOME);
        let pages = compile(
            &fetcher,
            &selection(&[
                ("home", "https://acme.test/"),
                ("home", "https://www.acme.test/?ref=nav"),
                ("home", "https://acme.test/landing"),
            ]),
            HOME,
            "https://www.acme.test",
        )
        .await;

        let homes: Vec<_> = pages.iter().filter(|p| p.page_type == "home").collect();
        assert_eq!(homes.len(), 1);
        assert_eq!(homes[0].url, "https://www.acme.test");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].page_type, "page");
        assert_eq!(fetcher.requested(), vec!["https://acme.test/landing"]);
    }

    #[tokio::test]
    async fn test_empty_selection_yields_home_only() {
        let fetcher = CannedFetcher::new();
        let pages = compile(&fetcher, &LinkSelection::empty(), HOME, "https://acme.test").await;
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_type, "home");
    }

    #[test]
    fn test_backfill_summaries() {
        let mut pages = vec![
            page_record("home", "https://acme.test", HOME),
            page_record("about page", "https://acme.test/about", ABOUT),
        ];
        pages[0].summary.clear();
        pages[1].summary.clear();
        pages[1].content = "é".repeat(700);

        backfill_summaries(&mut pages);
        assert_eq!(pages[0].summary, "Acme builds rockets.");
        assert_eq!(pages[1].summary.chars().count(), 600);
    }
}

//! Link selection
//!
//! Reduces the raw links of a home page to a small, typed, same-site set that
//! is worth reading for a brochure. Two strategies share the
//! [`LinkSelector`] contract:
//!
//! - [`HeuristicSelector`]: keyword scoring on URL paths, no backend needed
//! - [`BackendSelector`]: asks the generation backend and re-validates the reply
//!
//! Which one runs is decided by [`Mode`](crate::config::Mode), never by the
//! selectors themselves.

pub mod backend;
pub mod heuristic;

pub use backend::{BackendSelector, parse_selection};
pub use heuristic::HeuristicSelector;

use crate::results::{LinkSelection, SelectedLink};
use async_trait::async_trait;
use url::Url;

/// Produce a link selection for a site
#[async_trait]
pub trait LinkSelector: Send + Sync {
    /// Select brochure-relevant links among `raw_links` found on `base_url`
    ///
    /// Never fails: a selector with nothing to offer returns an empty (or, for
    /// the heuristic, home-only) selection.
    async fn select(&self, base_url: &Url, raw_links: &[String]) -> LinkSelection;
}

/// Sort by score (missing scores count as zero) and keep the first `max_links`
///
/// The sort is stable, so equally scored links keep their discovery order.
pub(crate) fn rank_and_cap(mut links: Vec<SelectedLink>, max_links: usize) -> LinkSelection {
    links.sort_by(|a, b| b.score.unwrap_or(0).cmp(&a.score.unwrap_or(0)));
    links.truncate(max_links);
    LinkSelection::new(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_and_cap_is_stable() {
        let links = vec![
            SelectedLink::new("blog", "https://acme.test/blog").with_score(70),
            SelectedLink::new("about", "https://acme.test/about").with_score(95),
            SelectedLink::new("news", "https://acme.test/news").with_score(70),
            SelectedLink::new("page", "https://acme.test/x"),
        ];
        let ranked = rank_and_cap(links, 3);
        let urls: Vec<_> = ranked.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://acme.test/about",
                "https://acme.test/blog",
                "https://acme.test/news"
            ]
        );
    }
}

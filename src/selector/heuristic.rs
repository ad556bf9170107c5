use crate::config::SelectorConfig;
use crate::filter::{UrlFilter, dedupe_keep_order};
use crate::results::{LinkSelection, SelectedLink};
use crate::selector::{LinkSelector, rank_and_cap};
use async_trait::async_trait;
use regex::Regex;
use url::Url;

/// Offline selector scoring URL paths against keyword rules
#[derive(Debug)]
pub struct HeuristicSelector {
    rules: Vec<(Regex, u8, String)>,
    exclude_patterns: Vec<String>,
    min_score: u8,
    default_score: u8,
    max_links: usize,
}

impl HeuristicSelector {
    /// Compile the configured rules
    pub fn new(config: &SelectorConfig) -> Result<Self, regex::Error> {
        let mut rules = Vec::with_capacity(config.rules.len());
        for rule in &config.rules {
            rules.push((Regex::new(&rule.pattern)?, rule.score, rule.page_type.clone()));
        }

        // Surface bad exclusion patterns at construction time
        for pattern in &config.exclude_patterns {
            Regex::new(pattern)?;
        }

        Ok(Self {
            rules,
            exclude_patterns: config.exclude_patterns.clone(),
            min_score: config.min_score,
            default_score: config.default_score,
            max_links: config.max_links,
        })
    }

    /// Score and page type for a URL; the first matching rule wins
    pub fn score(&self, url: &Url) -> (u8, Option<&str>) {
        let path = url.path().to_lowercase();
        self.rules
            .iter()
            .find(|(regex, _, _)| regex.is_match(&path))
            .map(|(_, score, page_type)| (*score, Some(page_type.as_str())))
            .unwrap_or((self.default_score, None))
    }

    fn home_only(base_url: &Url) -> LinkSelection {
        let mut home = base_url.clone();
        home.set_fragment(None);
        LinkSelection::new(vec![
            SelectedLink::new("home", String::from(home))
                .with_rationale("No link passed the keyword threshold; using the home page"),
        ])
    }
}

#[async_trait]
impl LinkSelector for HeuristicSelector {
    async fn select(&self, base_url: &Url, raw_links: &[String]) -> LinkSelection {
        ::log::info!("Heuristic link selector: {} input links", raw_links.len());

        let filter = match UrlFilter::new(base_url, &self.exclude_patterns) {
            Ok(Some(filter)) => filter,
            Ok(None) => {
                ::log::warn!("Base URL {} has no host; using it alone", base_url);
                return Self::home_only(base_url);
            }
            Err(e) => {
                ::log::error!("Invalid exclusion pattern: {}", e);
                return Self::home_only(base_url);
            }
        };

        let candidates = dedupe_keep_order(
            raw_links
                .iter()
                .filter_map(|link| filter.normalize(link))
                .filter(|url| filter.should_select(url))
                .map(String::from),
        );

        let mut scored = Vec::new();
        for candidate in candidates {
            let Ok(url) = Url::parse(&candidate) else {
                continue;
            };
            let (score, page_type) = self.score(&url);
            if score < self.min_score {
                ::log::debug!("Dropping {} (score {})", candidate, score);
                continue;
            }
            scored.push(
                SelectedLink::new(page_type.unwrap_or("page"), candidate)
                    .with_score(score)
                    .with_rationale("Matched brochure keyword heuristic"),
            );
        }

        let selection = rank_and_cap(scored, self.max_links);
        if selection.is_empty() {
            ::log::info!("Heuristic link selector: nothing above threshold, using home page");
            return Self::home_only(base_url);
        }

        ::log::info!(
            "Heuristic link selector: {} links selected ({})",
            selection.len(),
            selection.page_types()
        );
        selection
    }
}

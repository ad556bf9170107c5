use crate::filter::UrlFilter;
use crate::llm::CompletionBackend;
use crate::results::{LinkSelection, SelectedLink};
use crate::selector::{LinkSelector, rank_and_cap};
use crate::utils::{estimate_tokens, truncate_chars};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// Characters of an unparsable reply kept in the error log
const RAW_EXCERPT_CHARS: usize = 200;

/// Selector that lets the generation backend pick the links
pub struct BackendSelector {
    backend: Arc<dyn CompletionBackend>,
    max_links: usize,
}

impl BackendSelector {
    pub fn new(backend: Arc<dyn CompletionBackend>, max_links: usize) -> Self {
        Self { backend, max_links }
    }

    fn system_prompt(host: &str, max_links: usize) -> String {
        format!(
            r#"You select the links of a company website that are most useful for writing a corporate brochure.

STRICT RULES:
- Reply with valid JSON only, no extra text or comments.
- Required shape:
  {{"links": [{{"type": "...", "url": "...", "score": 0-100, "rationale": "..."}}]}}
- Only include links on the SAME DOMAIN as {host} (same host or its subdomains).
- Priority, roughly in this order:
  - About / Company / Team
  - Community / Ecosystem
  - Careers / Jobs
  - Customers / Clients / Success stories
  - Partners / Alliances
  - Press / News
  - Blog / Insights / Articles
- ALWAYS exclude:
  - login, signup, sign-in, register
  - privacy, terms, conditions, cookies
  - in-page anchors (#something), mail (mailto:) and phone (tel:) links
  - cart, checkout, pricing or demo pages that say nothing about the company
- Turn relative links into absolute ones using the base URL.
- At most {max_links} links."#
        )
    }

    /// Few-shot exchanges followed by the real request, as one tagged transcript
    fn user_prompt(base_url: &Url, links: &[String]) -> String {
        let examples = [
            (
                "https://example.com",
                vec![
                    "https://example.com/",
                    "https://example.com/about",
                    "https://example.com/careers",
                    "https://example.com/privacy",
                    "https://example.com/login",
                ],
                json!({"links": [
                    {"type": "home", "url": "https://example.com/", "score": 85,
                     "rationale": "Main landing page of the company."},
                    {"type": "about", "url": "https://example.com/about", "score": 95,
                     "rationale": "About page with key company information."},
                    {"type": "careers", "url": "https://example.com/careers", "score": 88,
                     "rationale": "Jobs and culture section."}
                ]}),
            ),
            (
                "https://contoso.io",
                vec![
                    "https://contoso.io/",
                    "https://contoso.io/customers",
                    "https://contoso.io/blog",
                    "https://contoso.io/terms",
                ],
                json!({"links": [
                    {"type": "home", "url": "https://contoso.io/", "score": 85,
                     "rationale": "Company front page."},
                    {"type": "customers", "url": "https://contoso.io/customers", "score": 92,
                     "rationale": "Customer stories and references."},
                    {"type": "blog", "url": "https://contoso.io/blog", "score": 80,
                     "rationale": "Articles that show expertise."}
                ]}),
            ),
        ];

        let mut prompt = String::new();
        for (base, found, answer) in examples {
            prompt.push_str(&format!(
                "[USER]\nBase URL: {}\n\nLinks found:\n{}\n\n[ASSISTANT]\n{}\n\n",
                base,
                found.join("\n"),
                answer
            ));
        }
        prompt.push_str(&format!(
            "[USER]\nBase URL: {}\n\nLinks found:\n{}",
            base_url,
            links.join("\n")
        ));
        prompt
    }
}

#[async_trait]
impl LinkSelector for BackendSelector {
    async fn select(&self, base_url: &Url, raw_links: &[String]) -> LinkSelection {
        let Some(filter) = UrlFilter::for_site(base_url) else {
            ::log::warn!("Base URL {} has no host; nothing to select", base_url);
            return LinkSelection::empty();
        };

        let links = filter.same_site_links(raw_links);
        ::log::info!("Backend link selector: {} same-site links", links.len());
        if links.is_empty() {
            ::log::warn!("No same-site links to choose from; returning an empty selection");
            return LinkSelection::empty();
        }

        let system = Self::system_prompt(filter.host(), self.max_links);
        let user = Self::user_prompt(base_url, &links);
        ::log::debug!(
            "Link selection prompt: {} chars (~{} tokens)",
            system.len() + user.len(),
            estimate_tokens(&system) + estimate_tokens(&user)
        );

        match self.backend.complete(&system, &user).await {
            Ok(raw) => {
                let selection = parse_selection(&raw, base_url, self.max_links);
                ::log::info!(
                    "Backend link selector: {} links kept after validation",
                    selection.len()
                );
                selection
            }
            Err(e) => {
                ::log::warn!("Link selection request failed, continuing without links: {}", e);
                LinkSelection::empty()
            }
        }
    }
}

/// Parse and re-validate a backend reply
///
/// The reply is untrusted: the JSON object is taken from the first `{` to the
/// last `}`, and every entry is re-normalized against `base_url`, checked for
/// site membership and deduplicated. Anything unusable yields an empty
/// selection.
pub fn parse_selection(raw: &str, base_url: &Url, max_links: usize) -> LinkSelection {
    if raw.trim().is_empty() {
        ::log::warn!("Backend returned an empty link selection");
        return LinkSelection::empty();
    }

    let json_text = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if end > start => &raw[start..=end],
        _ => raw,
    };

    let data: Value = match serde_json::from_str(json_text) {
        Ok(data) => data,
        Err(e) => {
            ::log::error!(
                "Could not parse link selection as JSON ({}): {}",
                e,
                truncate_chars(raw, RAW_EXCERPT_CHARS)
            );
            return LinkSelection::empty();
        }
    };

    let Some(items) = data.get("links").and_then(Value::as_array) else {
        ::log::warn!("Link selection has no 'links' array");
        return LinkSelection::empty();
    };

    let Some(filter) = UrlFilter::for_site(base_url) else {
        return LinkSelection::empty();
    };

    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();
    for item in items.iter().filter_map(Value::as_object) {
        let href = match item.get("url") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.as_str(),
            _ => continue,
        };
        let Some(url) = filter.normalize(href) else {
            continue;
        };
        if !filter.is_same_site(&url) {
            ::log::debug!("Dropping off-site link from selection: {}", url);
            continue;
        }
        let url = String::from(url);
        if !seen.insert(url.clone()) {
            continue;
        }

        let page_type = match item.get("type") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            _ => "page".to_string(),
        };

        let mut link = SelectedLink::new(page_type, url).with_score(coerce_score(item.get("score")));
        if let Some(rationale) = item.get("rationale").and_then(Value::as_str) {
            let rationale = rationale.trim();
            if !rationale.is_empty() {
                link = link.with_rationale(rationale);
            }
        }
        cleaned.push(link);
    }

    rank_and_cap(cleaned, max_links)
}

/// Integer score clamped to 0..=100; anything unusable is 0
fn coerce_score(value: Option<&Value>) -> u8 {
    let score = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    };
    score.unwrap_or(0).clamp(0, 100) as u8
}

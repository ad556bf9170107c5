use regex::Regex;
use std::collections::HashSet;
use url::Url;

/// Host with a leading `www.` removed, lowercased
pub fn site_host(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").map(str::to_string).unwrap_or(host);
    if host.is_empty() { None } else { Some(host) }
}

/// Resolve `href` against `base` and strip the fragment
///
/// Returns `None` for anything that does not end up with a network host
/// (`mailto:`, `tel:`, `javascript:`, unparsable input).
pub fn normalize_url(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    resolved.set_fragment(None);

    match resolved.host_str() {
        Some(host) if !host.is_empty() => Some(resolved),
        _ => None,
    }
}

/// Remove duplicates, keeping the first occurrence of each entry
pub fn dedupe_keep_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Decides which URLs belong to a site and which of those are worth selecting
#[derive(Debug)]
pub struct UrlFilter {
    base: Url,
    host: String,
    exclude_regexes: Vec<Regex>,
}

impl UrlFilter {
    /// Create a filter for the site rooted at `base` with exclusion patterns
    ///
    /// Returns `None` when `base` has no host, since no URL could be same-site.
    pub fn new(base: &Url, exclude_patterns: &[String]) -> Result<Option<Self>, regex::Error> {
        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(site_host(base).map(|host| Self {
            base: base.clone(),
            host,
            exclude_regexes,
        }))
    }

    /// Filter that only checks site membership
    pub fn for_site(base: &Url) -> Option<Self> {
        site_host(base).map(|host| Self {
            base: base.clone(),
            host,
            exclude_regexes: Vec::new(),
        })
    }

    /// The base host without `www.`
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Resolve an href against the site's base URL
    pub fn normalize(&self, href: &str) -> Option<Url> {
        normalize_url(href, &self.base)
    }

    /// Host equals the base host or is one of its subdomains
    pub fn is_same_site(&self, url: &Url) -> bool {
        match site_host(url) {
            Some(host) => host == self.host || host.ends_with(&format!(".{}", self.host)),
            None => false,
        }
    }

    /// Whether any exclusion pattern matches the URL
    pub fn is_excluded(&self, url: &Url) -> bool {
        let url_str = url.as_str();
        self.exclude_regexes.iter().any(|regex| regex.is_match(url_str))
    }

    /// Same-site and not excluded
    pub fn should_select(&self, url: &Url) -> bool {
        self.is_same_site(url) && !self.is_excluded(url)
    }

    /// Normalize, keep same-site URLs, and dedupe preserving order
    pub fn same_site_links(&self, links: &[String]) -> Vec<String> {
        dedupe_keep_order(
            links
                .iter()
                .filter_map(|link| self.normalize(link))
                .filter(|url| self.is_same_site(url))
                .map(String::from),
        )
    }

    /// Whether `url` points at the site's home page
    ///
    /// Ignores `www.`, trailing slashes, the query and the fragment.
    pub fn is_home(&self, url: &Url) -> bool {
        site_host(url).as_deref() == Some(self.host.as_str())
            && url.path().trim_end_matches('/') == self.base.path().trim_end_matches('/')
    }
}

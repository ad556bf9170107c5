use crate::filter::normalize_url;
use crate::parsers::PageMetadata;
use crate::parsers::text::{normalize_lines, normalize_whitespace};
use crate::results::Link;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

/// Maximum number of H1/H2 headings kept per page
pub const MAX_HEADINGS: usize = 10;

/// Elements whose whole subtree is boilerplate rather than content
const NON_CONTENT_TAGS: [&str; 10] = [
    "script", "style", "noscript", "template", "svg", "iframe", "nav", "footer", "header",
    "aside",
];

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| static_selector("a[href]"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| static_selector("title"));
static HEADINGS: LazyLock<Selector> = LazyLock::new(|| static_selector("h1, h2"));
static META_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| static_selector(r#"meta[name="description"]"#));
static OG_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| static_selector(r#"meta[property="og:description"]"#));
static OG_SITE_NAME: LazyLock<Selector> =
    LazyLock::new(|| static_selector(r#"meta[property="og:site_name"]"#));

fn static_selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector is valid")
}

/// Extracts every anchor of a page as a resolved [`Link`]
///
/// Fragment-only and `javascript:` hrefs are skipped, as is anything that does
/// not resolve to a URL with a host. No domain filtering happens here.
pub fn parse_links(html: &str, base_url: &str) -> Vec<Link> {
    let doc = Html::parse_document(html);
    let base = Url::parse(base_url).ok();

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for href in doc
        .select(&ANCHOR)
        .filter_map(|e| e.value().attr("href"))
    {
        let trimmed = href.trim();
        if trimmed.is_empty()
            || trimmed.starts_with('#')
            || trimmed.to_lowercase().starts_with("javascript:")
        {
            continue;
        }

        let resolved = match &base {
            Some(base) => normalize_url(trimmed, base),
            // Without a usable base only absolute hrefs can be kept
            None => Url::parse(trimmed)
                .ok()
                .and_then(|absolute| normalize_url(trimmed, &absolute)),
        };

        if let Some(url) = resolved {
            let url = String::from(url);
            if seen.insert(url.clone()) {
                links.push(Link {
                    href: href.to_string(),
                    url,
                    source: base_url.to_string(),
                });
            }
        }
    }

    ::log::debug!("HTML parser found {} links on {}", links.len(), base_url);
    if !links.is_empty() {
        ::log::trace!(
            "First few links: {:?}",
            links.iter().take(5).map(|l| &l.url).collect::<Vec<_>>()
        );
    }

    links
}

/// Absolute, deduplicated URLs of every anchor on the page, in document order
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    parse_links(html, base_url)
        .into_iter()
        .map(|link| link.url)
        .collect()
}

/// Plain text of a page with boilerplate subtrees removed
///
/// One line per text node, each trimmed, blank lines dropped. Total on any
/// input, including empty or malformed markup.
pub fn clean_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let doc = Html::parse_document(html);
    let mut buf = String::new();

    for node in doc.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let inside_boilerplate = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| NON_CONTENT_TAGS.contains(&e.name()))
        });
        if inside_boilerplate {
            continue;
        }

        buf.push_str(text);
        buf.push('\n');
    }

    normalize_lines(&buf)
}

/// Title, headings and description of a page
pub fn extract_metadata(html: &str) -> PageMetadata {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&TITLE)
        .next()
        .map(|e| normalize_whitespace(&e.text().collect::<String>()))
        .unwrap_or_default();

    let headings = doc
        .select(&HEADINGS)
        .map(|e| normalize_whitespace(&e.text().collect::<Vec<_>>().join(" ")))
        .filter(|h| !h.is_empty())
        .take(MAX_HEADINGS)
        .collect();

    let description = meta_content(&doc, &META_DESCRIPTION)
        .or_else(|| meta_content(&doc, &OG_DESCRIPTION))
        .unwrap_or_default();

    PageMetadata {
        title,
        headings,
        description,
    }
}

/// Best guess at the site's name: `og:site_name`, else the leading part of the title
pub fn site_name(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);

    if let Some(name) = meta_content(&doc, &OG_SITE_NAME) {
        return Some(name);
    }

    let title = doc
        .select(&TITLE)
        .next()
        .map(|e| normalize_whitespace(&e.text().collect::<String>()))?;

    let name = title
        .split(['|', '—', '–'])
        .next()
        .and_then(|part| part.split(" - ").next())
        .map(str::trim)
        .unwrap_or_default();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn meta_content(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .filter_map(|e| e.value().attr("content"))
        .map(str::trim)
        .find(|c| !c.is_empty())
        .map(str::to_string)
}

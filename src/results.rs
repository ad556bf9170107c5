use serde::{Deserialize, Serialize};

use crate::utils::truncate_chars;

/// Maximum characters of a meta description kept in a summary
pub const SUMMARY_DESCRIPTION_CHARS: usize = 500;

/// Maximum characters of cleaned content kept in a summary
pub const SUMMARY_CONTENT_CHARS: usize = 600;

/// A link discovered in a page's markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The `href` exactly as it appeared in the markup
    pub href: String,

    /// Absolute URL after resolution against the source page
    pub url: String,

    /// Page the link was found on
    pub source: String,
}

/// A link promoted by a link selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedLink {
    /// Free-form category, e.g. "about page" or "careers"
    #[serde(rename = "type")]
    pub page_type: String,

    /// Absolute, same-site URL
    pub url: String,

    /// Relevance between 0 and 100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl SelectedLink {
    pub fn new(page_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            page_type: page_type.into(),
            url: url.into(),
            score: None,
            rationale: None,
        }
    }

    pub fn with_score(mut self, score: u8) -> Self {
        self.score = Some(score.min(100));
        self
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }
}

/// Output of a link selector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSelection {
    #[serde(default)]
    pub links: Vec<SelectedLink>,
}

impl LinkSelection {
    pub fn new(links: Vec<SelectedLink>) -> Self {
        Self { links }
    }

    /// A selection with no links, meaning "no grounding available"
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Comma-separated page types, for log lines
    pub fn page_types(&self) -> String {
        self.links
            .iter()
            .map(|l| l.page_type.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Compiled representation of one fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    #[serde(rename = "type")]
    pub page_type: String,

    pub url: String,

    /// Cleaned plain text
    pub content: String,

    pub title: String,

    /// H1/H2 headings in document order
    pub headings: Vec<String>,

    /// Meta description, or Open Graph description when the former is absent
    pub description: String,

    /// Bounded text used for prompting
    pub summary: String,
}

impl PageRecord {
    /// Derive the summary from the description, falling back to a content prefix
    pub fn derive_summary(description: &str, content: &str) -> String {
        let description = description.trim();
        if description.is_empty() {
            truncate_chars(content, SUMMARY_CONTENT_CHARS).to_string()
        } else {
            truncate_chars(description, SUMMARY_DESCRIPTION_CHARS).to_string()
        }
    }

    /// Summary if present, otherwise the full content
    pub fn prompt_text(&self) -> &str {
        if self.summary.is_empty() {
            &self.content
        } else {
            &self.summary
        }
    }
}

/// Compact, field-capped projection of a [`PageRecord`] used for grounding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRecord {
    #[serde(rename = "type")]
    pub page_type: String,
    pub url: String,
    pub title: String,
    pub headings: Vec<String>,
    pub description: String,
}

/// Result of a complete brochure run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrochureOutput {
    pub company_name: String,
    pub base_url: String,
    pub markdown: String,

    /// Target language and translated Markdown, when a translation was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<(String, String)>,

    pub pages: Vec<PageRecord>,
}

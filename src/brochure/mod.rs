//! Brochure assembly
//!
//! Bounding the material sent to the backend, drafting the brochure through a
//! [`BrochureWriter`], cleaning the draft, and translating the result.

pub mod budget;
pub mod sanitize;
pub mod writer;

pub use budget::{bounded_text, facts};
pub use sanitize::{EMPTY_BROCHURE, sanitize};
pub use writer::{GeneratedWriter, MockWriter};

use crate::error::Result;
use crate::llm::CompletionBackend;
use crate::parsers::text::strip_code_fence;
use crate::results::PageRecord;
use async_trait::async_trait;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker opening the disclaimer footer
const DISCLAIMER_MARKER: &str = "_Unofficial brochure";

/// Writing style of the brochure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Formal,
    Humorous,
}

impl Tone {
    /// Style instruction given to the backend
    pub fn instruction(&self) -> &'static str {
        match self {
            Tone::Formal => {
                "formal and professional; clear, confident sentences aimed at decision makers"
            }
            Tone::Humorous => {
                "light and humorous; friendly wit that never gets in the way of the facts"
            }
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tone::Formal => write!(f, "formal"),
            Tone::Humorous => write!(f, "humorous"),
        }
    }
}

/// Drafts a brochure from compiled pages
#[async_trait]
pub trait BrochureWriter: Send + Sync {
    /// Sanitized Markdown for `company`; backend failures propagate
    async fn write(&self, company: &str, pages: &[PageRecord], tone: Tone) -> Result<String>;
}

/// Append the dated "unofficial summary" note, unless it is already there
pub fn with_disclaimer(markdown: &str, base_url: &str, date: NaiveDate) -> String {
    if markdown.contains(DISCLAIMER_MARKER) {
        return markdown.to_string();
    }

    format!(
        "{}\n\n---\n\n{} generated automatically on {} from public sources at {}. \
         It is not an official company document; verify details before use._",
        markdown.trim_end(),
        DISCLAIMER_MARKER,
        date.format("%Y-%m-%d"),
        base_url
    )
}

/// Translate a brochure, keeping its Markdown structure
///
/// Never fails: without a backend, or when the backend errors or answers with
/// nothing, the original Markdown is returned unchanged.
pub async fn translate(
    backend: Option<&dyn CompletionBackend>,
    markdown: &str,
    target_language: &str,
) -> String {
    let Some(backend) = backend else {
        ::log::warn!("No generation backend configured; skipping translation");
        return markdown.to_string();
    };

    let system = "You are a professional translator. Translate the text keeping EXACTLY \
                  the same Markdown formatting (headings, lists, emphasis, links) and the \
                  same structure. Do not add comments or explanations.";
    let user = format!(
        "Translate the following brochure into: {target_language}.\n\
         Do not change the section structure or the Markdown formatting.\n\n\
         Text:\n```markdown\n{markdown}\n```"
    );

    match backend.complete(system, &user).await {
        Ok(reply) => {
            let translated = strip_code_fence(&reply);
            if translated.is_empty() {
                ::log::warn!("Translation to {} came back empty; keeping original", target_language);
                markdown.to_string()
            } else {
                ::log::info!("Brochure translated to {}", target_language);
                translated.to_string()
            }
        }
        Err(e) => {
            ::log::warn!("Translation to {} failed, keeping original: {}", target_language, e);
            markdown.to_string()
        }
    }
}

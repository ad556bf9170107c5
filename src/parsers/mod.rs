pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

pub use html::{clean_text, extract_links, extract_metadata, parse_links, site_name};

/// Metadata read from a page's markup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    /// Contents of `<title>`, whitespace-collapsed
    pub title: String,
    /// H1/H2 headings in document order, at most [`html::MAX_HEADINGS`]
    pub headings: Vec<String>,
    /// `meta[name=description]`, falling back to `og:description`
    pub description: String,
}

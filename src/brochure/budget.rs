use crate::results::{FactRecord, PageRecord};
use crate::utils::truncate_chars;

/// Headings kept per fact record
pub const FACT_HEADINGS: usize = 6;

/// Characters of description kept per fact record
pub const FACT_DESCRIPTION_CHARS: usize = 320;

/// Separator placed between text chunks
const CHUNK_SEPARATOR: &str = "\n\n";

/// Compact grounding facts for the first `limit` pages
pub fn facts(pages: &[PageRecord], limit: usize) -> Vec<FactRecord> {
    pages
        .iter()
        .take(limit)
        .map(|page| FactRecord {
            page_type: if page.page_type.is_empty() {
                "page".to_string()
            } else {
                page.page_type.clone()
            },
            url: page.url.clone(),
            title: page.title.clone(),
            headings: page.headings.iter().take(FACT_HEADINGS).cloned().collect(),
            description: truncate_chars(&page.description, FACT_DESCRIPTION_CHARS).to_string(),
        })
        .collect()
}

/// Join each page's summary (or content) into one bounded block of text
///
/// Only chunk characters count toward `max_chars`; the blank-line separators
/// do not. The chunk that would overflow contributes its remaining allowance
/// and nothing after it is added.
pub fn bounded_text(pages: &[PageRecord], max_chars: usize) -> String {
    let mut chunks: Vec<&str> = Vec::new();
    let mut total = 0;

    for text in pages.iter().map(PageRecord::prompt_text) {
        if text.is_empty() {
            continue;
        }

        let len = text.chars().count();
        if total + len > max_chars {
            let remaining = max_chars - total;
            if remaining > 0 {
                chunks.push(truncate_chars(text, remaining));
            }
            break;
        }

        chunks.push(text);
        total += len;
    }

    chunks.join(CHUNK_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page_type: &str, summary: String) -> PageRecord {
        PageRecord {
            page_type: page_type.to_string(),
            url: format!("https://acme.test/{page_type}"),
            content: String::new(),
            title: page_type.to_uppercase(),
            headings: (0..9).map(|i| format!("Heading {i}")).collect(),
            description: "d".repeat(400),
            summary,
        }
    }

    #[test]
    fn test_bounded_text_cuts_the_overflowing_chunk() {
        let pages = vec![
            page("a", "a".repeat(5000)),
            page("b", "b".repeat(5000)),
            page("c", "c".repeat(5000)),
        ];

        let text = bounded_text(&pages, 12_000);
        let chunks: Vec<_> = text.split("\n\n").collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "a".repeat(5000));
        assert_eq!(chunks[1], "b".repeat(5000));
        assert_eq!(chunks[2], "c".repeat(2000));
    }

    #[test]
    fn test_bounded_text_prefers_summary_and_skips_empty() {
        let mut pages = vec![page("home", "Short summary".to_string()), page("x", String::new())];
        pages[1].content = "Full content".to_string();
        pages.push(page("empty", String::new()));

        assert_eq!(bounded_text(&pages, 100), "Short summary\n\nFull content");
    }

    #[test]
    fn test_bounded_text_exact_fit_and_no_pages() {
        let pages = vec![page("a", "abc".to_string()), page("b", "def".to_string())];
        assert_eq!(bounded_text(&pages, 6), "abc\n\ndef");
        assert_eq!(bounded_text(&pages, 3), "abc");
        assert_eq!(bounded_text(&[], 100), "");
    }

    #[test]
    fn test_bounded_text_counts_characters() {
        let pages = vec![page("a", "ñ".repeat(10))];
        assert_eq!(bounded_text(&pages, 4), "ññññ");
    }

    #[test]
    fn test_facts_are_capped() {
        let pages: Vec<_> = (0..12).map(|i| page(&format!("p{i}"), String::new())).collect();
        let facts = facts(&pages, 10);

        assert_eq!(facts.len(), 10);
        assert_eq!(facts[0].page_type, "p0");
        assert_eq!(facts[0].headings.len(), FACT_HEADINGS);
        assert_eq!(facts[0].description.chars().count(), FACT_DESCRIPTION_CHARS);

        let json = serde_json::to_value(&facts[0]).unwrap();
        assert_eq!(json["type"], "p0");
        assert_eq!(json["title"], "P0");
    }
}

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Document returned when nothing survives sanitizing
pub const EMPTY_BROCHURE: &str = "# Brochure\n\n_(The model returned empty output.)_";

/// `[text]`, optionally followed by `(url)` which makes it a Markdown link
static BRACKETED: LazyLock<Regex> = LazyLock::new(|| static_regex(r"\[([^\]]+)\](\([^)]*\))?"));
static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| static_regex(r"\n{3,}"));

fn static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex is valid")
}

/// Clean up model output
///
/// Drops `[placeholder]` text while keeping `[text](url)` links, strips
/// trailing whitespace, removes bullets and headings with nothing after the
/// marker, and collapses runs of blank lines. Applying it twice gives the
/// same result as applying it once.
pub fn sanitize(markdown: &str) -> String {
    let without_placeholders = BRACKETED.replace_all(markdown, |caps: &Captures| {
        if caps.get(2).is_some() {
            caps[0].to_string()
        } else {
            String::new()
        }
    });

    let lines: Vec<&str> = without_placeholders
        .lines()
        .map(str::trim_end)
        .filter(|line| !is_empty_bullet(line) && !is_empty_heading(line))
        .collect();

    let joined = lines.join("\n");
    let collapsed = BLANK_RUNS.replace_all(&joined, "\n\n");
    let cleaned = collapsed.trim();

    if cleaned.is_empty() {
        EMPTY_BROCHURE.to_string()
    } else {
        cleaned.to_string()
    }
}

fn is_empty_bullet(line: &str) -> bool {
    matches!(line.trim(), "-" | "*" | "+" | "•")
}

fn is_empty_heading(line: &str) -> bool {
    let trimmed = line.trim();
    (1..=6).contains(&trimmed.len()) && trimmed.chars().all(|c| c == '#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_placeholders_and_empty_structure() {
        let raw = "# Acme \n\n## Contact\n- [Phone number]\n- Email us today   \n*\n###\n\n\n\n## Next steps\nCall [Name] now.";
        assert_eq!(
            sanitize(raw),
            "# Acme\n\n## Contact\n- Email us today\n\n## Next steps\nCall  now."
        );
    }

    #[test]
    fn test_keeps_markdown_links() {
        let raw = "- See [our careers page](https://acme.test/careers) or [TBD]";
        assert_eq!(
            sanitize(raw),
            "- See [our careers page](https://acme.test/careers) or"
        );
    }

    #[test]
    fn test_empty_output_becomes_placeholder() {
        assert_eq!(sanitize(""), EMPTY_BROCHURE);
        assert_eq!(sanitize("  \n- [x]\n#\n"), EMPTY_BROCHURE);
    }

    #[test]
    fn test_is_idempotent() {
        let samples = [
            "",
            "# Title\n\n\n\nBody",
            "- [a]\n- b\n\n\n- \n## \nText [[nested]] and [link](x)",
            "[a][b](c) ]] [[x](y)",
            "#######\n####### heading\n• \n+ item",
            "   leading spaces\n\n\n\n\ntrailing   ",
            EMPTY_BROCHURE,
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "{sample:?}");
        }
    }

    #[test]
    fn test_keeps_horizontal_rules_and_deep_headings() {
        let raw = "Intro\n\n---\n\n####### not a heading";
        assert_eq!(sanitize(raw), raw);
    }
}

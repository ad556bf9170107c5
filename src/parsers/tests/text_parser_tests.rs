use crate::parsers::text;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lines() {
        // Empty text
        assert_eq!(text::normalize_lines(""), "");

        // Whitespace-only lines disappear
        assert_eq!(text::normalize_lines("  \n\t\n   "), "");

        // Lines are trimmed and blank runs collapse
        assert_eq!(
            text::normalize_lines("  Line 1  \n\n\n\n\tLine 2\n   \nLine 3   "),
            "Line 1\nLine 2\nLine 3"
        );
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(text::normalize_whitespace("  Our \n  Mission\t "), "Our Mission");
        assert_eq!(text::normalize_whitespace(""), "");
    }

    #[test]
    fn test_strip_code_fence() {
        // Fenced with an info string
        assert_eq!(
            text::strip_code_fence("```markdown\n# Title\n\nBody\n```"),
            "# Title\n\nBody"
        );

        // Fenced without an info string
        assert_eq!(text::strip_code_fence("```\n# Title\n```\n"), "# Title");

        // Not fenced: only trimmed
        assert_eq!(text::strip_code_fence("  # Title\n"), "# Title");

        // A fence in the middle is content, not a wrapper
        let inner = "Intro\n```\ncode\n```";
        assert_eq!(text::strip_code_fence(inner), inner);
    }
}

/// Trims every line and drops the blank ones
///
/// This function normalizes text content by:
/// - Trimming whitespace from each line
/// - Removing empty lines (which also collapses runs of them)
/// - Keeping one line per non-empty input line
pub fn normalize_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapses every run of whitespace into a single space
pub fn normalize_whitespace(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes a Markdown code fence wrapped around the whole text
///
/// Models sometimes answer with ```` ```markdown ... ``` ```` even when told
/// not to. Text without an enclosing fence is returned trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "markdown") on the opening line
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => trimmed,
    }
}

/// Company names that mean "not provided" and should be auto-detected
const PLACEHOLDER_NAMES: [&str; 5] = ["", "example", "demo", "ejemplo", "ejemplo sa"];

/// Longest prefix of `text` holding at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Rough token estimate (about four characters per token)
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

/// Convert a company name to a filename-safe slug
pub fn slugify(name: &str) -> String {
    let slug: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                '_'
            }
        })
        .collect();

    // Limit filename length
    let slug = truncate_chars(&slug, 100).to_string();
    if slug.is_empty() {
        "brochure".to_string()
    } else {
        slug
    }
}

/// Whether a user-supplied company name is a stand-in to be replaced
pub fn is_placeholder_name(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    PLACEHOLDER_NAMES.contains(&lower.as_str())
}

/// Keeps alphanumerics, `.`, `-` and spaces.
pub fn sanitize_search_text(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | ' '))
        .collect()
}

/// Rewrites free text as a `to_tsquery` expression where every token must
/// prefix a word of the document, e.g. `Jane Doe` becomes `Jane:* & Doe:*`.
///
/// Returns `None` when nothing searchable is left after sanitizing.
pub fn to_prefix_tsquery(text: &str) -> Option<String> {
    let sanitized = sanitize_search_text(text);
    let tokens: Vec<String> = sanitized
        .split_whitespace()
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .map(|token| format!("{}:*", token))
        .collect();
    if tokens.is_empty() {
        return None;
    }
    Some(tokens.join(" & "))
}

// Plain-text helpers for HTML-bearing CMS fields

use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&[^;]+;").expect("valid entity regex"));

/// Remove markup from a CMS field
///
/// Tags are dropped and every character entity becomes a single space, then
/// the result is trimmed. This is a display helper, not a sanitizer.
pub fn strip_html(html: &str) -> String {
    let without_tags = TAG.replace_all(html, "");
    ENTITY.replace_all(&without_tags, " ").trim().to_string()
}

/// Like [`strip_html`] for optional fields; `None` becomes an empty string
pub fn strip_html_opt(html: Option<&str>) -> String {
    html.map(strip_html).unwrap_or_default()
}

/// First `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Card summary: stripped text cut to `max_chars` with a trailing ellipsis
pub fn excerpt(html: Option<&str>, max_chars: usize) -> String {
    let text = strip_html_opt(html);
    if text.chars().count() <= max_chars {
        return text;
    }
    format!("{}...", truncate_chars(&text, max_chars).trim_end())
}

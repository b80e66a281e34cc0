use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"<[^>]*>?").unwrap()
});

/// Remove markup so rich-text content can be shown as a plain preview.
///
/// An unterminated `<` swallows the rest of the input, same as the editor's
/// own preview.
#[must_use]
pub fn strip_html_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

/// Cut `text` to at most `max_chars` characters, appending `...` when cut.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_owned(),
    }
}

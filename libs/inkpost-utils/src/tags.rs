//! Free-text tag input splitting.

use std::sync::LazyLock;

use regex::Regex;

/// Longest tag accepted when publishing.
pub const MAX_TAG_LEN: usize = 20;

// comma, Arabic comma, period or any whitespace
static TAG_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"[,\u{060C}.\s]+").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRule {
    /// Drop empty fragments only (editing an existing post).
    Lenient,
    /// Also drop fragments longer than [`MAX_TAG_LEN`] characters (publishing).
    Strict,
}

#[must_use]
pub fn parse_tags(input: &str, rule: TagRule) -> Vec<String> {
    TAG_SEPARATORS
        .split(input)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .filter(|tag| rule == TagRule::Lenient || tag.chars().count() <= MAX_TAG_LEN)
        .map(str::to_owned)
        .collect()
}

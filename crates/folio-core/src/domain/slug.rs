//! Slug derivation and normalization.

use std::sync::LazyLock;

use regex::Regex;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_ ]+").expect("static slug pattern"));

static SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +").expect("static slug pattern"));

/// Derive a URL slug from a title.
///
/// Lowercases, drops everything that is not an ASCII word character or a
/// space, then turns each run of spaces into a single hyphen. The result may
/// be empty when the title has no word characters at all.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    SPACES.replace_all(stripped.trim(), "-").into_owned()
}

/// Normalize a caller-supplied slug: trimmed and lowercased.
pub fn normalize_slug(slug: &str) -> String {
    slug.trim().to_lowercase()
}

/// A slug is usable in a URL path segment without escaping.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

//! Slug normalization and token-set similarity.
//!
//! Slugs are used both as identity keys (collection grouping, duplicate
//! detection) and as the token source for Jaccard similarity when ranking
//! media candidates. Everything here is pure and total over any input.

use std::collections::BTreeSet;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Characters that never survive slugification.
const NON_URL_SAFE: &[char] = &[
    '"', '#', '$', '%', '&', '+', ',', '/', ':', ';', '=', '?', '@', '[', '\\', ']', '^', '`',
    '{', '|', '}', '~', '\'', '!',
];

/// French articles and determiners ignored by [`tokenize`].
pub const STOPWORDS: &[&str] = &["le", "la", "les", "l", "un", "une", "des"];

/// Remove diacritics by canonical decomposition, dropping combining marks.
pub fn strip_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Convert a string to a URL-safe slug.
///
/// Lowercases, drops [`NON_URL_SAFE`] punctuation, joins whitespace runs with
/// single hyphens and strips accents.
///
/// ```
/// use ina_ripper_catalog::text::slugify;
///
/// assert_eq!(slugify("  Les Dossiers de l'Écran "), "les-dossiers-de-lecran");
/// assert_eq!(slugify("Journal : 20h!"), "journal-20h");
/// assert_eq!(slugify(""), "");
/// ```
pub fn slugify(s: &str) -> String {
    let cleaned: String = s
        .to_lowercase()
        .chars()
        .filter(|c| !NON_URL_SAFE.contains(c))
        .collect();
    let joined = cleaned.split_whitespace().collect::<Vec<_>>().join("-");
    strip_accents(&joined)
}

/// Split a string into its set of slug tokens, minus [`STOPWORDS`].
pub fn tokenize(s: &str) -> BTreeSet<String> {
    slugify(s)
        .split('-')
        .filter(|token| !token.is_empty() && !STOPWORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity between the token sets of two strings.
///
/// Returns `None` when both token sets are empty, since the ratio is
/// undefined there. Callers decide what a degenerate comparison means.
pub fn jaccard(a: &str, b: &str) -> Option<f64> {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);
    let union = tokens_a.union(&tokens_b).count();
    if union == 0 {
        return None;
    }
    let intersection = tokens_a.intersection(&tokens_b).count();
    Some(intersection as f64 / union as f64)
}

//! Decides whether two paths denote the same document in different languages.
//!
//! Paths are expected to differ only by the substring that encodes the
//! language code, so matching needs no filesystem access.

/// Returns `true` when `other_path` is the translation of `base_path` into `other_lang`.
///
/// The two paths must have the same length; the span between the first and
/// the last differing character of `other_path` must fit into, and be
/// contained in, `other_lang`. Language codes sharing characters with the base
/// code (`sk` and `sl`) produce partial spans, which containment tolerates.
#[must_use]
pub fn matches(base_path: &str, other_path: &str, other_lang: &str) -> bool {
    let base: Vec<char> = base_path.chars().collect();
    let other: Vec<char> = other_path.chars().collect();

    if base.len() != other.len() {
        return false;
    }

    let span = diff_span(&base, &other);
    if span.chars().count() > other_lang.chars().count() {
        return false;
    }

    other_lang.contains(span.as_str())
}

/// Characters of `other` from the first to the last position differing from `base`.
fn diff_span(base: &[char], other: &[char]) -> String {
    let differs = |index: &usize| base[*index] != other[*index];
    let Some(first) = (0..other.len()).find(differs) else {
        return String::new();
    };
    let last = (0..other.len()).rev().find(differs).unwrap_or(first);
    other[first..=last].iter().collect()
}

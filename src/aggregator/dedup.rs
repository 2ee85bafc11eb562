//! Title-based deduplication key.
//!
//! Articles from different providers describing the same work usually
//! share a title but never an identifier, so the merge collapses on the
//! trimmed, case-folded title. First adapter in priority order wins; later
//! duplicates are dropped, not merged.

/// Compute the deduplication key for an article title.
///
/// Trims surrounding whitespace and case-folds, so `"Intro to X"` and
/// `"intro to x"` collapse to the same key. An empty key means the record
/// must be dropped.
pub fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

//! Topic normalisation for outbound article queries.
//!
//! Bare programming-language names make terrible search queries: "go" or
//! "rust" pull in natural-language results that swamp the academic APIs.
//! The normaliser appends a disambiguating suffix when the topic looks
//! like a language name and does not already say so.

/// Language-name fragments that trigger disambiguation.
const LANG_KEYWORDS: &[&str] = &[
    "c++",
    "cpp",
    "c language",
    "c programming",
    "python",
    "java",
    "javascript",
    "typescript",
    "golang",
    "go language",
    "rust",
    "kotlin",
    "swift",
    "php",
    "ruby",
    "c#",
    ".net",
];

/// Normalise a topic for dispatch to the article sources.
///
/// Trims the topic; if its lower-cased form contains one of the known
/// language keywords and does not already contain "programming" or
/// "language", appends `" programming language"`. Otherwise the trimmed
/// topic is returned unchanged. Pure and deterministic; the result is used
/// only for outbound queries and never persisted.
///
/// # Examples
///
/// ```
/// use edusearch::topic::normalize_topic;
///
/// assert_eq!(normalize_topic("python"), "python programming language");
/// assert_eq!(normalize_topic("python programming"), "python programming");
/// assert_eq!(normalize_topic("photosynthesis"), "photosynthesis");
/// ```
pub fn normalize_topic(topic: &str) -> String {
    let trimmed = topic.trim();
    let low = trimmed.to_lowercase();
    if low.is_empty() {
        return String::new();
    }
    let looks_like_language = LANG_KEYWORDS.iter().any(|k| low.contains(k));
    if looks_like_language && !low.contains("programming") && !low.contains("language") {
        return format!("{trimmed} programming language");
    }
    trimmed.to_string()
}

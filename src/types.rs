//! Core types for aggregated study content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single academic article returned by a source adapter.
///
/// Constructed once by the adapter and never mutated afterwards. The
/// trimmed, case-folded title acts as the deduplication key when results
/// from multiple sources are merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Article title. Always non-empty; untitled records are dropped at the
    /// adapter boundary.
    pub title: String,
    /// Author names, truncated to at most four.
    pub authors: Vec<String>,
    /// Publication year, when the provider supplied one in a parseable form.
    pub year: Option<i32>,
    /// Venue or journal name, falling back to the provider's own name.
    pub journal: String,
    /// Best-effort direct PDF link.
    pub pdf_url: Option<String>,
    /// Landing page for the article.
    pub page_url: Option<String>,
    /// Which source adapter produced this record.
    pub source: ArticleSource,
}

impl Article {
    /// Returns `true` if this record carries a usable PDF link.
    pub fn has_pdf(&self) -> bool {
        self.pdf_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// Academic search providers queried by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArticleSource {
    /// Semantic Scholar Graph API — richest metadata, open-access PDF field.
    SemanticScholar,
    /// Crossref works API — broad coverage, link-level PDF content types.
    Crossref,
    /// arXiv Atom API — preprints, PDF link per entry.
    Arxiv,
}

impl ArticleSource {
    /// Human-readable provider name, as stored on [`Article::source`]
    /// records and used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SemanticScholar => "Semantic Scholar",
            Self::Crossref => "Crossref",
            Self::Arxiv => "arXiv",
        }
    }

    /// All providers in aggregation priority order. On a title collision
    /// the earlier provider wins.
    pub fn all() -> &'static [ArticleSource] {
        &[Self::SemanticScholar, Self::Crossref, Self::Arxiv]
    }
}

impl fmt::Display for ArticleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A video entry produced by the resolver.
///
/// The resolver guarantees a minimum result count by synthesizing search
/// links when real lookups fall short; the two shapes are kept distinct so
/// downstream consumers can tell a confirmed video from a generated link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Video {
    /// A video confirmed against the provider (API lookup or results-page
    /// scrape).
    Verified {
        /// Provider video id (11 characters for YouTube).
        id: String,
        /// Video title.
        title: String,
        /// Channel name.
        channel: String,
        /// Direct watch URL.
        url: String,
    },
    /// A synthesized search link, not a verified video.
    SuggestedSearch {
        /// The search phrase the link runs.
        query: String,
        /// Results-page URL for the phrase.
        url: String,
    },
}

impl Video {
    /// The URL for this entry, whichever shape it is.
    pub fn url(&self) -> &str {
        match self {
            Self::Verified { url, .. } | Self::SuggestedSearch { url, .. } => url,
        }
    }

    /// Returns `true` for entries confirmed against the provider.
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }
}

/// A news headline from one of the configured RSS feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    /// Headline text.
    pub title: String,
    /// Link to the story. May be empty for the offline placeholder item.
    pub link: String,
    /// Publication timestamp as supplied by the feed (not normalised).
    pub published: String,
    /// Provider label, inferred from the link host when the feed omits it.
    pub source: String,
    /// Plain-text summary with HTML tags stripped.
    pub summary: String,
}

/// Everything gathered for one topic: the JSON-serializable response shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyBundle {
    /// The topic as supplied by the caller (trimmed, not normalised).
    pub topic: String,
    /// Video entries, verified and suggested.
    pub videos: Vec<Video>,
    /// Merged, deduplicated article list.
    pub articles: Vec<Article>,
    /// Subsequence of `articles` with a PDF link, order preserved.
    pub pdfs: Vec<Article>,
    /// Generic web search link for the topic.
    pub web_search_link: String,
    /// Web search link restricted to PDFs.
    pub pdf_search_link: String,
}

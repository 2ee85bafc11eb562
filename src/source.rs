//! Trait definition for pluggable article source adapters.
//!
//! Each provider (Semantic Scholar, Crossref, arXiv) implements
//! [`ArticleSourceTrait`] to translate its response shape into the common
//! [`Article`] record.

use crate::config::GatherConfig;
use crate::error::SourceError;
use crate::types::{Article, ArticleSource};

/// A pluggable article source adapter.
///
/// Implementors query one provider and extract structured [`Article`]
/// values. Each adapter handles its own:
///
/// - Query construction (query params or field lists)
/// - HTTP request with appropriate headers and the configured timeout
/// - Response decoding (JSON or XML)
/// - Dropping untitled records and truncating author lists
///
/// Adapters return typed errors; converting a failure into an empty list
/// is the aggregator's job, so that the cause still reaches the logs.
/// All implementations must be `Send + Sync`.
pub trait ArticleSourceTrait: Send + Sync {
    /// Fetch up to `limit` articles for `topic`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the HTTP request fails, the provider
    /// responds with a non-success status, or the response cannot be
    /// decoded.
    fn fetch(
        &self,
        topic: &str,
        limit: usize,
        config: &GatherConfig,
    ) -> impl std::future::Future<Output = Result<Vec<Article>, SourceError>> + Send;

    /// Returns which [`ArticleSource`] variant this adapter represents.
    fn source_type(&self) -> ArticleSource;
}

/// Truncate an author list to the shared cap of four names.
pub(crate) fn cap_authors(mut authors: Vec<String>) -> Vec<String> {
    authors.truncate(4);
    authors
}

//! Source adapter implementations.
//!
//! Each module translates one external provider's response shape into the
//! common [`crate::types::Article`] (or [`crate::types::NewsItem`]) record.

pub mod arxiv;
pub mod crossref;
pub mod news;
pub mod semantic_scholar;

pub use arxiv::ArxivSource;
pub use crossref::CrossrefSource;
pub use semantic_scholar::SemanticScholarSource;

use crate::config::GatherConfig;
use crate::error::SourceError;
use crate::source::ArticleSourceTrait;
use crate::types::{Article, ArticleSource};

/// Enum-level dispatch: a configured `Vec<ArticleSource>` is itself a
/// walkable adapter set, without naming the concrete adapter types.
impl ArticleSourceTrait for ArticleSource {
    async fn fetch(
        &self,
        topic: &str,
        limit: usize,
        config: &GatherConfig,
    ) -> Result<Vec<Article>, SourceError> {
        match self {
            ArticleSource::SemanticScholar => {
                SemanticScholarSource.fetch(topic, limit, config).await
            }
            ArticleSource::Crossref => CrossrefSource.fetch(topic, limit, config).await,
            ArticleSource::Arxiv => ArxivSource.fetch(topic, limit, config).await,
        }
    }

    fn source_type(&self) -> ArticleSource {
        *self
    }
}

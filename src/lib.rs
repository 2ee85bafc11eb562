//! # edusearch
//!
//! Embedded study-content aggregation: one topic in, curated learning
//! material out.
//!
//! This crate gathers academic articles, video links, and news headlines
//! for a study topic by querying public provider APIs and pages directly —
//! the only optional secrets are a Data API key and a suggestion-backend
//! key, and everything still works without them.
//!
//! ## Design
//!
//! - Queries Semantic Scholar, Crossref, and arXiv sequentially in
//!   priority order and merges by title
//! - Resolves videos through tiered fallbacks, ending in suggested-search
//!   links so the caller always gets something clickable
//! - Walks public RSS feeds for headlines with a wire-service fallback
//! - Graceful degradation: a failing provider contributes nothing and is
//!   logged, it never fails the request
//!
//! ## Security
//!
//! - API keys are supplied by the caller, never read from disk
//! - No network listeners — this is a library, not a server
//! - Topics are logged only at debug level

pub mod aggregator;
pub mod config;
pub mod error;
pub mod http;
pub mod llm;
pub mod source;
pub mod sources;
pub mod topic;
pub mod types;
pub mod video;

use std::sync::Arc;

use url::Url;

pub use config::GatherConfig;
pub use error::{Result, SourceError};
pub use llm::{GeminiClient, SuggestionClient};
pub use source::ArticleSourceTrait;
pub use types::{Article, ArticleSource, NewsItem, StudyBundle, Video};

const WEB_SEARCH_URL: &str = "https://www.google.com/search";

/// Aggregates study content for topics under one configuration.
///
/// Construction validates the configuration once; every gather call after
/// that degrades rather than fails. A [`SuggestionClient`] can be attached
/// to improve the video resolver's fallback quality.
#[derive(Clone)]
pub struct StudyAggregator {
    config: GatherConfig,
    suggestions: Option<Arc<dyn SuggestionClient>>,
}

impl StudyAggregator {
    /// Build an aggregator, validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Config`] when the configuration is invalid.
    pub fn new(config: GatherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            suggestions: None,
        })
    }

    /// Attach a suggestion backend for the video resolver's fallback tier.
    #[must_use]
    pub fn with_suggestions(mut self, client: Arc<dyn SuggestionClient>) -> Self {
        self.suggestions = Some(client);
        self
    }

    /// Gather the full study bundle for `topic`: articles, the PDF subset,
    /// videos, and outbound search links.
    ///
    /// Provider failures degrade to empty sections. The video list always
    /// meets the configured floor.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Config`] when `topic` is blank.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> edusearch::Result<()> {
    /// let aggregator = edusearch::StudyAggregator::new(edusearch::GatherConfig::default())?;
    /// let bundle = aggregator.gather("linear algebra").await?;
    /// println!("{} articles, {} videos", bundle.articles.len(), bundle.videos.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn gather(&self, topic: &str) -> Result<StudyBundle> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(SourceError::Config("topic is empty".into()));
        }
        tracing::debug!(topic, "gathering study bundle");

        let (articles, pdfs) = aggregator::gather_articles(topic, &self.config).await;
        let videos = self.videos(topic).await;

        Ok(StudyBundle {
            topic: topic.to_string(),
            videos,
            articles,
            pdfs,
            web_search_link: web_search_link(topic),
            pdf_search_link: pdf_search_link(topic),
        })
    }

    /// Gather only articles: `(all, pdf_subset)`.
    pub async fn articles(&self, topic: &str) -> (Vec<Article>, Vec<Article>) {
        aggregator::gather_articles(topic, &self.config).await
    }

    /// Resolve only videos.
    pub async fn videos(&self, topic: &str) -> Vec<Video> {
        video::resolve_videos(topic, &self.config, self.suggestions.as_deref()).await
    }

    /// Fetch current news headlines. Topic-independent.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] when the HTTP client cannot be built;
    /// unreachable feeds degrade to the placeholder item instead.
    pub async fn news(&self) -> Result<Vec<NewsItem>> {
        sources::news::fetch_headlines(&self.config).await
    }
}

/// Gather a study bundle with the default configuration.
///
/// Convenience wrapper around [`StudyAggregator::gather`].
///
/// # Errors
///
/// Same as [`StudyAggregator::gather`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> edusearch::Result<()> {
/// let bundle = edusearch::gather("photosynthesis").await?;
/// for article in &bundle.articles {
///     println!("{} ({})", article.title, article.source);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn gather(topic: &str) -> Result<StudyBundle> {
    StudyAggregator::new(GatherConfig::default())?.gather(topic).await
}

/// General web-search link for a topic.
fn web_search_link(topic: &str) -> String {
    search_link(topic.to_string())
}

/// Web-search link scoped to PDF documents.
fn pdf_search_link(topic: &str) -> String {
    search_link(format!("{topic} filetype:pdf"))
}

fn search_link(query: String) -> String {
    match Url::parse_with_params(WEB_SEARCH_URL, &[("q", query.as_str())]) {
        Ok(url) => url.into(),
        Err(_) => WEB_SEARCH_URL.to_string(),
    }
}

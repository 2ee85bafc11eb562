//! Article aggregation: sequential fan-out, title dedup, result caps.
//!
//! Sources are queried one after another in priority order — never in
//! parallel — so the walk can stop early and skip remaining providers
//! once the merged list is full. A failing source is logged with its
//! cause and contributes nothing; the aggregate call itself never fails.

pub mod dedup;

use std::collections::HashSet;

use crate::config::GatherConfig;
use crate::error::SourceError;
use crate::source::ArticleSourceTrait;
use crate::topic::normalize_topic;
use crate::types::{Article, ArticleSource};

use dedup::title_key;

/// Gather articles for `topic` across the configured sources.
///
/// Delegates to [`gather_with`] over `config.sources` — see there for the
/// pipeline. Returns `(all, pdfs)`.
pub async fn gather_articles(
    topic: &str,
    config: &GatherConfig,
) -> (Vec<Article>, Vec<Article>) {
    gather_with(&config.sources, topic, config).await
}

/// Gather articles for `topic` across an arbitrary adapter set.
///
/// # Pipeline
///
/// 1. Normalise the topic for outbound queries
/// 2. Query each source sequentially in walk order with its sub-limit
/// 3. Merge in walk order, dropping empty titles and already-seen titles
///    (first source wins; records are not enriched across sources)
/// 4. Stop as soon as `config.max_results` entries are merged — remaining
///    sources are not queried at all
/// 5. Derive the PDF subset, order preserved
///
/// Source failures degrade to empty contributions and are logged at warn
/// with their cause; if every source fails the result is simply two empty
/// lists.
pub async fn gather_with<S: ArticleSourceTrait>(
    sources: &[S],
    topic: &str,
    config: &GatherConfig,
) -> (Vec<Article>, Vec<Article>) {
    let query = normalize_topic(topic);
    if query.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let mut combined: Vec<Article> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for source in sources {
        if combined.len() >= config.max_results {
            break;
        }
        let limit = source_limit(source.source_type(), config.max_results);
        let fetched = source_outcome(
            source.source_type(),
            source.fetch(&query, limit, config).await,
        );
        merge_into(&mut combined, &mut seen, fetched, config.max_results);
    }

    let pdfs: Vec<Article> = combined.iter().filter(|a| a.has_pdf()).cloned().collect();
    (combined, pdfs)
}

/// Downgrade one adapter outcome to a (possibly empty) contribution,
/// keeping the failure cause visible in the logs.
fn source_outcome(
    source: ArticleSource,
    outcome: Result<Vec<Article>, SourceError>,
) -> Vec<Article> {
    match outcome {
        Ok(articles) => {
            tracing::debug!(%source, count = articles.len(), "source returned articles");
            articles
        }
        Err(err) => {
            tracing::warn!(%source, error = %err, "source query failed, treating as empty");
            Vec::new()
        }
    }
}

/// Per-source sub-limit: half the cap for the two JSON APIs (with a floor
/// of five when the cap is tiny), a third for arXiv floored at four.
fn source_limit(source: ArticleSource, max_results: usize) -> usize {
    match source {
        ArticleSource::SemanticScholar | ArticleSource::Crossref => {
            let half = max_results / 2;
            if half == 0 {
                5
            } else {
                half
            }
        }
        ArticleSource::Arxiv => (max_results / 3).max(4),
    }
}

/// Append `fetched` onto `combined` in walk order, honouring the dedup
/// rules: empty titles are dropped, already-seen titles are dropped, and
/// the merge stops at `max_results`.
fn merge_into(
    combined: &mut Vec<Article>,
    seen: &mut HashSet<String>,
    fetched: Vec<Article>,
    max_results: usize,
) {
    for article in fetched {
        if combined.len() >= max_results {
            break;
        }
        let key = title_key(&article.title);
        if key.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.insert(key);
        combined.push(article);
    }
}

/// Merge pre-fetched per-source result lists exactly as the live walk
/// does: same dedup rules, same cap, same PDF-subset derivation. Exposed
/// so the merge semantics can be exercised without network access.
pub fn merge_source_lists(
    source_lists: Vec<Vec<Article>>,
    max_results: usize,
) -> (Vec<Article>, Vec<Article>) {
    let mut combined: Vec<Article> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for list in source_lists {
        if combined.len() >= max_results {
            break;
        }
        merge_into(&mut combined, &mut seen, list, max_results);
    }
    let pdfs: Vec<Article> = combined.iter().filter(|a| a.has_pdf()).cloned().collect();
    (combined, pdfs)
}

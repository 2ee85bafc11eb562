//! arXiv Atom API adapter.
//!
//! Queries `export.arxiv.org/api/query` and decodes the Atom feed with
//! quick-xml. The year comes from the RFC-3339 `<published>` prefix and
//! the PDF from the `<link type="application/pdf">` entry.

use crate::config::GatherConfig;
use crate::error::SourceError;
use crate::http;
use crate::source::{cap_authors, ArticleSourceTrait};
use crate::types::{Article, ArticleSource};
use serde::Deserialize;

const QUERY_URL: &str = "https://export.arxiv.org/api/query";

/// arXiv adapter. Priority 3 source.
pub struct ArxivSource;

#[derive(Debug, Default, Deserialize)]
struct Feed {
    #[serde(default, rename = "entry")]
    entries: Vec<Entry>,
}

#[derive(Debug, Default, Deserialize)]
struct Entry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    published: String,
    #[serde(default, rename = "author")]
    authors: Vec<Author>,
    #[serde(default, rename = "link")]
    links: Vec<Link>,
}

#[derive(Debug, Default, Deserialize)]
struct Author {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct Link {
    #[serde(default, rename = "@href")]
    href: String,
    #[serde(default, rename = "@type")]
    content_type: Option<String>,
}

impl ArticleSourceTrait for ArxivSource {
    async fn fetch(
        &self,
        topic: &str,
        limit: usize,
        config: &GatherConfig,
    ) -> Result<Vec<Article>, SourceError> {
        tracing::trace!(topic, limit, "arXiv search");

        let client = http::build_client(config)?;
        let search_param = format!("all:{topic}");
        let max_param = limit.to_string();
        let response = client
            .get(QUERY_URL)
            .query(&[
                ("search_query", search_param.as_str()),
                ("start", "0"),
                ("max_results", max_param.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let xml = response.text().await?;
        parse_feed(&xml, limit)
    }

    fn source_type(&self) -> ArticleSource {
        ArticleSource::Arxiv
    }
}

/// Decode an Atom feed into [`Article`] records. Split out for
/// testability with canned XML.
fn parse_feed(xml: &str, limit: usize) -> Result<Vec<Article>, SourceError> {
    let feed: Feed = quick_xml::de::from_str(xml)?;

    let mut results = Vec::new();
    for entry in feed.entries {
        // Atom titles fold across lines; collapse the whitespace.
        let title = entry.title.split_whitespace().collect::<Vec<_>>().join(" ");
        if title.is_empty() {
            continue;
        }
        let authors: Vec<String> = entry
            .authors
            .into_iter()
            .map(|a| a.name.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        let pdf_url = entry
            .links
            .iter()
            .find(|l| l.content_type.as_deref() == Some("application/pdf"))
            .map(|l| l.href.clone())
            .filter(|href| !href.is_empty());
        let year = parse_year_prefix(&entry.published);
        let page_url = if entry.id.is_empty() {
            pdf_url.clone()
        } else {
            Some(entry.id)
        };
        results.push(Article {
            title,
            authors: cap_authors(authors),
            year,
            journal: ArticleSource::Arxiv.name().to_string(),
            pdf_url,
            page_url,
            source: ArticleSource::Arxiv,
        });
        if results.len() >= limit {
            break;
        }
    }
    tracing::debug!(count = results.len(), "arXiv results parsed");
    Ok(results)
}

/// Parse a year from the leading four digits of an RFC-3339 timestamp.
fn parse_year_prefix(published: &str) -> Option<i32> {
    published.get(..4).and_then(|p| p.parse().ok())
}

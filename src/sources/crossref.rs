//! Crossref works API adapter.
//!
//! Crossref's metadata is the most irregular of the three sources: titles
//! arrive as lists, authors as given/family pairs, the year is buried in
//! `issued.date-parts`, and a PDF has to be sniffed out of the `link`
//! array by content type.

use crate::config::GatherConfig;
use crate::error::SourceError;
use crate::http;
use crate::source::{cap_authors, ArticleSourceTrait};
use crate::types::{Article, ArticleSource};
use serde::Deserialize;

const WORKS_URL: &str = "https://api.crossref.org/works";

/// Crossref adapter. Priority 2 source.
pub struct CrossrefSource;

#[derive(Debug, Default, Deserialize)]
struct WorksResponse {
    #[serde(default)]
    message: WorksMessage,
}

#[derive(Debug, Default, Deserialize)]
struct WorksMessage {
    #[serde(default)]
    items: Vec<WorkItem>,
}

#[derive(Debug, Default, Deserialize)]
struct WorkItem {
    #[serde(default)]
    title: Vec<String>,
    #[serde(default)]
    author: Vec<WorkAuthor>,
    #[serde(default)]
    link: Vec<WorkLink>,
    #[serde(default)]
    issued: Option<DateField>,
    #[serde(default, rename = "container-title")]
    container_title: Vec<String>,
    #[serde(default, rename = "URL")]
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WorkAuthor {
    #[serde(default)]
    given: Option<String>,
    #[serde(default)]
    family: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WorkLink {
    #[serde(default, rename = "URL")]
    url: Option<String>,
    #[serde(default, rename = "content-type")]
    content_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DateField {
    #[serde(default, rename = "date-parts")]
    date_parts: Vec<Vec<Option<i32>>>,
}

impl ArticleSourceTrait for CrossrefSource {
    async fn fetch(
        &self,
        topic: &str,
        limit: usize,
        config: &GatherConfig,
    ) -> Result<Vec<Article>, SourceError> {
        tracing::trace!(topic, limit, "Crossref search");

        let client = http::build_client(config)?;
        let rows_param = limit.to_string();
        let response = client
            .get(WORKS_URL)
            .query(&[("query", topic), ("rows", rows_param.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let payload: WorksResponse = response.json().await?;
        Ok(convert_items(payload, limit))
    }

    fn source_type(&self) -> ArticleSource {
        ArticleSource::Crossref
    }
}

fn convert_items(payload: WorksResponse, limit: usize) -> Vec<Article> {
    let mut results = Vec::new();
    for item in payload.message.items {
        let Some(title) = item.title.into_iter().next().filter(|t| !t.trim().is_empty())
        else {
            continue;
        };
        let authors: Vec<String> = item
            .author
            .iter()
            .filter_map(|a| {
                let name = [a.given.as_deref(), a.family.as_deref()]
                    .into_iter()
                    .flatten()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                (!name.is_empty()).then_some(name)
            })
            .collect();
        let pdf_url = item.link.iter().find_map(|link| {
            let ct = link.content_type.as_deref().unwrap_or_default();
            if ct.to_lowercase().contains("pdf") {
                link.url.clone()
            } else {
                None
            }
        });
        let year = item
            .issued
            .as_ref()
            .and_then(|d| d.date_parts.first())
            .and_then(|parts| parts.first())
            .copied()
            .flatten();
        let journal = item
            .container_title
            .into_iter()
            .next()
            .filter(|j| !j.is_empty())
            .unwrap_or_else(|| ArticleSource::Crossref.name().to_string());
        results.push(Article {
            title,
            authors: cap_authors(authors),
            year,
            journal,
            pdf_url,
            page_url: item.url,
            source: ArticleSource::Crossref,
        });
        if results.len() >= limit {
            break;
        }
    }
    tracing::debug!(count = results.len(), "Crossref results parsed");
    results
}

//! News headline adapter over public RSS feeds.
//!
//! Walks a fixed list of provider feeds sequentially until the requested
//! item count is reached. A feed that fails or parses to nothing is
//! skipped; when every feed comes back empty the Google News endpoint is
//! tried, and as a last resort a single placeholder item is returned so
//! the caller always has something to show.

use crate::config::GatherConfig;
use crate::error::SourceError;
use crate::http;
use crate::types::NewsItem;
use serde::Deserialize;

/// Provider feeds, walked in order.
const FEED_URLS: &[&str] = &[
    // CNN
    "https://rss.cnn.com/rss/edition.rss",
    "https://rss.cnn.com/rss/edition_world.rss",
    "https://rss.cnn.com/rss/edition_technology.rss",
    "https://rss.cnn.com/rss/edition_sport.rss",
    // BBC
    "http://feeds.bbci.co.uk/news/world/rss.xml",
    "http://feeds.bbci.co.uk/news/technology/rss.xml",
    // Reuters
    "https://feeds.reuters.com/reuters/worldNews",
    "https://feeds.reuters.com/reuters/technologyNews",
    // The Guardian
    "https://www.theguardian.com/world/rss",
    "https://www.theguardian.com/uk/technology/rss",
    // NYTimes
    "https://rss.nytimes.com/services/xml/rss/nyt/World.xml",
    "https://rss.nytimes.com/services/xml/rss/nyt/Technology.xml",
    // Misc
    "https://www.aljazeera.com/xml/rss/all.xml",
    "https://feeds.skynews.com/feeds/rss/world.xml",
];

const GOOGLE_NEWS_URL: &str = "https://news.google.com/rss";

#[derive(Debug, Default, Deserialize)]
struct Rss {
    #[serde(default)]
    channel: Channel,
}

#[derive(Debug, Default, Deserialize)]
struct Channel {
    #[serde(default, rename = "item")]
    items: Vec<FeedEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct FeedEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default, rename = "pubDate")]
    pub_date: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    source: Option<SourceTag>,
}

#[derive(Debug, Default, Deserialize)]
struct SourceTag {
    #[serde(default, rename = "$text")]
    name: String,
}

/// Fetch up to `config.max_news` headlines across the configured feeds.
///
/// Never empty: degraded runs end with the Google News fallback and then
/// the offline placeholder.
pub async fn fetch_headlines(config: &GatherConfig) -> Result<Vec<NewsItem>, SourceError> {
    let client = http::build_client(config)?;
    let mut items: Vec<NewsItem> = Vec::new();

    for feed_url in FEED_URLS {
        if items.len() >= config.max_news {
            break;
        }
        match fetch_feed(&client, feed_url).await {
            Ok(xml) => collect_feed(&xml, config.max_news, &mut items),
            Err(err) => {
                tracing::debug!(feed = feed_url, error = %err, "news feed skipped");
            }
        }
    }

    if items.is_empty() {
        match fetch_google_news(&client).await {
            Ok(xml) => collect_feed(&xml, config.max_news, &mut items),
            Err(err) => {
                tracing::debug!(error = %err, "Google News fallback failed");
            }
        }
    }

    if items.is_empty() {
        items.push(NewsItem {
            title: "Live news not available right now".into(),
            link: String::new(),
            published: String::new(),
            source: "News".into(),
            summary: "No news feed could be reached from the server at this moment. \
                      Please try again in a few minutes."
                .into(),
        });
    }

    Ok(items)
}

async fn fetch_feed(client: &reqwest::Client, url: &str) -> Result<String, SourceError> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}

async fn fetch_google_news(client: &reqwest::Client) -> Result<String, SourceError> {
    let response = client
        .get(GOOGLE_NEWS_URL)
        .query(&[("hl", "en-IN"), ("gl", "IN"), ("ceid", "IN:en")])
        .send()
        .await?
        .error_for_status()?;
    Ok(response.text().await?)
}

/// Decode one feed and append its usable items, up to `max` overall.
fn collect_feed(xml: &str, max: usize, items: &mut Vec<NewsItem>) {
    let feed: Rss = match quick_xml::de::from_str(xml) {
        Ok(feed) => feed,
        Err(err) => {
            tracing::debug!(error = %err, "feed XML did not parse");
            return;
        }
    };

    for entry in feed.channel.items {
        if items.len() >= max {
            break;
        }
        let title = entry.title.trim().to_string();
        let summary = strip_tags(entry.description.trim());
        if title.is_empty() && summary.is_empty() {
            continue;
        }
        let link = entry.link.trim().to_string();
        let source = entry
            .source
            .map(|s| s.name.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| infer_source(&link));
        items.push(NewsItem {
            title: if title.is_empty() { "News".into() } else { title },
            link,
            published: entry.pub_date.trim().to_string(),
            source,
            summary,
        });
    }
}

/// Roughly infer a provider name from the story link.
fn infer_source(link: &str) -> String {
    let low = link.to_lowercase();
    let name = if low.contains("cnn.com") {
        "CNN"
    } else if low.contains("bbc.co.uk") || low.contains("bbc.com") {
        "BBC"
    } else if low.contains("reuters.com") {
        "Reuters"
    } else if low.contains("nytimes.com") {
        "NYTimes"
    } else if low.contains("theguardian.com") {
        "The Guardian"
    } else if low.contains("aljazeera.com") {
        "Al Jazeera"
    } else {
        "News"
    };
    name.to_string()
}

/// Reduce an HTML description to plain text.
fn strip_tags(html: &str) -> String {
    if !html.contains('<') {
        return html.to_string();
    }
    let fragment = scraper::Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

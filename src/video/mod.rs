//! Tiered video resolution.
//!
//! Tiers run in order and each one only has to cover what the previous
//! tiers left short:
//!
//! 1. official Data API, when a key is configured
//! 2. results-page scrape of the `ytInitialData` blob
//! 3. raw id scan over the same page
//! 4. related-phrase suggestions from an injected [`SuggestionClient`]
//! 5. templated suffix queries
//!
//! Tiers 1-3 produce [`Video::Verified`] entries; tiers 4-5 produce
//! [`Video::SuggestedSearch`] entries that always resolve to a working
//! results-page link. The resolver itself never fails and never returns
//! fewer than `config.min_videos` entries for a non-blank topic.

pub(crate) mod api;
pub(crate) mod scrape;

use std::collections::HashSet;

use url::Url;

use crate::config::GatherConfig;
use crate::error::SourceError;
use crate::http;
use crate::llm::SuggestionClient;
use crate::types::Video;

const RESULTS_URL: &str = "https://www.youtube.com/results";

/// Query suffixes for the templated tier, cycled in order.
const TEMPLATE_SUFFIXES: &[&str] = &[
    "tutorial",
    "lecture",
    "lesson",
    "course",
    "explained",
    "crash course",
];

/// Results-page URL for a search phrase, with proper percent-encoding.
pub fn search_url(query: &str) -> String {
    match Url::parse_with_params(RESULTS_URL, &[("search_query", query)]) {
        Ok(url) => url.into(),
        // RESULTS_URL is a valid base, so this arm is unreachable in
        // practice; fall back to the bare results page.
        Err(_) => RESULTS_URL.to_string(),
    }
}

/// Resolve videos for `topic`, walking the tiers until the floor is met.
///
/// A blank topic yields an empty list. Otherwise the result has between
/// `config.min_videos` and `config.max_videos` entries, verified entries
/// first in discovery order, suggestions after.
pub async fn resolve_videos(
    topic: &str,
    config: &GatherConfig,
    suggestions: Option<&dyn SuggestionClient>,
) -> Vec<Video> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Vec::new();
    }

    let mut videos: Vec<Video> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    // Tier 1: official API.
    if let Some(key) = config.youtube_api_key.as_deref().filter(|k| !k.is_empty()) {
        match api::search_official(topic, key, config).await {
            Ok(found) => {
                if found.len() >= config.min_videos {
                    tracing::debug!(count = found.len(), "videos resolved via official API");
                    return found;
                }
                tracing::debug!(
                    count = found.len(),
                    "official API returned too few videos, falling through"
                );
                for video in found {
                    if let Video::Verified { id, .. } = &video {
                        seen_ids.insert(id.clone());
                    }
                    videos.push(video);
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "official API query failed, falling through");
            }
        }
    }

    // Tiers 2 and 3 share one page fetch.
    if videos.len() < config.min_videos {
        match fetch_results_page(topic, config).await {
            Ok(html) => {
                scrape_page(&html, topic, config, &mut seen_ids, &mut videos);
            }
            Err(err) => {
                tracing::warn!(error = %err, "results page fetch failed");
            }
        }
    }

    if videos.len() >= config.min_videos {
        videos.truncate(config.max_videos);
        return videos;
    }

    fill_to_floor(topic, config, suggestions, &mut videos).await;
    videos.truncate(config.max_videos);
    videos
}

/// Tiers 4 and 5: top `videos` up to `config.min_videos` with suggested
/// searches, first from the injected client and then from templated
/// suffixes. Repeat suffix passes get a counter so the query stays unique.
async fn fill_to_floor(
    topic: &str,
    config: &GatherConfig,
    suggestions: Option<&dyn SuggestionClient>,
    videos: &mut Vec<Video>,
) {
    let needed = config.min_videos.saturating_sub(videos.len());
    if needed == 0 {
        return;
    }
    let mut seen_queries: HashSet<String> = HashSet::new();
    if let Some(client) = suggestions {
        match client.related_queries(topic, needed).await {
            Ok(queries) => {
                for query in queries {
                    if videos.len() >= config.min_videos {
                        break;
                    }
                    push_suggestion(&query, &mut seen_queries, videos);
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "suggestion client failed, using templates");
            }
        }
    }

    let mut round = 0usize;
    while videos.len() < config.min_videos {
        let suffix = TEMPLATE_SUFFIXES[round % TEMPLATE_SUFFIXES.len()];
        let cycle = round / TEMPLATE_SUFFIXES.len();
        let query = if cycle == 0 {
            format!("{topic} {suffix}")
        } else {
            format!("{topic} {suffix} {}", cycle + 1)
        };
        push_suggestion(&query, &mut seen_queries, videos);
        round += 1;
    }
}

/// Run the structured scrape over a fetched results page, then the raw id
/// scan whenever the structured pass leaves the list below the floor —
/// the scan dedups against ids already collected, so a partial blob is
/// topped up rather than discarded.
fn scrape_page(
    html: &str,
    topic: &str,
    config: &GatherConfig,
    seen_ids: &mut HashSet<String>,
    videos: &mut Vec<Video>,
) {
    let remaining = config.max_videos.saturating_sub(videos.len());
    let structured = scrape::extract_initial_data(html)
        .ok_or_else(|| SourceError::Parse("ytInitialData blob not found".into()))
        .and_then(|blob| scrape::parse_initial_data(blob, remaining, seen_ids));
    match structured {
        Ok(found) => {
            videos.extend(found);
        }
        Err(err) => {
            tracing::debug!(error = %err, "structured scrape failed");
        }
    }
    if videos.len() >= config.min_videos {
        return;
    }
    tracing::debug!(count = videos.len(), "below floor after structured scrape, scanning raw ids");
    let remaining = config.max_videos.saturating_sub(videos.len());
    videos.extend(scrape::scan_video_ids(html, topic, remaining, seen_ids));
}

async fn fetch_results_page(topic: &str, config: &GatherConfig) -> Result<String, SourceError> {
    let client = http::build_client(config)?;
    let response = client
        .get(RESULTS_URL)
        .query(&[("search_query", topic)])
        .send()
        .await?
        .error_for_status()?;
    Ok(response.text().await?)
}

fn push_suggestion(query: &str, seen_queries: &mut HashSet<String>, videos: &mut Vec<Video>) {
    let query = query.trim();
    if query.is_empty() {
        return;
    }
    if !seen_queries.insert(query.to_lowercase()) {
        return;
    }
    videos.push(Video::SuggestedSearch {
        query: query.to_string(),
        url: search_url(query),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedSuggestions(Vec<String>);

    #[async_trait]
    impl SuggestionClient for FixedSuggestions {
        async fn related_queries(
            &self,
            _topic: &str,
            count: usize,
        ) -> Result<Vec<String>, SourceError> {
            Ok(self.0.iter().take(count).cloned().collect())
        }
    }

    struct FailingSuggestions;

    #[async_trait]
    impl SuggestionClient for FailingSuggestions {
        async fn related_queries(
            &self,
            _topic: &str,
            _count: usize,
        ) -> Result<Vec<String>, SourceError> {
            Err(SourceError::Llm("backend offline".into()))
        }
    }

    fn offline_config() -> GatherConfig {
        // Point the walk at nothing so the network tiers fail fast.
        GatherConfig {
            youtube_api_key: None,
            timeout_seconds: 1,
            ..GatherConfig::default()
        }
    }

    #[test]
    fn search_url_percent_encodes() {
        let url = search_url("rust & ownership");
        assert_eq!(
            url,
            "https://www.youtube.com/results?search_query=rust+%26+ownership"
        );
    }

    #[test]
    fn suggestions_dedup_case_insensitively() {
        let mut seen = HashSet::new();
        let mut videos = Vec::new();
        push_suggestion("Rust Tutorial", &mut seen, &mut videos);
        push_suggestion("rust tutorial", &mut seen, &mut videos);
        push_suggestion("  ", &mut seen, &mut videos);
        assert_eq!(videos.len(), 1);
    }

    #[test]
    fn templated_queries_stay_unique_past_one_cycle() {
        let mut seen = HashSet::new();
        let mut videos = Vec::new();
        for round in 0..TEMPLATE_SUFFIXES.len() * 2 {
            let suffix = TEMPLATE_SUFFIXES[round % TEMPLATE_SUFFIXES.len()];
            let cycle = round / TEMPLATE_SUFFIXES.len();
            let query = if cycle == 0 {
                format!("rust {suffix}")
            } else {
                format!("rust {suffix} {}", cycle + 1)
            };
            push_suggestion(&query, &mut seen, &mut videos);
        }
        assert_eq!(videos.len(), TEMPLATE_SUFFIXES.len() * 2);
    }

    #[test]
    fn scrape_page_falls_back_to_raw_scan() {
        let config = GatherConfig::default();
        let mut seen = HashSet::new();
        let mut videos = Vec::new();
        // No ytInitialData blob, but raw watch links are present.
        let html = r#"<a href="/watch?v=aaaaaaaaaa1">x</a> <a href="/watch?v=aaaaaaaaaa2">y</a>"#;
        scrape_page(html, "rust", &config, &mut seen, &mut videos);
        assert_eq!(videos.len(), 2);
        assert!(videos.iter().all(|v| v.is_verified()));
    }

    #[test]
    fn raw_scan_tops_up_a_short_structured_result() {
        // One entry in the blob, four more ids only in the page body.
        // With the default floor of five, all five must be collected and
        // the blob id must not be duplicated by the scan.
        let html = r#"<script>
var ytInitialData = {"contents":{"twoColumnSearchResultsRenderer":{"primaryContents":{"sectionListRenderer":{"contents":[{"itemSectionRenderer":{"contents":[
{"videoRenderer":{"videoId":"bbbbbbbbbb1","title":{"runs":[{"text":"Rust Intro"}]},"ownerText":{"runs":[{"text":"A Channel"}]}}}
]}}]}}}}};</script>
<a href="/watch?v=bbbbbbbbbb1">dup</a>
<a href="/watch?v=bbbbbbbbbb2">a</a><a href="/watch?v=bbbbbbbbbb3">b</a>
<a href="/watch?v=bbbbbbbbbb4">c</a><a href="/watch?v=bbbbbbbbbb5">d</a>"#;
        let config = GatherConfig::default();
        let mut seen = HashSet::new();
        let mut videos = Vec::new();
        scrape_page(html, "rust", &config, &mut seen, &mut videos);
        assert_eq!(videos.len(), 5);
        assert!(videos.iter().all(|v| v.is_verified()));
        // Structured entry first, with its real title.
        match &videos[0] {
            Video::Verified { id, title, .. } => {
                assert_eq!(id, "bbbbbbbbbb1");
                assert_eq!(title, "Rust Intro");
            }
            other => panic!("expected verified video, got {other:?}"),
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn raw_scan_skipped_once_structured_result_meets_floor() {
        let renderers: Vec<String> = (0..5)
            .map(|i| {
                format!(
                    r#"{{"videoRenderer":{{"videoId":"cccccccccc{i}","title":{{"runs":[{{"text":"T{i}"}}]}},"ownerText":{{"runs":[{{"text":"C"}}]}}}}}}"#
                )
            })
            .collect();
        let html = format!(
            r#"<script>var ytInitialData = {{"contents":{{"twoColumnSearchResultsRenderer":{{"primaryContents":{{"sectionListRenderer":{{"contents":[{{"itemSectionRenderer":{{"contents":[{}]}}}}]}}}}}}}}}};</script>
<a href="/watch?v=ddddddddddd">extra</a>"#,
            renderers.join(",")
        );
        let config = GatherConfig::default();
        let mut seen = HashSet::new();
        let mut videos = Vec::new();
        scrape_page(&html, "rust", &config, &mut seen, &mut videos);
        // Floor met by the blob, so the body id is never scanned in.
        assert_eq!(videos.len(), 5);
        assert!(!seen.contains("ddddddddddd"));
    }

    #[tokio::test]
    async fn blank_topic_resolves_to_nothing() {
        let config = offline_config();
        let videos = resolve_videos("   ", &config, None).await;
        assert!(videos.is_empty());
    }

    #[tokio::test]
    async fn client_suggestions_fill_the_floor_first() {
        let config = GatherConfig::default();
        let client = FixedSuggestions(vec![
            "rust ownership explained".into(),
            "rust borrow checker deep dive".into(),
            "rust lifetimes".into(),
            "rust traits".into(),
            "rust async".into(),
        ]);
        let mut videos = Vec::new();
        fill_to_floor("rust", &config, Some(&client), &mut videos).await;
        assert_eq!(videos.len(), config.min_videos);
        assert!(videos.iter().any(|v| match v {
            Video::SuggestedSearch { query, .. } => query == "rust ownership explained",
            _ => false,
        }));
    }

    #[tokio::test]
    async fn templates_cover_a_failing_client() {
        let config = GatherConfig::default();
        let mut videos = Vec::new();
        fill_to_floor("rust", &config, Some(&FailingSuggestions), &mut videos).await;
        assert_eq!(videos.len(), config.min_videos);
        // Every filler entry must carry a usable results-page link.
        for video in &videos {
            match video {
                Video::SuggestedSearch { url, .. } => {
                    assert!(url.starts_with("https://www.youtube.com/results?search_query="));
                }
                other => panic!("expected suggestion, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn partial_verified_list_topped_up_not_replaced() {
        let config = GatherConfig::default();
        let mut videos = vec![Video::Verified {
            id: "aaaaaaaaaa1".into(),
            title: "Linear Algebra".into(),
            channel: "MIT".into(),
            url: scrape::watch_url("aaaaaaaaaa1"),
        }];
        fill_to_floor("linear algebra", &config, None, &mut videos).await;
        assert_eq!(videos.len(), config.min_videos);
        assert!(videos[0].is_verified());
        assert!(videos[1..].iter().all(|v| !v.is_verified()));
    }

    #[tokio::test]
    async fn fill_leaves_a_full_list_untouched() {
        let config = GatherConfig::default();
        // One entry past the floor, so the needed count would underflow
        // if the subtraction were unchecked.
        let mut videos: Vec<Video> = (0..config.min_videos + 1)
            .map(|i| Video::SuggestedSearch {
                query: format!("rust topic {i}"),
                url: search_url(&format!("rust topic {i}")),
            })
            .collect();
        fill_to_floor("rust", &config, Some(&FailingSuggestions), &mut videos).await;
        assert_eq!(videos.len(), config.min_videos + 1);
    }

    #[tokio::test]
    async fn resolver_always_meets_floor_and_cap() {
        let config = offline_config();
        let videos = resolve_videos("linear algebra", &config, None).await;
        assert!(videos.len() >= config.min_videos);
        assert!(videos.len() <= config.max_videos);
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_scrape_resolves_verified_videos() {
        let config = GatherConfig::default();
        let videos = resolve_videos("linear algebra", &config, None).await;
        assert!(!videos.is_empty());
        assert!(videos.iter().any(|v| v.is_verified()));
    }
}

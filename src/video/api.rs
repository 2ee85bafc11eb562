//! Official Data API tier of the video resolver.

use serde::Deserialize;

use crate::config::GatherConfig;
use crate::error::SourceError;
use crate::http;
use crate::types::Video;

use super::scrape::watch_url;

const API_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const API_MAX_RESULTS: usize = 50;

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: VideoId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoId {
    #[serde(default)]
    video_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
}

/// Search via the official API with the caller's key.
///
/// Asks for at least `config.min_videos` entries so a tight cap does not
/// starve the floor, clamped to the API's per-page maximum.
pub(crate) async fn search_official(
    topic: &str,
    api_key: &str,
    config: &GatherConfig,
) -> Result<Vec<Video>, SourceError> {
    let client = http::build_client(config)?;
    let requested = config
        .max_videos
        .max(config.min_videos)
        .min(API_MAX_RESULTS);
    let max_param = requested.to_string();

    let response = client
        .get(API_URL)
        .query(&[
            ("part", "snippet"),
            ("q", topic),
            ("type", "video"),
            ("maxResults", max_param.as_str()),
            ("key", api_key),
        ])
        .send()
        .await?
        .error_for_status()?;

    let payload: SearchResponse = response.json().await?;
    Ok(convert_items(payload, config.max_videos))
}

fn convert_items(payload: SearchResponse, max: usize) -> Vec<Video> {
    payload
        .items
        .into_iter()
        .filter(|item| !item.id.video_id.is_empty())
        .take(max)
        .map(|item| {
            let id = item.id.video_id;
            let url = watch_url(&id);
            Video::Verified {
                id,
                title: item.snippet.title,
                channel: item.snippet.channel_title,
                url,
            }
        })
        .collect()
}

//! Results-page scraping for the video resolver.
//!
//! Two extraction strategies over the same HTML fetch: the structured
//! `ytInitialData` JSON blob embedded in a script tag, and a raw scan for
//! 11-character video ids when the blob's shape has drifted.

use std::collections::HashSet;

use regex::Regex;

use crate::error::SourceError;
use crate::types::Video;

const INITIAL_DATA_MARKER: &str = "var ytInitialData = ";
const RENDERER_PATH: &str = "/contents/twoColumnSearchResultsRenderer/primaryContents\
                             /sectionListRenderer/contents/0/itemSectionRenderer/contents";

/// Direct watch URL for a video id.
pub(crate) fn watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={id}")
}

/// Locate the embedded `ytInitialData` JSON object in a results page.
///
/// Returns the exact `{...}` slice. The blob regularly contains `;` and
/// `}` inside string values, so the end is found by brace balancing with
/// string/escape tracking rather than delimiter splitting.
pub(crate) fn extract_initial_data(html: &str) -> Option<&str> {
    let start = html.find(INITIAL_DATA_MARKER)? + INITIAL_DATA_MARKER.len();
    let rest = &html[start..];
    let end = balanced_object_end(rest)?;
    Some(&rest[..=end])
}

/// Index of the `}` closing the object that starts at byte 0, or `None`
/// if the input does not start an object or the object never closes.
fn balanced_object_end(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'{') {
        return None;
    }
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Decode structured video entries from the `ytInitialData` blob.
///
/// Walks the search-results renderer path and collects every
/// `videoRenderer` with a video id, skipping ids already in `seen`.
pub(crate) fn parse_initial_data(
    json: &str,
    max: usize,
    seen: &mut HashSet<String>,
) -> Result<Vec<Video>, SourceError> {
    let data: serde_json::Value = serde_json::from_str(json)?;
    let contents = data
        .pointer(RENDERER_PATH)
        .and_then(|v| v.as_array())
        .ok_or_else(|| SourceError::Parse("search renderer path missing".into()))?;

    let mut videos = Vec::new();
    for item in contents {
        if videos.len() >= max {
            break;
        }
        let Some(renderer) = item.get("videoRenderer") else {
            continue;
        };
        let Some(id) = renderer.get("videoId").and_then(|v| v.as_str()) else {
            continue;
        };
        if !seen.insert(id.to_string()) {
            continue;
        }
        let title = renderer
            .pointer("/title/runs/0/text")
            .and_then(|v| v.as_str())
            .unwrap_or("No Title");
        let channel = renderer
            .pointer("/ownerText/runs/0/text")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown Channel");
        videos.push(Video::Verified {
            id: id.to_string(),
            title: title.to_string(),
            channel: channel.to_string(),
            url: watch_url(id),
        });
    }
    tracing::debug!(count = videos.len(), "ytInitialData entries parsed");
    Ok(videos)
}

/// Structural fallback: scan raw HTML for `watch?v=` video ids.
///
/// Titles are unknown at this level, so entries carry the topic as their
/// title and a generic channel label.
pub(crate) fn scan_video_ids(
    html: &str,
    topic: &str,
    max: usize,
    seen: &mut HashSet<String>,
) -> Vec<Video> {
    let Ok(pattern) = Regex::new(r"watch\?v=([a-zA-Z0-9_-]{11})") else {
        return Vec::new();
    };
    let mut videos = Vec::new();
    for caps in pattern.captures_iter(html) {
        if videos.len() >= max {
            break;
        }
        let Some(id) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };
        if !seen.insert(id.to_string()) {
            continue;
        }
        videos.push(Video::Verified {
            id: id.to_string(),
            title: topic.to_string(),
            channel: "YouTube".to_string(),
            url: watch_url(id),
        });
    }
    tracing::debug!(count = videos.len(), "video ids scanned from raw HTML");
    videos
}

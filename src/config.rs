//! Aggregation configuration with sensible defaults.
//!
//! [`GatherConfig`] controls which article sources are queried, result
//! caps, the video-count floor, and outbound request behaviour.

use crate::error::SourceError;
use crate::types::ArticleSource;

/// Configuration for one aggregation pass.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct GatherConfig {
    /// Article sources in priority order. Queried sequentially; on a title
    /// collision the earlier source wins.
    pub sources: Vec<ArticleSource>,
    /// Maximum merged article count (and pdf subset cap).
    pub max_results: usize,
    /// Maximum video entries returned by the resolver.
    pub max_videos: usize,
    /// Minimum video entries the resolver guarantees, synthesizing search
    /// links when real lookups fall short. Must not exceed `max_videos`.
    pub min_videos: usize,
    /// Maximum news headlines fetched across all feeds.
    pub max_news: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// YouTube Data API key. When absent the resolver starts at the
    /// scrape tier.
    pub youtube_api_key: Option<String>,
    /// Custom User-Agent string. If `None`, rotates through a built-in
    /// list of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            sources: ArticleSource::all().to_vec(),
            max_results: 20,
            max_videos: 20,
            min_videos: 5,
            max_news: 10,
            timeout_seconds: 12,
            youtube_api_key: None,
            user_agent: None,
        }
    }
}

impl GatherConfig {
    /// Validates this configuration, returning an error if any field is
    /// invalid.
    ///
    /// Checks:
    /// - `max_results` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    /// - `sources` must not be empty
    /// - `min_videos` must be <= `max_videos`
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.max_results == 0 {
            return Err(SourceError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SourceError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.sources.is_empty() {
            return Err(SourceError::Config(
                "at least one article source must be enabled".into(),
            ));
        }
        if self.min_videos > self.max_videos {
            return Err(SourceError::Config(
                "min_videos must be <= max_videos".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = GatherConfig::default();
        assert_eq!(config.max_results, 20);
        assert_eq!(config.max_videos, 20);
        assert_eq!(config.min_videos, 5);
        assert_eq!(config.max_news, 10);
        assert_eq!(config.timeout_seconds, 12);
        assert!(config.youtube_api_key.is_none());
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn default_sources_in_priority_order() {
        let config = GatherConfig::default();
        assert_eq!(
            config.sources,
            vec![
                ArticleSource::SemanticScholar,
                ArticleSource::Crossref,
                ArticleSource::Arxiv,
            ]
        );
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(GatherConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_max_results_rejected() {
        let config = GatherConfig {
            max_results: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = GatherConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn empty_sources_rejected() {
        let config = GatherConfig {
            sources: vec![],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("source"));
    }

    #[test]
    fn video_floor_above_cap_rejected() {
        let config = GatherConfig {
            min_videos: 10,
            max_videos: 5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_videos"));
    }

    #[test]
    fn zero_min_videos_valid() {
        let config = GatherConfig {
            min_videos: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn single_source_valid() {
        let config = GatherConfig {
            sources: vec![ArticleSource::Arxiv],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}

//! Error types for the edusearch crate.
//!
//! Adapters return typed errors so that failures stay diagnosable in logs.
//! The aggregation boundary converts every adapter error into an empty
//! result list — callers never see a provider failure, operators do.

/// Errors that can occur while querying an external content provider.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// An HTTP request to a provider failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A provider did not respond within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// A provider response could not be parsed (JSON, XML, or embedded blob).
    #[error("parse error: {0}")]
    Parse(String),

    /// The generative-AI suggestion backend failed.
    #[error("suggestion backend error: {0}")]
    Llm(String),

    /// Invalid aggregation configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout(err.to_string())
        } else {
            SourceError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {err}"))
    }
}

impl From<quick_xml::DeError> for SourceError {
    fn from(err: quick_xml::DeError) -> Self {
        SourceError::Parse(format!("XML: {err}"))
    }
}

/// Convenience type alias for edusearch results.
pub type Result<T> = std::result::Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = SourceError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_timeout() {
        let err = SourceError::Timeout("exceeded 12s limit".into());
        assert_eq!(err.to_string(), "request timed out: exceeded 12s limit");
    }

    #[test]
    fn display_parse() {
        let err = SourceError::Parse("missing field `title`".into());
        assert_eq!(err.to_string(), "parse error: missing field `title`");
    }

    #[test]
    fn display_llm() {
        let err = SourceError::Llm("quota exhausted".into());
        assert_eq!(err.to_string(), "suggestion backend error: quota exhausted");
    }

    #[test]
    fn display_config() {
        let err = SourceError::Config("max_results must be > 0".into());
        assert_eq!(err.to_string(), "config error: max_results must be > 0");
    }

    #[test]
    fn json_error_maps_to_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: SourceError = json_err.into();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SourceError>();
    }
}

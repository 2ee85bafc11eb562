//! Outbound HTTP client for provider requests.
//!
//! Every adapter builds its client here so the timeout and User-Agent
//! policy stay uniform across providers. The academic APIs accept any
//! client string; the video results page serves a stripped-down variant
//! to obvious non-browsers, which is why the defaults look like browsers.

use std::time::Duration;

use rand::seq::SliceRandom;

use crate::config::GatherConfig;
use crate::error::SourceError;

/// Browser User-Agent strings drawn at random when the config carries no
/// override.
const BROWSER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.6 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:134.0) Gecko/20100101 Firefox/134.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36 Edg/132.0.0.0",
];

/// Build the [`reqwest::Client`] shared by one adapter call: configured
/// timeout, cookie jar (the results page sets consent cookies across its
/// redirects), a small redirect allowance, and the User-Agent policy of
/// [`user_agent_for`].
///
/// # Errors
///
/// Returns [`SourceError::Http`] if client construction fails.
pub fn build_client(config: &GatherConfig) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .user_agent(user_agent_for(config))
        .timeout(Duration::from_secs(config.timeout_seconds))
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SourceError::Http(format!("client construction failed: {e}")))
}

/// The User-Agent for one adapter call: the configured override when set,
/// otherwise a randomly drawn browser string.
fn user_agent_for(config: &GatherConfig) -> String {
    if let Some(custom) = &config.user_agent {
        return custom.clone();
    }
    let mut rng = rand::thread_rng();
    BROWSER_AGENTS
        .choose(&mut rng)
        .copied()
        .unwrap_or(BROWSER_AGENTS[0])
        .to_string()
}

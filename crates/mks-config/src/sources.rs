//! Remote endpoint configuration.

use serde::{Deserialize, Serialize};

const DEFAULT_LIVE_URL: &str = "https://macaumarksix.com/api/live2";
const DEFAULT_HISTORY_URL: &str = "https://history.macaumarksix.com/history/macaujc2/y";

fn default_live_url() -> String {
    DEFAULT_LIVE_URL.to_string()
}

fn default_history_url() -> String {
    DEFAULT_HISTORY_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("mks/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourcesConfig {
    /// Endpoint returning a JSON array of the most recent draws.
    #[serde(default = "default_live_url")]
    pub live_url: String,

    /// Base of the per-year history endpoint; the year is appended as a path segment.
    #[serde(default = "default_history_url")]
    pub history_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            live_url: default_live_url(),
            history_url: default_history_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl SourcesConfig {
    /// History URL for one calendar year.
    #[must_use]
    pub fn history_url_for(&self, year: i32) -> String {
        format!("{}/{year}", self.history_url.trim_end_matches('/'))
    }
}

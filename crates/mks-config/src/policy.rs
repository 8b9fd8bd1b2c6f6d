//! Failure policies for the two fetch stages.

use serde::{Deserialize, Serialize};

/// What a live-endpoint failure does to the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveErrorPolicy {
    /// Abort without writing.
    #[default]
    Abort,
    /// Log and continue with no live records.
    Skip,
}

/// What a single history-year failure does to the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryErrorPolicy {
    /// Log, drop that year, keep going.
    #[default]
    Skip,
    /// Abort without writing.
    Abort,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub on_live_error: LiveErrorPolicy,

    #[serde(default)]
    pub on_history_year_error: HistoryErrorPolicy,
}

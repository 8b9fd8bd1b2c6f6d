//! Duplicate resolution settings.

use mks_core::Priority;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MergeConfig {
    /// Source order, highest priority first: `["live", "history", "persisted"]`.
    #[serde(default)]
    pub priority: Priority,
}

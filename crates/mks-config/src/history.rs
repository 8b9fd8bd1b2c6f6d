//! Which history years a run fetches.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_start_year() -> i32 {
    2020
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// First year fetched (inclusive).
    #[serde(default = "default_start_year")]
    pub start_year: i32,

    /// Last year fetched (inclusive). Defaults to the current calendar year.
    #[serde(default)]
    pub end_year: Option<i32>,

    /// Fetch only the last year, ignoring `start_year`.
    #[serde(default)]
    pub current_year_only: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            end_year: None,
            current_year_only: false,
        }
    }
}

impl HistoryConfig {
    /// Years to fetch, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the range is empty.
    pub fn years(&self, current_year: i32) -> Result<RangeInclusive<i32>, ConfigError> {
        let end = self.end_year.unwrap_or(current_year);
        if self.current_year_only {
            return Ok(end..=end);
        }
        if self.start_year > end {
            return Err(ConfigError::InvalidValue {
                field: "history.start_year".to_string(),
                reason: format!("{} is after end year {end}", self.start_year),
            });
        }
        Ok(self.start_year..=end)
    }
}

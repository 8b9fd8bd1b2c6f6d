use std::path::PathBuf;

use serde::Serialize;

/// Outcome of one synchronization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Data file read and (unless `dry_run`) replaced.
    pub path: PathBuf,
    /// Records read from the data file.
    pub persisted: usize,
    /// Records returned by the live endpoint.
    pub live: usize,
    /// Records returned by all history years together.
    pub history: usize,
    /// Years whose history request succeeded.
    pub years_fetched: Vec<i32>,
    /// Years skipped after a failed request.
    pub years_skipped: Vec<i32>,
    /// Whether the live fetch failed and was skipped.
    pub live_skipped: bool,
    /// Items dropped for lacking a usable `expect`, across all sources.
    pub malformed: usize,
    /// Identifiers present now that the data file did not have.
    pub added: usize,
    /// Records in the final set.
    pub total: usize,
    /// False for dry runs.
    pub written: bool,
}

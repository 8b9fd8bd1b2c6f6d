//! Synchronization error types.

use std::path::PathBuf;

use mks_config::ConfigError;
use mks_source::SourceError;
use thiserror::Error;

/// Fatal errors of a synchronization run. Each one aborts before the data
/// file is touched, except `Write`, which leaves the previous file in place.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The data file exists but is not a JSON array.
    #[error("persisted state at {path} is corrupt: {source}")]
    PersistedStateCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The data file exists but could not be read.
    #[error("failed to read persisted state at {path}: {source}")]
    PersistedStateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Live fetch failed and the live policy is `abort`.
    #[error("live fetch failed: {0}")]
    LiveFetch(#[source] SourceError),

    /// History fetch for one year failed and the history policy is `abort`.
    #[error("history fetch for {year} failed: {source}")]
    HistoryFetch {
        year: i32,
        #[source]
        source: SourceError,
    },

    /// Records could not be serialized.
    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The data file could not be written or moved into place.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The run's configuration is unusable (e.g. empty year range).
    #[error(transparent)]
    Config(#[from] ConfigError),
}

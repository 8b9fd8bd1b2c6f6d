//! Cross-cutting error types for mks.
//!
//! Domain-specific errors (`SourceError`, `SyncError`) are defined in their
//! respective crates and converge into `anyhow` in `mks-cli`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A source priority list is not a permutation of all source kinds.
    #[error("Invalid source priority: {0}")]
    InvalidPriority(String),
}

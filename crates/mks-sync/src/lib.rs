//! # mks-sync
//!
//! One synchronization run: load the data file, fetch live and history draws,
//! merge them by priority, sort newest first, and replace the data file.
//!
//! Runs are sequential and self-contained. Nothing here locks the data file;
//! overlapping runs must be prevented by whoever schedules them.

mod error;
mod report;
pub mod store;
mod synchronizer;

pub use error::SyncError;
pub use report::SyncReport;
pub use synchronizer::{SyncStep, Synchronizer};

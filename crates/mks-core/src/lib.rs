//! # mks-core
//!
//! Core types and merge rules for mks.
//!
//! This crate provides the foundational types shared across all mks crates:
//! - [`Expect`], the typed draw identifier used as dedup and sort key
//! - [`Record`], one draw result carried through unmodified
//! - [`SourceKind`] and [`Priority`], which decide which duplicate wins
//! - [`merge`], the dedup-then-sort step of a synchronization run
//! - Cross-cutting error types

pub mod errors;
pub mod expect;
pub mod merge;
pub mod record;

pub use errors::CoreError;
pub use expect::Expect;
pub use merge::{Priority, SourceKind, merge};
pub use record::{ParsedRecords, Record, parse_records};

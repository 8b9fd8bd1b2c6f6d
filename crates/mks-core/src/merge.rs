//! Merge, dedup and ordering of draw records.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CoreError, Expect, Record};

/// Where a record came from during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Freshly fetched from the live endpoint.
    Live,
    /// Freshly fetched from the per-year history endpoint.
    History,
    /// Read from the previously written data file.
    Persisted,
}

impl SourceKind {
    pub const ALL: [Self; 3] = [Self::Live, Self::History, Self::Persisted];
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Live => "live",
            Self::History => "history",
            Self::Persisted => "persisted",
        })
    }
}

/// Source order for duplicate resolution, highest priority first.
///
/// Always a permutation of [`SourceKind::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SourceKind>", into = "Vec<SourceKind>")]
pub struct Priority(Vec<SourceKind>);

impl Priority {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPriority`] if a kind is repeated or missing.
    pub fn new(order: Vec<SourceKind>) -> Result<Self, CoreError> {
        let unique: HashSet<SourceKind> = order.iter().copied().collect();
        if order.len() != SourceKind::ALL.len() || unique.len() != order.len() {
            let listed: Vec<String> = order.iter().map(ToString::to_string).collect();
            return Err(CoreError::InvalidPriority(format!(
                "expected each of live, history, persisted exactly once, got [{}]",
                listed.join(", ")
            )));
        }
        Ok(Self(order))
    }

    pub fn iter(&self) -> impl Iterator<Item = SourceKind> + '_ {
        self.0.iter().copied()
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self(SourceKind::ALL.to_vec())
    }
}

impl TryFrom<Vec<SourceKind>> for Priority {
    type Error = CoreError;

    fn try_from(order: Vec<SourceKind>) -> Result<Self, Self::Error> {
        Self::new(order)
    }
}

impl From<Priority> for Vec<SourceKind> {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

/// Merge the three record sets into one deduplicated, newest-first sequence.
///
/// Sources are visited in `priority` order; within a source, input order is
/// kept. The first record seen for each [`Expect`] survives and later
/// duplicates are dropped whole.
#[must_use]
pub fn merge(
    priority: &Priority,
    live: Vec<Record>,
    history: Vec<Record>,
    persisted: Vec<Record>,
) -> Vec<Record> {
    let capacity = live.len() + history.len() + persisted.len();
    let mut batches = [Some(live), Some(history), Some(persisted)];
    let mut seen: HashSet<Expect> = HashSet::with_capacity(capacity);
    let mut merged = Vec::with_capacity(capacity);

    for kind in priority.iter() {
        let slot = match kind {
            SourceKind::Live => 0,
            SourceKind::History => 1,
            SourceKind::Persisted => 2,
        };
        for record in batches[slot].take().unwrap_or_default() {
            if seen.insert(record.expect().clone()) {
                merged.push(record);
            }
        }
    }

    merged.sort_by(|a, b| Expect::newest_first(a.expect(), b.expect()));
    merged
}

//! Draw period identifier.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// The `expect` value of a draw (e.g. `"2025001"`).
///
/// Equality is exact string equality, which is what deduplication keys on.
/// Records are the only way in from JSON; see `Record::from_value`.
/// Ordering for output goes through [`Expect::newest_first`], not `Ord`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Expect(String);

impl Expect {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the identifier.
    ///
    /// Surrounding whitespace is ignored; the rest must be ASCII digits that
    /// fit in a `u64`. Signs, decimal points and trailing text yield `None`.
    #[must_use]
    pub fn numeric(&self) -> Option<u64> {
        let trimmed = self.0.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        trimmed.parse().ok()
    }

    /// Output order: highest numeric value first, then malformed identifiers
    /// (descending by raw text) after every numeric one.
    #[must_use]
    pub fn newest_first(a: &Self, b: &Self) -> Ordering {
        match (a.numeric(), b.numeric()) {
            (Some(x), Some(y)) => y.cmp(&x).then_with(|| b.0.cmp(&a.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.0.cmp(&a.0),
        }
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Expect {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

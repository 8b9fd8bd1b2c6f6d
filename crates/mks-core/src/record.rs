//! Draw records.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::Expect;

/// Field holding the draw identifier.
pub const EXPECT_FIELD: &str = "expect";

/// One draw result.
///
/// `body` is the object exactly as received (including `expect`); only the
/// identifier is lifted out so merge and sort never re-read the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    expect: Expect,
    body: Map<String, Value>,
}

impl Record {
    /// Build a record from an arbitrary JSON value.
    ///
    /// Returns `None` for non-objects and for objects whose `expect` is missing,
    /// null, an empty string, or neither a string nor a non-negative integer.
    /// An integer `expect` keys as its decimal text, so `2025001` and
    /// `"2025001"` are the same draw.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(body) = value else {
            return None;
        };
        let expect = match body.get(EXPECT_FIELD)? {
            Value::String(s) if !s.is_empty() => Expect::new(s.clone()),
            Value::Number(n) => Expect::new(n.as_u64()?.to_string()),
            _ => return None,
        };
        Some(Self { expect, body })
    }

    #[must_use]
    pub const fn expect(&self) -> &Expect {
        &self.expect
    }

    #[must_use]
    pub const fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    /// Convenience accessor for a string payload field (e.g. `openTime`).
    #[must_use]
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.body.get(key).and_then(Value::as_str)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

/// Records accepted from one source, plus how many items were dropped.
#[derive(Debug, Default)]
pub struct ParsedRecords {
    pub records: Vec<Record>,
    pub skipped: usize,
}

/// Convert raw JSON items into records, dropping items without a usable `expect`.
#[must_use]
pub fn parse_records(items: Vec<Value>) -> ParsedRecords {
    let total = items.len();
    let records: Vec<Record> = items.into_iter().filter_map(Record::from_value).collect();
    ParsedRecords {
        skipped: total - records.len(),
        records,
    }
}

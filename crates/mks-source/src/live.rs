//! Live endpoint body parsing.

use serde_json::Value;

use crate::error::SourceError;

/// The live endpoint answers with a bare JSON array.
pub fn parse_live(body: &str) -> Result<Vec<Value>, SourceError> {
    serde_json::from_str(body).map_err(|e| SourceError::Parse(format!("live response: {e}")))
}

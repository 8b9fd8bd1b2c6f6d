//! History endpoint body parsing.

use serde::Deserialize;
use serde_json::Value;

use crate::error::SourceError;

/// One year of history: `{ "data": [...], ... }`. Other fields are ignored.
#[derive(Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
}

/// A missing or null `data` field means the year has no draws.
pub fn parse_history(body: &str) -> Result<Vec<Value>, SourceError> {
    let response: HistoryResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::Parse(format!("history response: {e}")))?;
    Ok(response.data.unwrap_or_default())
}

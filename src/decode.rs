//! Response decoding: map successful response bodies into typed results.
//!
//! Decoding never touches the network; it consumes the parsed JSON of a
//! validated response. A missing field or wrong shape is a [`Failure::Decode`],
//! normalized by the caller like any other failure.

use serde_json::Value;

use crate::error::Failure;
use crate::types::Chunk;

/// Member collection of an API Platform (hydra) search response.
const SEARCH_MEMBER_FIELD: &str = "hydra:member";
const RESULT_FIELD: &str = "result";
const SHEETS_FIELD: &str = "sheets";
const CONTENT_FIELD: &str = "content";

/// Decode a chunk search response, preserving the order returned by the API.
pub(crate) fn search_results(value: &Value) -> Result<Vec<Chunk>, Failure> {
    let members = value
        .get(SEARCH_MEMBER_FIELD)
        .and_then(Value::as_array)
        .ok_or_else(|| missing(SEARCH_MEMBER_FIELD))?;

    members
        .iter()
        .map(|row| {
            serde_json::from_value(row.clone())
                .map_err(|e| Failure::Decode(format!("malformed search result: {e}")))
        })
        .collect()
}

/// Extract the `result` object of a structured-generation response.
pub(crate) fn structured_result(value: &Value) -> Result<Value, Failure> {
    value.get(RESULT_FIELD).cloned().ok_or_else(|| missing(RESULT_FIELD))
}

/// Extract the `sheets` list of a sheet-generation response.
pub(crate) fn sheets(value: &Value) -> Result<Vec<Value>, Failure> {
    value
        .get(SHEETS_FIELD)
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| missing(SHEETS_FIELD))
}

/// Extract the `content` text of a PDF extraction response.
pub(crate) fn pdf_content(value: &Value) -> Result<String, Failure> {
    value
        .get(CONTENT_FIELD)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| missing(CONTENT_FIELD))
}

fn missing(field: &str) -> Failure {
    Failure::Decode(format!("response is missing the expected `{field}` field"))
}

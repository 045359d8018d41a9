//! JSON codec for question files.
//!
//! The payload is a top-level array of objects with the same snake_case keys
//! as the CSV columns; `options` and `correct_answers` are native arrays.

use serde_json::Value;

use crate::error::{CodecError, ImportError, RowError};
use crate::model::QuestionInput;
use crate::record::BulkImportQuestion;

/// MIME type handed to the export sink for JSON payloads.
pub const JSON_MIME_TYPE: &str = "application/json";

/// Parse a JSON payload into records.
///
/// A payload that is not valid JSON, or not an array, is fatal. Each array
/// item is decoded on its own, so one malformed item becomes a row error
/// tagged with its 1-based position.
pub fn parse_json_records(
    text: &str,
) -> Result<Vec<Result<BulkImportQuestion, RowError>>, ImportError> {
    let payload: Value = serde_json::from_str(text).map_err(ImportError::InvalidJson)?;

    let items = match payload {
        Value::Array(items) => items,
        Value::Object(_) => return Err(ImportError::NotAnArray("object")),
        Value::String(_) => return Err(ImportError::NotAnArray("string")),
        Value::Number(_) => return Err(ImportError::NotAnArray("number")),
        Value::Bool(_) => return Err(ImportError::NotAnArray("boolean")),
        Value::Null => return Err(ImportError::NotAnArray("null")),
    };

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<BulkImportQuestion>(item)
                .map_err(|e| RowError::item(i + 1, e.to_string()))
        })
        .collect())
}

/// Serialize questions as a pretty-printed JSON array in the import shape.
pub fn questions_to_json<Q: AsRef<QuestionInput>>(questions: &[Q]) -> Result<String, CodecError> {
    let records: Vec<BulkImportQuestion> = questions
        .iter()
        .map(|q| BulkImportQuestion::from(q.as_ref()))
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

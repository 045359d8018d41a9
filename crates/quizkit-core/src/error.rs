//! Error types for the import and export paths.
//!
//! Import failures come in two tiers. [`ImportError`] is fatal and aborts the
//! whole file; [`RowError`] belongs to a single record and is collected so the
//! rest of the batch can still be imported. [`SessionError`] covers answer
//! selection while a quiz is being taken.

use thiserror::Error;

/// Errors that abort an entire import attempt.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file bytes are not valid UTF-8 text.
    #[error("file is not readable as UTF-8 text: {0}")]
    Unreadable(#[from] std::string::FromUtf8Error),

    /// The top-level JSON payload does not parse.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The top-level JSON payload parsed but is not an array.
    #[error("expected a JSON array of questions, found {0}")]
    NotAnArray(&'static str),

    /// A CSV file with no header line.
    #[error("CSV file is empty (no header line)")]
    MissingHeader,
}

/// Where a row-level error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLocation {
    /// 1-based physical line in a CSV file.
    Line(usize),
    /// 1-based position in a JSON array.
    Item(usize),
}

impl std::fmt::Display for RowLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowLocation::Line(n) => write!(f, "Line {n}"),
            RowLocation::Item(n) => write!(f, "Item {n}"),
        }
    }
}

/// A single record that could not be turned into a valid question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {message}")]
pub struct RowError {
    pub location: RowLocation,
    pub message: String,
}

impl RowError {
    pub fn line(line: usize, message: impl Into<String>) -> Self {
        Self {
            location: RowLocation::Line(line),
            message: message.into(),
        }
    }

    pub fn item(item: usize, message: impl Into<String>) -> Self {
        Self {
            location: RowLocation::Item(item),
            message: message.into(),
        }
    }
}

/// Errors from the export codecs.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV output was not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to flush CSV writer: {0}")]
    Flush(String),
}

/// Errors from recording answers during a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The question id is not part of this quiz.
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    /// The option index does not exist on the question.
    #[error("option {index} does not exist on question {question_id}")]
    OptionOutOfRange { question_id: String, index: i64 },
}

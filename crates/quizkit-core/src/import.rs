//! Bulk import pipeline.
//!
//! Turns a CSV or JSON file into validated questions. Problems with single
//! records are collected as [`RowError`]s and never stop the batch; only a
//! file that cannot be read as a whole fails with an [`ImportError`].

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::csv_codec::{parse_csv_line, parse_csv_row, split_records};
use crate::error::{ImportError, RowError, RowLocation};
use crate::json_codec::parse_json_records;
use crate::model::QuestionInput;
use crate::record::BulkImportQuestion;
use crate::traits::{FileSource, SourceFile};
use crate::validator::validate_quiz_question;

/// Supported import file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Json,
}

impl ImportFormat {
    /// CSV for a `.csv` extension (any case), JSON for everything else.
    pub fn from_filename(filename: &str) -> Self {
        let is_csv = Path::new(filename)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            ImportFormat::Csv
        } else {
            ImportFormat::Json
        }
    }
}

/// The result of importing one file.
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    /// Valid, de-duplicated questions in file order.
    pub questions: Vec<QuestionInput>,
    /// One entry per record that failed to parse or validate, in file order.
    pub errors: Vec<RowError>,
    /// Number of data records seen (header excluded).
    pub total: usize,
    /// Valid records dropped because their question text repeated an earlier one.
    pub duplicates: usize,
}

/// Counts and the leading errors of an import, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub duplicates: usize,
    /// At most the first `max_errors` row errors.
    pub errors: Vec<String>,
}

impl ImportOutcome {
    pub fn summary(&self, max_errors: usize) -> ImportSummary {
        ImportSummary {
            total: self.total,
            valid: self.questions.len(),
            invalid: self.errors.len(),
            duplicates: self.duplicates,
            errors: self
                .errors
                .iter()
                .take(max_errors)
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Import already-decoded text in the given format.
///
/// `topic_id` is attached to every imported question.
pub fn import_text(
    text: &str,
    format: ImportFormat,
    topic_id: &str,
) -> Result<ImportOutcome, ImportError> {
    let records = match format {
        ImportFormat::Csv => csv_records(text)?,
        ImportFormat::Json => parse_json_records(text)?
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.map(|record| (RowLocation::Item(i + 1), record)))
            .collect(),
    };

    let outcome = collect(records, topic_id);
    tracing::info!(
        total = outcome.total,
        valid = outcome.questions.len(),
        invalid = outcome.errors.len(),
        duplicates = outcome.duplicates,
        "import finished"
    );
    Ok(outcome)
}

/// Import a file, choosing the format from its extension.
pub fn import_questions(file: SourceFile, topic_id: &str) -> Result<ImportOutcome, ImportError> {
    let format = ImportFormat::from_filename(&file.filename);
    tracing::debug!(filename = %file.filename, ?format, "importing questions");
    let text = file.into_text()?;
    import_text(&text, format, topic_id)
}

/// Read from a [`FileSource`] and import.
pub fn import_from<S: FileSource + ?Sized>(
    source: &S,
    topic_id: &str,
) -> anyhow::Result<ImportOutcome> {
    let file = source.read().context("failed to read import file")?;
    let filename = file.filename.clone();
    import_questions(file, topic_id).with_context(|| format!("failed to import {filename}"))
}

type LocatedRecord = Result<(RowLocation, BulkImportQuestion), RowError>;

fn csv_records(text: &str) -> Result<Vec<LocatedRecord>, ImportError> {
    let mut records = split_records(text).into_iter();

    // Column order is positional, so the header is only skipped.
    if records.next().is_none() {
        return Err(ImportError::MissingHeader);
    }

    Ok(records
        .map(|record| {
            let record = record?;
            let values = parse_csv_line(&record.text);
            parse_csv_row(&values)
                .map(|parsed| (RowLocation::Line(record.line), parsed))
                .map_err(|message| RowError::line(record.line, message))
        })
        .collect())
}

fn collect(records: Vec<LocatedRecord>, topic_id: &str) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();
    let mut seen = HashSet::new();

    for record in records {
        outcome.total += 1;

        let (location, record) = match record {
            Ok(located) => located,
            Err(err) => {
                tracing::warn!("{err}");
                outcome.errors.push(err);
                continue;
            }
        };

        let question = record.into_input(topic_id);
        let problems = validate_quiz_question(&question);
        if !problems.is_empty() {
            let err = RowError {
                location,
                message: problems.join("; "),
            };
            tracing::warn!("{err}");
            outcome.errors.push(err);
            continue;
        }

        if !seen.insert(question.question_text.trim().to_lowercase()) {
            tracing::debug!(%location, "duplicate question skipped");
            outcome.duplicates += 1;
            continue;
        }

        tracing::debug!(%location, question_type = %question.question_type(), "record imported");
        outcome.questions.push(question);
    }

    outcome
}

//! Export of questions through an [`ExportSink`].

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::csv_codec::{csv_template, questions_to_csv, CSV_MIME_TYPE};
use crate::json_codec::{questions_to_json, JSON_MIME_TYPE};
use crate::model::QuestionInput;
use crate::traits::{ExportPayload, ExportSink};

/// File name used for the import template.
pub const TEMPLATE_FILENAME: &str = "quiz-import-template.csv";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_MIME_TYPE,
            ExportFormat::Json => JSON_MIME_TYPE,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// Encode `questions` and hand the payload to `sink`.
pub fn export_questions<Q: AsRef<QuestionInput>>(
    questions: &[Q],
    format: ExportFormat,
    filename: &str,
    sink: &mut dyn ExportSink,
) -> Result<()> {
    let payload = match format {
        ExportFormat::Csv => questions_to_csv(questions)?,
        ExportFormat::Json => questions_to_json(questions)?,
    };

    tracing::info!(count = questions.len(), %format, filename, "exporting questions");
    sink.deliver(ExportPayload {
        filename: filename.to_string(),
        mime_type: format.mime_type().to_string(),
        payload,
    })
    .with_context(|| format!("failed to deliver {filename}"))
}

/// Hand the CSV import template to `sink`.
pub fn export_template(sink: &mut dyn ExportSink) -> Result<()> {
    sink.deliver(ExportPayload {
        filename: TEMPLATE_FILENAME.to_string(),
        mime_type: CSV_MIME_TYPE.to_string(),
        payload: csv_template()?,
    })
    .context("failed to deliver template")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{create_empty_question, QuestionType};
    use crate::traits::MemorySink;

    #[test]
    fn format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xlsx".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Json.to_string(), "json");
    }

    #[test]
    fn exports_through_sink() {
        let questions = vec![create_empty_question(QuestionType::TrueFalse)
            .with_question_text("Water boils at 100C at sea level.")
            .with_correct_answers([0])];

        let mut sink = MemorySink::default();
        export_questions(&questions, ExportFormat::Csv, "bank.csv", &mut sink).unwrap();
        export_questions(&questions, ExportFormat::Json, "bank.json", &mut sink).unwrap();
        export_template(&mut sink).unwrap();

        assert_eq!(sink.delivered.len(), 3);
        assert_eq!(sink.delivered[0].mime_type, "text/csv");
        assert!(sink.delivered[0].payload.starts_with("question_text,"));
        assert_eq!(sink.delivered[1].mime_type, "application/json");
        assert!(sink.delivered[1].payload.trim_start().starts_with('['));
        assert_eq!(sink.delivered[2].filename, TEMPLATE_FILENAME);
    }

    struct FailingSink;

    impl ExportSink for FailingSink {
        fn deliver(&mut self, _: ExportPayload) -> Result<()> {
            anyhow::bail!("disk full")
        }
    }

    #[test]
    fn sink_failures_carry_context() {
        let questions: Vec<QuestionInput> = vec![];
        let err = export_questions(&questions, ExportFormat::Csv, "out.csv", &mut FailingSink)
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("failed to deliver out.csv"));
        assert!(message.contains("disk full"));
    }
}

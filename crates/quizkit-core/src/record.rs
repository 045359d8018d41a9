//! The external record shape used by bulk import and export files.
//!
//! CSV columns and JSON keys share the same snake_case names. A record is
//! mapped to a [`QuestionInput`] once it has been parsed; defaults for the
//! optional fields are applied here.

use serde::{Deserialize, Serialize};

use crate::model::{default_points, Difficulty, OptionIndex, QuestionInput, QuestionKind, QuestionType};

/// One question as it appears in an import or export file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkImportQuestion {
    pub question_text: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub correct_answers: Vec<OptionIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_points")]
    pub points: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_language: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

impl BulkImportQuestion {
    /// Map to the internal shape, attaching the owning topic.
    ///
    /// A code language on a non-code question is dropped. A code question
    /// without one gets an empty language, which the validator reports.
    pub fn into_input(self, topic_id: &str) -> QuestionInput {
        let kind = match self.question_type {
            QuestionType::Code => QuestionKind::Code {
                code_language: self.code_language.unwrap_or_default(),
            },
            other => QuestionKind::default_for(other),
        };

        QuestionInput {
            topic_id: topic_id.to_string(),
            question_text: self.question_text,
            kind,
            options: self.options,
            correct_answers: self.correct_answers,
            explanation: self.explanation.filter(|e| !e.trim().is_empty()),
            difficulty: self.difficulty,
            points: self.points,
            is_public: self.is_public,
        }
    }
}

impl From<&QuestionInput> for BulkImportQuestion {
    fn from(question: &QuestionInput) -> Self {
        Self {
            question_text: question.question_text.clone(),
            question_type: question.question_type(),
            options: question.options.clone(),
            correct_answers: question.correct_answers.clone(),
            explanation: question.explanation.clone(),
            difficulty: question.difficulty,
            points: question.points,
            code_language: question.code_language().map(str::to_string),
            is_public: question.is_public,
        }
    }
}

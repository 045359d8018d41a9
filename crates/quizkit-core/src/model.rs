//! Core data model types for quizkit.
//!
//! A question is split into the part an author edits ([`QuestionInput`]) and
//! the persisted record that wraps it with an id and audit fields
//! ([`QuizQuestion`]). The question type is a tagged variant so that only
//! code questions carry a code language.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Zero-based position of an answer choice within a question's options.
///
/// Signed so that negative indices from external input survive parsing and
/// can be reported by the validator.
pub type OptionIndex = i64;

/// The fixed options of a true/false question, in order.
pub const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

/// Code language assigned to new code questions.
pub const DEFAULT_CODE_LANGUAGE: &str = "javascript";

/// Minimum number of options kept by the editing operations.
pub const MIN_OPTIONS: usize = 2;

/// The discriminant of a question, without any per-type payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[serde(alias = "multiple_choice_single")]
    SingleChoice,
    #[serde(alias = "multiple_choice_multiple")]
    MultipleChoice,
    TrueFalse,
    Code,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::SingleChoice,
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::Code,
    ];

    /// The wire tag used in CSV and JSON files.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "single_choice",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::TrueFalse => "true_false",
            QuestionType::Code => "code",
        }
    }

    /// Whether a learner may select more than one option.
    pub fn allows_multiple_answers(&self) -> bool {
        matches!(self, QuestionType::MultipleChoice | QuestionType::Code)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::SingleChoice => write!(f, "Single Choice"),
            QuestionType::MultipleChoice => write!(f, "Multiple Choice"),
            QuestionType::TrueFalse => write!(f, "True/False"),
            QuestionType::Code => write!(f, "Code"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single_choice" | "multiple_choice_single" => Ok(QuestionType::SingleChoice),
            "multiple_choice" | "multiple_choice_multiple" => Ok(QuestionType::MultipleChoice),
            "true_false" => Ok(QuestionType::TrueFalse),
            "code" => Ok(QuestionType::Code),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// How hard a question is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// The question type together with the fields that only exist for that type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "questionType", rename_all = "snake_case")]
pub enum QuestionKind {
    #[serde(alias = "multiple_choice_single")]
    SingleChoice,
    #[serde(alias = "multiple_choice_multiple")]
    MultipleChoice,
    TrueFalse,
    Code {
        #[serde(rename = "codeLanguage", default)]
        code_language: String,
    },
}

impl QuestionKind {
    /// The default payload for a question type.
    pub fn default_for(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::SingleChoice => QuestionKind::SingleChoice,
            QuestionType::MultipleChoice => QuestionKind::MultipleChoice,
            QuestionType::TrueFalse => QuestionKind::TrueFalse,
            QuestionType::Code => QuestionKind::Code {
                code_language: DEFAULT_CODE_LANGUAGE.to_string(),
            },
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::SingleChoice => QuestionType::SingleChoice,
            QuestionKind::MultipleChoice => QuestionType::MultipleChoice,
            QuestionKind::TrueFalse => QuestionType::TrueFalse,
            QuestionKind::Code { .. } => QuestionType::Code,
        }
    }

    pub fn code_language(&self) -> Option<&str> {
        match self {
            QuestionKind::Code { code_language } => Some(code_language),
            _ => None,
        }
    }
}

/// A question as authored, before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    /// The topic that owns this question.
    #[serde(default)]
    pub topic_id: String,
    /// The question prompt shown to the learner.
    pub question_text: String,
    /// Question type and type-specific fields.
    #[serde(flatten)]
    pub kind: QuestionKind,
    /// Answer choices. Order defines the index space of `correct_answers`.
    #[serde(default)]
    pub options: Vec<String>,
    /// Indices into `options` that make up the correct answer.
    #[serde(default)]
    pub correct_answers: Vec<OptionIndex>,
    /// Shown to the learner after grading.
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_points")]
    pub points: i64,
    #[serde(default)]
    pub is_public: bool,
}

pub(crate) fn default_points() -> i64 {
    1
}

impl QuestionInput {
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    pub fn code_language(&self) -> Option<&str> {
        self.kind.code_language()
    }

    /// The correct answers as a set: duplicates collapse, order is dropped.
    pub fn correct_answer_set(&self) -> BTreeSet<OptionIndex> {
        self.correct_answers.iter().copied().collect()
    }

    /// Whether `index` points at an existing option.
    pub fn has_option(&self, index: OptionIndex) -> bool {
        usize::try_from(index).is_ok_and(|i| i < self.options.len())
    }
}

impl AsRef<QuestionInput> for QuestionInput {
    fn as_ref(&self) -> &QuestionInput {
        self
    }
}

/// Build a minimally valid starting point for a question of the given type.
///
/// The question text is empty and no correct answer is selected, so the
/// result still needs authoring before it passes validation.
pub fn create_empty_question(question_type: QuestionType) -> QuestionInput {
    let options = match question_type {
        QuestionType::TrueFalse => TRUE_FALSE_OPTIONS.iter().map(|o| o.to_string()).collect(),
        _ => vec![String::new(); MIN_OPTIONS],
    };

    QuestionInput {
        topic_id: String::new(),
        question_text: String::new(),
        kind: QuestionKind::default_for(question_type),
        options,
        correct_answers: Vec::new(),
        explanation: None,
        difficulty: Difficulty::Medium,
        points: default_points(),
        is_public: false,
    }
}

/// A persisted question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Opaque identifier.
    pub id: String,
    #[serde(flatten)]
    pub question: QuestionInput,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuizQuestion {
    /// Wrap an authored question with a fresh id and audit timestamps.
    pub fn from_input(question: QuestionInput, created_by: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            question,
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl AsRef<QuestionInput> for QuizQuestion {
    fn as_ref(&self) -> &QuestionInput {
        &self.question
    }
}

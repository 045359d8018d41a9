//! Authoring-time validation of questions.
//!
//! Every rule is checked independently so an editor can show the complete
//! list of problems at once. Questions are never modified here.

use std::collections::BTreeSet;

use crate::model::{QuestionInput, QuestionKind, TRUE_FALSE_OPTIONS};

/// Minimum length of the question text, in characters.
pub const MIN_QUESTION_TEXT_LEN: usize = 10;

/// Validate a question and return every violated rule as a message.
///
/// An empty result means the question is valid.
pub fn validate_quiz_question(question: &QuestionInput) -> Vec<String> {
    let mut errors = Vec::new();

    if question.question_text.trim().is_empty()
        || question.question_text.chars().count() < MIN_QUESTION_TEXT_LEN
    {
        errors.push(format!(
            "Question text must be at least {MIN_QUESTION_TEXT_LEN} characters"
        ));
    }

    let option_count = question.options.len();
    let answer_count = question.correct_answer_set().len();

    match &question.kind {
        QuestionKind::SingleChoice => {
            if option_count < 2 {
                errors.push("Multiple choice questions must have at least 2 options".into());
            }
            if answer_count != 1 {
                errors.push("Single answer questions must have exactly 1 correct answer".into());
            }
        }
        QuestionKind::MultipleChoice => {
            if option_count < 2 {
                errors.push("Multiple choice questions must have at least 2 options".into());
            }
            if answer_count < 1 {
                errors.push("Multiple answer questions must have at least 1 correct answer".into());
            }
        }
        QuestionKind::TrueFalse => {
            if question.options != TRUE_FALSE_OPTIONS {
                errors.push(
                    "True/False questions must have exactly the options \"True\" and \"False\""
                        .into(),
                );
            }
            if answer_count != 1 {
                errors.push("True/False questions must have exactly 1 correct answer".into());
            }
        }
        QuestionKind::Code { code_language } => {
            if code_language.trim().is_empty() {
                errors.push("Code questions must have a code language specified".into());
            }
        }
    }

    let out_of_bounds: BTreeSet<_> = question
        .correct_answers
        .iter()
        .copied()
        .filter(|&i| !question.has_option(i))
        .collect();
    for index in out_of_bounds {
        errors.push(format!("Correct answer index {index} is out of bounds"));
    }

    if question.points < 1 {
        errors.push("Points must be at least 1".into());
    }

    errors
}

/// Convenience wrapper: `true` when [`validate_quiz_question`] finds nothing.
pub fn is_valid(question: &QuestionInput) -> bool {
    validate_quiz_question(question).is_empty()
}

//! The `quizkit new` command.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use quizkit_core::config::load_config_from;
use quizkit_core::model::{create_empty_question, QuestionType};

pub fn execute(question_type: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let question_type: QuestionType = question_type.parse().map_err(|e: String| {
        let known: Vec<&str> = QuestionType::ALL.iter().map(QuestionType::as_str).collect();
        anyhow!("{e} (expected one of: {})", known.join(", "))
    })?;

    let mut question = create_empty_question(question_type);
    if question_type == QuestionType::Code {
        question = question.with_code_language(config.default_code_language);
    }

    println!("{}", serde_json::to_string_pretty(&question)?);
    Ok(())
}

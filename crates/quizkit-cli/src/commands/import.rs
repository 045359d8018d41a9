//! The `quizkit import` command.

use std::path::PathBuf;

use anyhow::Result;
use quizkit_core::config::load_config_from;
use quizkit_core::import::import_from;
use quizkit_core::model::QuizQuestion;

use crate::fs::{write_file, FsSource};

pub fn execute(
    file: PathBuf,
    topic: String,
    created_by: String,
    output: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let outcome = import_from(&FsSource::new(&file), &topic)?;
    let summary = outcome.summary(config.max_reported_errors);

    let mut bank = if output.exists() {
        super::load_bank(&output)?
    } else {
        Vec::new()
    };
    let before = bank.len();
    bank.extend(
        outcome
            .questions
            .into_iter()
            .map(|q| QuizQuestion::from_input(q, created_by.as_str())),
    );

    write_file(&output, &serde_json::to_string_pretty(&bank)?)?;

    super::print_import_summary(&summary);
    println!(
        "\nImported {} question(s) into {} ({} total)",
        bank.len() - before,
        output.display(),
        bank.len()
    );

    Ok(())
}

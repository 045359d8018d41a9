//! The `quizkit validate` command.

use std::path::PathBuf;

use anyhow::Result;
use quizkit_core::config::load_config_from;
use quizkit_core::import::import_from;

use crate::fs::FsSource;

pub fn execute(file: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let outcome = import_from(&FsSource::new(&file), "")?;

    println!("File: {}", file.display());
    super::print_import_summary(&outcome.summary(config.max_reported_errors));

    if outcome.errors.is_empty() {
        println!("\nAll {} question(s) valid.", outcome.questions.len());
    }

    Ok(())
}

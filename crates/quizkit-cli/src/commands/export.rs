//! The `quizkit export` command.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use quizkit_core::export::{export_questions, ExportFormat};

use crate::fs::FsSink;

pub fn execute(bank: PathBuf, format: String, output: PathBuf) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow!(e))?;
    let questions = super::load_bank(&bank)?;

    let filename = format!("questions.{}", format.extension());
    let mut sink = FsSink::new(output);
    export_questions(&questions, format, &filename, &mut sink)?;

    for path in sink.written() {
        println!("Exported {} question(s) to {}", questions.len(), path.display());
    }
    Ok(())
}

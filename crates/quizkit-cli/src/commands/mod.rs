pub mod export;
pub mod grade;
pub mod import;
pub mod new;
pub mod template;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use quizkit_core::import::ImportSummary;
use quizkit_core::model::QuizQuestion;

/// Load a question bank written by `quizkit import`.
pub fn load_bank(path: &Path) -> Result<Vec<QuizQuestion>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse question bank: {}", path.display()))
}

/// Print import counts and the leading row errors.
pub fn print_import_summary(summary: &ImportSummary) {
    let mut table = Table::new();
    table.set_header(vec!["Total", "Valid", "Invalid", "Duplicates"]);
    table.add_row(vec![
        Cell::new(summary.total),
        Cell::new(summary.valid),
        Cell::new(summary.invalid),
        Cell::new(summary.duplicates),
    ]);
    println!("{table}");

    if !summary.errors.is_empty() {
        println!("\nErrors:");
        for error in &summary.errors {
            println!("  {error}");
        }
        let hidden = summary.invalid.saturating_sub(summary.errors.len());
        if hidden > 0 {
            println!("  ... and {hidden} more");
        }
    }
}

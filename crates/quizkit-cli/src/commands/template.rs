//! The `quizkit template` command.

use std::path::PathBuf;

use anyhow::Result;
use quizkit_core::export::export_template;

use crate::fs::FsSink;

pub fn execute(output: PathBuf) -> Result<()> {
    let mut sink = FsSink::new(output);
    export_template(&mut sink)?;

    for path in sink.written() {
        println!("Created {}", path.display());
    }
    println!("\nFill in one question per row, then run:");
    println!("  quizkit validate --file <file>.csv");
    Ok(())
}

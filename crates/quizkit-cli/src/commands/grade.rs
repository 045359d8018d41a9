//! The `quizkit grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use quizkit_core::config::load_config_from;
use quizkit_core::model::OptionIndex;
use quizkit_core::scoring::{grade_quiz, GradedQuiz, QuizAnswers};

pub fn execute(
    bank: PathBuf,
    answers_path: PathBuf,
    threshold: Option<u8>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let threshold = threshold.unwrap_or(config.passing_threshold);
    anyhow::ensure!(
        threshold <= 100,
        "threshold must be between 0 and 100, got {threshold}"
    );

    let questions = super::load_bank(&bank)?;
    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answers: {}", answers_path.display()))?;
    let answers: QuizAnswers = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers: {}", answers_path.display()))?;

    let graded = grade_quiz(&questions, &answers, threshold);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&graded)?),
        "text" => print_graded(&graded),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_graded(graded: &GradedQuiz) {
    let mut table = Table::new();
    table.set_header(vec!["Question", "Result", "Selected", "Correct", "Points"]);

    for result in &graded.results {
        table.add_row(vec![
            Cell::new(&result.question_id),
            Cell::new(if result.is_correct { "correct" } else { "wrong" }),
            Cell::new(format_indices(&result.user_answers)),
            Cell::new(format_indices(&result.correct_answers)),
            Cell::new(format!("{}/{}", result.points_earned, result.points_possible)),
        ]);
    }
    println!("{table}");

    let score = &graded.score;
    println!(
        "\nScore: {}% ({}/{} correct), points {}/{}",
        score.score,
        score.correct_answers,
        score.total_questions,
        graded.points_earned,
        graded.points_possible
    );
    println!(
        "{} (threshold {}%)",
        if score.passed { "PASSED" } else { "FAILED" },
        score.passing_threshold
    );
}

fn format_indices(indices: &[OptionIndex]) -> String {
    if indices.is_empty() {
        return "-".to_string();
    }
    indices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

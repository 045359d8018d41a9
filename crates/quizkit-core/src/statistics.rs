//! Attempt history statistics.

use std::cmp::Reverse;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One attempt in a learner's history for a topic quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSummary {
    pub id: String,
    pub attempt_number: u32,
    pub started_at: DateTime<Utc>,
    /// `None` while the attempt is still in progress.
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub score: Option<u8>,
    #[serde(default)]
    pub passed: Option<bool>,
    #[serde(default)]
    pub correct_answers: Option<usize>,
    pub total_questions: usize,
    #[serde(default)]
    pub time_taken_seconds: Option<u64>,
}

impl AttemptSummary {
    pub fn is_completed(&self) -> bool {
        self.submitted_at.is_some()
    }

    pub fn status(&self) -> AttemptStatus {
        match (self.is_completed(), self.passed) {
            (false, _) => AttemptStatus::InProgress,
            (true, Some(true)) => AttemptStatus::Passed,
            (true, _) => AttemptStatus::Failed,
        }
    }
}

/// Where an attempt stands, for badges and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    InProgress,
    Passed,
    Failed,
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttemptStatus::InProgress => "In Progress",
            AttemptStatus::Passed => "Passed",
            AttemptStatus::Failed => "Failed",
        })
    }
}

/// Aggregates over a learner's attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStatistics {
    pub total_attempts: usize,
    pub completed_attempts: usize,
    pub passed_attempts: usize,
    /// Rounded mean score of completed attempts.
    pub average_score: u8,
    pub best_score: u8,
    /// Rounded percentage of completed attempts that passed.
    pub pass_rate: u8,
}

/// Compute statistics. Only submitted attempts count toward scores and rates.
pub fn compute_quiz_statistics(attempts: &[AttemptSummary]) -> QuizStatistics {
    let completed: Vec<&AttemptSummary> = attempts.iter().filter(|a| a.is_completed()).collect();
    let passed = completed.iter().filter(|a| a.passed == Some(true)).count();
    let scores: Vec<u8> = completed.iter().filter_map(|a| a.score).collect();

    let average_score = if scores.is_empty() {
        0
    } else {
        let sum: u32 = scores.iter().map(|&s| u32::from(s)).sum();
        (f64::from(sum) / scores.len() as f64).round() as u8
    };

    let pass_rate = if completed.is_empty() {
        0
    } else {
        (passed as f64 / completed.len() as f64 * 100.0).round() as u8
    };

    QuizStatistics {
        total_attempts: attempts.len(),
        completed_attempts: completed.len(),
        passed_attempts: passed,
        average_score,
        best_score: scores.iter().copied().max().unwrap_or(0),
        pass_rate,
    }
}

/// The submitted attempt with the highest score; the earliest wins ties.
pub fn best_attempt(attempts: &[AttemptSummary]) -> Option<&AttemptSummary> {
    attempts
        .iter()
        .filter(|a| a.is_completed() && a.score.is_some())
        .min_by_key(|a| Reverse(a.score))
}

/// Whether another attempt is allowed. `None` means unlimited.
pub fn can_retake_quiz(attempts: &[AttemptSummary], max_attempts: Option<u32>) -> bool {
    match max_attempts {
        None => true,
        Some(max) => attempts.len() < max as usize,
    }
}

/// Human-readable duration: `45s`, `2m 5s`, `2m`, `1h 3m`.
pub fn format_time_taken(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds}s");
    }

    let minutes = seconds / 60;
    let remaining_seconds = seconds % 60;
    if minutes < 60 {
        return if remaining_seconds > 0 {
            format!("{minutes}m {remaining_seconds}s")
        } else {
            format!("{minutes}m")
        };
    }

    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Countdown display: `M:SS`, minutes unbounded (`75:00`).
pub fn format_time_remaining(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

//! Quiz scoring.
//!
//! A question is correct only when the learner selected exactly the correct
//! option set: no missing and no extra indices, order and duplicates
//! ignored. There is no partial credit. The score is the rounded percentage
//! of correct questions; points are reported next to it but do not weight it.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::{OptionIndex, QuestionInput, QuizQuestion};

/// Passing threshold used when none is configured.
pub const DEFAULT_PASSING_THRESHOLD: u8 = 70;

/// Selected option indices per question id.
pub type QuizAnswers = HashMap<String, Vec<OptionIndex>>;

/// Outcome of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub total_questions: usize,
    pub correct_answers: usize,
    /// Percentage of correct questions, 0-100.
    pub score: u8,
    pub passed: bool,
    pub passing_threshold: u8,
}

impl ScoreResult {
    /// Build a result from counts. An empty quiz scores 0 and never passes.
    pub fn from_counts(correct_answers: usize, total_questions: usize, passing_threshold: u8) -> Self {
        if total_questions == 0 {
            return Self {
                total_questions: 0,
                correct_answers: 0,
                score: 0,
                passed: false,
                passing_threshold,
            };
        }

        let correct = correct_answers.min(total_questions);
        // Round half up in integer arithmetic.
        let score = ((correct * 200 + total_questions) / (2 * total_questions)) as u8;

        Self {
            total_questions,
            correct_answers: correct,
            score,
            passed: score >= passing_threshold,
            passing_threshold,
        }
    }
}

/// Grading detail for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: String,
    pub is_correct: bool,
    /// The learner's selection, sorted and de-duplicated.
    pub user_answers: Vec<OptionIndex>,
    /// The correct selection, sorted and de-duplicated.
    pub correct_answers: Vec<OptionIndex>,
    pub points_earned: i64,
    pub points_possible: i64,
}

/// Full grading of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedQuiz {
    #[serde(flatten)]
    pub score: ScoreResult,
    pub points_earned: i64,
    pub points_possible: i64,
    pub results: Vec<QuestionResult>,
}

/// Whether `selected` is exactly the correct option set of `question`.
pub fn is_answer_correct(question: &QuestionInput, selected: &[OptionIndex]) -> bool {
    let selected: BTreeSet<OptionIndex> = selected.iter().copied().collect();
    selected == question.correct_answer_set()
}

fn selection<'a>(answers: &'a QuizAnswers, question: &QuizQuestion) -> &'a [OptionIndex] {
    answers.get(&question.id).map(Vec::as_slice).unwrap_or(&[])
}

/// Score a submission with the default passing threshold.
pub fn calculate_quiz_score(questions: &[QuizQuestion], answers: &QuizAnswers) -> ScoreResult {
    calculate_quiz_score_with_threshold(questions, answers, DEFAULT_PASSING_THRESHOLD)
}

/// Score a submission against an explicit passing threshold.
pub fn calculate_quiz_score_with_threshold(
    questions: &[QuizQuestion],
    answers: &QuizAnswers,
    passing_threshold: u8,
) -> ScoreResult {
    let correct = questions
        .iter()
        .filter(|q| is_answer_correct(&q.question, selection(answers, q)))
        .count();
    ScoreResult::from_counts(correct, questions.len(), passing_threshold)
}

/// Sum of `points` over the questions answered correctly.
pub fn calculate_points_earned(questions: &[QuizQuestion], answers: &QuizAnswers) -> i64 {
    questions
        .iter()
        .filter(|q| is_answer_correct(&q.question, selection(answers, q)))
        .map(|q| q.question.points)
        .sum()
}

/// Score a submission and report each question.
pub fn grade_quiz(
    questions: &[QuizQuestion],
    answers: &QuizAnswers,
    passing_threshold: u8,
) -> GradedQuiz {
    let results: Vec<QuestionResult> = questions
        .iter()
        .map(|q| {
            let selected = selection(answers, q);
            let is_correct = is_answer_correct(&q.question, selected);
            let user_answers: BTreeSet<OptionIndex> = selected.iter().copied().collect();
            QuestionResult {
                question_id: q.id.clone(),
                is_correct,
                user_answers: user_answers.into_iter().collect(),
                correct_answers: q.question.correct_answer_set().into_iter().collect(),
                points_earned: if is_correct { q.question.points } else { 0 },
                points_possible: q.question.points,
            }
        })
        .collect();

    let correct = results.iter().filter(|r| r.is_correct).count();
    let graded = GradedQuiz {
        score: ScoreResult::from_counts(correct, questions.len(), passing_threshold),
        points_earned: results.iter().map(|r| r.points_earned).sum(),
        points_possible: results.iter().map(|r| r.points_possible).sum(),
        results,
    };

    tracing::debug!(
        score = graded.score.score,
        passed = graded.score.passed,
        correct = graded.score.correct_answers,
        total = graded.score.total_questions,
        "quiz graded"
    );
    graded
}

//! A single learner's quiz-taking session.
//!
//! Answers start empty, change as options are selected and deselected, and
//! are graded once on submission. `submit` consumes the session, so answers
//! cannot change after grading.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SessionError;
use crate::model::{OptionIndex, QuizQuestion};
use crate::scoring::{grade_quiz, GradedQuiz, QuizAnswers};
use crate::statistics::AttemptSummary;

/// How a session is set up when it starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub randomize_questions: bool,
    pub randomize_options: bool,
    /// None = untimed.
    pub time_limit_minutes: Option<u32>,
}

/// Time left on a timed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingTime {
    /// Whole seconds left, rounded down.
    pub remaining_seconds: u64,
    pub is_expired: bool,
    /// Rounded percentage of the limit still available, 0-100.
    pub percent_remaining: u8,
}

/// An in-progress quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    answers: QuizAnswers,
    started_at: DateTime<Utc>,
    time_limit_minutes: Option<u32>,
}

/// A submitted quiz with its grading.
#[derive(Debug, Clone)]
pub struct SubmittedQuiz {
    pub graded: GradedQuiz,
    pub answers: QuizAnswers,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
}

impl QuizSession {
    /// Start a quiz over `questions` with no answers selected.
    pub fn start(questions: Vec<QuizQuestion>) -> Self {
        Self::start_at(questions, Utc::now())
    }

    pub fn start_at(questions: Vec<QuizQuestion>, started_at: DateTime<Utc>) -> Self {
        Self {
            questions,
            answers: QuizAnswers::new(),
            started_at,
            time_limit_minutes: None,
        }
    }

    /// Start a quiz, shuffling questions and options as `options` asks.
    ///
    /// Shuffled options have their correct answers remapped, so grading
    /// against the session's own questions is unaffected.
    pub fn start_with<R: Rng + ?Sized>(
        questions: Vec<QuizQuestion>,
        options: SessionOptions,
        rng: &mut R,
    ) -> Self {
        Self::start_with_at(questions, options, rng, Utc::now())
    }

    pub fn start_with_at<R: Rng + ?Sized>(
        mut questions: Vec<QuizQuestion>,
        options: SessionOptions,
        rng: &mut R,
        started_at: DateTime<Utc>,
    ) -> Self {
        if options.randomize_questions {
            questions.shuffle(rng);
        }
        if options.randomize_options {
            for q in &mut questions {
                q.question = q.question.clone().with_shuffled_options(rng);
            }
        }

        Self {
            time_limit_minutes: options.time_limit_minutes,
            ..Self::start_at(questions, started_at)
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time left at `now`, or `None` for an untimed session.
    pub fn remaining_time(&self, now: DateTime<Utc>) -> Option<RemainingTime> {
        let limit_ms = i64::from(self.time_limit_minutes?) * 60_000;
        let elapsed_ms = (now - self.started_at).num_milliseconds().max(0);
        let remaining_ms = (limit_ms - elapsed_ms).max(0);

        let percent_remaining = if limit_ms == 0 {
            0
        } else {
            ((remaining_ms * 200 + limit_ms) / (2 * limit_ms)) as u8
        };

        Some(RemainingTime {
            remaining_seconds: (remaining_ms / 1000) as u64,
            is_expired: remaining_ms == 0,
            percent_remaining,
        })
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &QuizAnswers {
        &self.answers
    }

    /// The options currently selected for a question.
    pub fn selected(&self, question_id: &str) -> &[OptionIndex] {
        self.answers
            .get(question_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of questions with at least one option selected.
    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|sel| !sel.is_empty()).count()
    }

    fn question(&self, question_id: &str, index: OptionIndex) -> Result<&QuizQuestion, SessionError> {
        let question = self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| SessionError::UnknownQuestion(question_id.to_string()))?;
        if !question.question.has_option(index) {
            return Err(SessionError::OptionOutOfRange {
                question_id: question_id.to_string(),
                index,
            });
        }
        Ok(question)
    }

    /// Select an option.
    ///
    /// Single-answer questions replace any previous selection; for the other
    /// types the option is added to the selection.
    pub fn select(&mut self, question_id: &str, index: OptionIndex) -> Result<(), SessionError> {
        let multiple = self
            .question(question_id, index)?
            .question
            .question_type()
            .allows_multiple_answers();

        let selection = self.answers.entry(question_id.to_string()).or_default();
        if !multiple {
            selection.clear();
        }
        if !selection.contains(&index) {
            selection.push(index);
        }
        Ok(())
    }

    /// Deselect an option. Deselecting an unselected option is a no-op.
    pub fn deselect(&mut self, question_id: &str, index: OptionIndex) -> Result<(), SessionError> {
        self.question(question_id, index)?;
        if let Some(selection) = self.answers.get_mut(question_id) {
            selection.retain(|&i| i != index);
        }
        Ok(())
    }

    /// Select the option if it is not selected, otherwise deselect it.
    pub fn toggle(&mut self, question_id: &str, index: OptionIndex) -> Result<(), SessionError> {
        if self.selected(question_id).contains(&index) {
            self.deselect(question_id, index)
        } else {
            self.select(question_id, index)
        }
    }

    /// Drop every selection for a question.
    pub fn clear(&mut self, question_id: &str) -> Result<(), SessionError> {
        if !self.questions.iter().any(|q| q.id == question_id) {
            return Err(SessionError::UnknownQuestion(question_id.to_string()));
        }
        self.answers.remove(question_id);
        Ok(())
    }

    /// Grade the answers and end the session.
    pub fn submit(self, passing_threshold: u8) -> SubmittedQuiz {
        self.submit_at(passing_threshold, Utc::now())
    }

    pub fn submit_at(self, passing_threshold: u8, submitted_at: DateTime<Utc>) -> SubmittedQuiz {
        let graded = grade_quiz(&self.questions, &self.answers, passing_threshold);
        tracing::info!(
            score = graded.score.score,
            passed = graded.score.passed,
            answered = self.answered_count(),
            total = self.questions.len(),
            "quiz submitted"
        );
        SubmittedQuiz {
            graded,
            answers: self.answers,
            started_at: self.started_at,
            submitted_at,
        }
    }
}

impl SubmittedQuiz {
    /// Whole seconds between start and submission.
    pub fn time_taken_seconds(&self) -> u64 {
        (self.submitted_at - self.started_at).num_seconds().max(0) as u64
    }

    /// Summarise as one attempt in a learner's history.
    pub fn to_attempt(&self, id: impl Into<String>, attempt_number: u32) -> AttemptSummary {
        AttemptSummary {
            id: id.into(),
            attempt_number,
            started_at: self.started_at,
            submitted_at: Some(self.submitted_at),
            score: Some(self.graded.score.score),
            passed: Some(self.graded.score.passed),
            correct_answers: Some(self.graded.score.correct_answers),
            total_questions: self.graded.score.total_questions,
            time_taken_seconds: Some(self.time_taken_seconds()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{create_empty_question, QuestionType};
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiz() -> Vec<QuizQuestion> {
        let mut single = QuizQuestion::from_input(
            create_empty_question(QuestionType::SingleChoice)
                .with_question_text("Which is the largest ocean?")
                .with_added_option()
                .with_option_text(0, "Atlantic")
                .with_option_text(1, "Indian")
                .with_option_text(2, "Pacific")
                .with_correct_answers([2]),
            "author",
        );
        single.id = "single".into();

        let mut multi = QuizQuestion::from_input(
            create_empty_question(QuestionType::MultipleChoice)
                .with_question_text("Which of these are mammals?")
                .with_added_option()
                .with_option_text(0, "Whale")
                .with_option_text(1, "Shark")
                .with_option_text(2, "Bat")
                .with_correct_answers([0, 2]),
            "author",
        );
        multi.id = "multi".into();

        vec![single, multi]
    }

    #[test]
    fn starts_empty() {
        let session = QuizSession::start(quiz());
        assert!(session.answers().is_empty());
        assert_eq!(session.answered_count(), 0);
        assert_eq!(session.selected("single"), &[] as &[OptionIndex]);
    }

    #[test]
    fn single_answer_selection_replaces() {
        let mut session = QuizSession::start(quiz());
        session.select("single", 0).unwrap();
        session.select("single", 2).unwrap();
        assert_eq!(session.selected("single"), &[2]);
    }

    #[test]
    fn multiple_answer_selection_accumulates() {
        let mut session = QuizSession::start(quiz());
        session.select("multi", 2).unwrap();
        session.select("multi", 0).unwrap();
        session.select("multi", 0).unwrap();
        assert_eq!(session.selected("multi"), &[2, 0]);

        session.toggle("multi", 2).unwrap();
        assert_eq!(session.selected("multi"), &[0]);
        session.deselect("multi", 1).unwrap();
        assert_eq!(session.selected("multi"), &[0]);
    }

    #[test]
    fn rejects_unknown_questions_and_options() {
        let mut session = QuizSession::start(quiz());
        assert_eq!(
            session.select("missing", 0),
            Err(SessionError::UnknownQuestion("missing".into()))
        );
        assert_eq!(
            session.select("single", 3),
            Err(SessionError::OptionOutOfRange {
                question_id: "single".into(),
                index: 3
            })
        );
        assert!(session.select("multi", -1).is_err());
        assert!(session.clear("missing").is_err());
    }

    #[test]
    fn submit_grades_and_records_timing() {
        let start = Utc::now();
        let mut session = QuizSession::start_at(quiz(), start);
        session.select("single", 2).unwrap();
        session.select("multi", 0).unwrap();
        session.select("multi", 2).unwrap();

        let submitted = session.submit_at(70, start + Duration::seconds(95));
        assert_eq!(submitted.graded.score.score, 100);
        assert!(submitted.graded.score.passed);
        assert_eq!(submitted.time_taken_seconds(), 95);

        let attempt = submitted.to_attempt("attempt-1", 1);
        assert_eq!(attempt.score, Some(100));
        assert_eq!(attempt.total_questions, 2);
    }

    #[test]
    fn clearing_unanswers_a_question() {
        let mut session = QuizSession::start(quiz());
        session.select("single", 2).unwrap();
        session.clear("single").unwrap();
        let submitted = session.submit(70);
        assert_eq!(submitted.graded.score.correct_answers, 0);
        assert!(!submitted.graded.score.passed);
    }

    #[test]
    fn remaining_time_counts_down_to_expiry() {
        let start = Utc::now();
        let options = SessionOptions {
            time_limit_minutes: Some(10),
            ..SessionOptions::default()
        };
        let session = QuizSession::start_with_at(quiz(), options, &mut StdRng::seed_from_u64(0), start);

        let fresh = session.remaining_time(start).unwrap();
        assert_eq!(fresh.remaining_seconds, 600);
        assert!(!fresh.is_expired);
        assert_eq!(fresh.percent_remaining, 100);

        let later = session.remaining_time(start + Duration::seconds(450)).unwrap();
        assert_eq!(later.remaining_seconds, 150);
        assert_eq!(later.percent_remaining, 25);

        let last = session
            .remaining_time(start + Duration::milliseconds(599_500))
            .unwrap();
        assert_eq!(last.remaining_seconds, 0);
        assert!(!last.is_expired);

        let expired = session.remaining_time(start + Duration::seconds(600)).unwrap();
        assert_eq!(expired.remaining_seconds, 0);
        assert!(expired.is_expired);
        assert_eq!(expired.percent_remaining, 0);

        let overdue = session.remaining_time(start + Duration::hours(2)).unwrap();
        assert!(overdue.is_expired);
    }

    #[test]
    fn untimed_sessions_have_no_remaining_time() {
        let session = QuizSession::start(quiz());
        assert!(session.remaining_time(Utc::now()).is_none());
    }

    #[test]
    fn shuffled_session_grades_like_the_original() {
        let options = SessionOptions {
            randomize_questions: true,
            randomize_options: true,
            time_limit_minutes: None,
        };

        for seed in 0..10 {
            let mut session =
                QuizSession::start_with(quiz(), options, &mut StdRng::seed_from_u64(seed));
            let mut ids: Vec<&str> = session.questions().iter().map(|q| q.id.as_str()).collect();
            ids.sort_unstable();
            assert_eq!(ids, vec!["multi", "single"]);

            // Answer by option text, as a learner would.
            let picks: Vec<(String, Vec<OptionIndex>)> = session
                .questions()
                .iter()
                .map(|q| {
                    let wanted: &[&str] = if q.id == "single" {
                        &["Pacific"]
                    } else {
                        &["Whale", "Bat"]
                    };
                    let indices = q
                        .question
                        .options
                        .iter()
                        .enumerate()
                        .filter(|(_, text)| wanted.contains(&text.as_str()))
                        .map(|(i, _)| i as OptionIndex)
                        .collect();
                    (q.id.clone(), indices)
                })
                .collect();
            for (id, indices) in picks {
                for index in indices {
                    session.select(&id, index).unwrap();
                }
            }

            let submitted = session.submit(70);
            assert_eq!(submitted.graded.score.score, 100, "seed {seed}");
        }
    }
}

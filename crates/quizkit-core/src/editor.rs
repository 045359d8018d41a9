//! Authoring operations on a question.
//!
//! Each operation consumes the question and returns the edited value, so a
//! caller holding the previous version keeps it untouched. Operations that
//! would break the option/answer index space are no-ops.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{
    create_empty_question, OptionIndex, QuestionInput, QuestionKind, QuestionType, MIN_OPTIONS,
};

impl QuestionInput {
    pub fn with_question_text(mut self, text: impl Into<String>) -> Self {
        self.question_text = text.into();
        self
    }

    /// Append an empty option. True/false questions keep their fixed options.
    pub fn with_added_option(mut self) -> Self {
        if self.question_type() != QuestionType::TrueFalse {
            self.options.push(String::new());
        }
        self
    }

    /// Remove the option at `index`, keeping `correct_answers` aligned.
    ///
    /// The removed index is dropped from the correct answers and every
    /// higher index shifts down by one. Removal below [`MIN_OPTIONS`], on a
    /// true/false question, or at a missing index leaves the question as is.
    pub fn without_option(mut self, index: usize) -> Self {
        if self.question_type() == QuestionType::TrueFalse
            || self.options.len() <= MIN_OPTIONS
            || index >= self.options.len()
        {
            return self;
        }

        self.options.remove(index);
        let removed = index as OptionIndex;
        self.correct_answers = self
            .correct_answers
            .into_iter()
            .filter(|&i| i != removed)
            .map(|i| if i > removed { i - 1 } else { i })
            .collect();
        self
    }

    /// Replace the text of one option.
    pub fn with_option_text(mut self, index: usize, text: impl Into<String>) -> Self {
        if self.question_type() == QuestionType::TrueFalse {
            return self;
        }
        if let Some(option) = self.options.get_mut(index) {
            *option = text.into();
        }
        self
    }

    /// Replace the correct answers. Duplicates collapse and the result is sorted.
    pub fn with_correct_answers(mut self, answers: impl IntoIterator<Item = OptionIndex>) -> Self {
        let mut answers: Vec<OptionIndex> = answers.into_iter().collect();
        answers.sort_unstable();
        answers.dedup();
        self.correct_answers = answers;
        self
    }

    /// Mark or unmark one option as correct.
    ///
    /// Single-answer types replace the selection; multiple-answer types
    /// toggle membership.
    pub fn with_toggled_answer(self, index: OptionIndex) -> Self {
        if !self.question_type().allows_multiple_answers() {
            return self.with_correct_answers([index]);
        }

        let mut answers = self.correct_answers.clone();
        if let Some(pos) = answers.iter().position(|&i| i == index) {
            answers.remove(pos);
        } else {
            answers.push(index);
        }
        self.with_correct_answers(answers)
    }

    /// Switch to another question type.
    ///
    /// The question is replaced by a fresh default of the new type; only the
    /// owning topic carries over. Switching to the current type is a no-op.
    pub fn with_type(self, question_type: QuestionType) -> Self {
        if self.question_type() == question_type {
            return self;
        }
        QuestionInput {
            topic_id: self.topic_id,
            ..create_empty_question(question_type)
        }
    }

    /// Set the language of a code question. Other types are unchanged.
    pub fn with_code_language(mut self, language: impl Into<String>) -> Self {
        if let QuestionKind::Code { code_language } = &mut self.kind {
            *code_language = language.into();
        }
        self
    }

    /// Put the options in random order, remapping `correct_answers` so they
    /// still point at the same option texts. True/false options stay fixed.
    pub fn with_shuffled_options<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        if self.question_type() == QuestionType::TrueFalse {
            return self;
        }

        let mut order: Vec<usize> = (0..self.options.len()).collect();
        order.shuffle(rng);

        // new_position[old] = where option `old` ended up.
        let mut new_position = vec![0; order.len()];
        for (new, &old) in order.iter().enumerate() {
            new_position[old] = new;
        }

        let mut old_options = std::mem::take(&mut self.options);
        self.options = order
            .iter()
            .map(|&old| std::mem::take(&mut old_options[old]))
            .collect();
        for answer in &mut self.correct_answers {
            if let Some(old) = usize::try_from(*answer).ok().filter(|&i| i < order.len()) {
                *answer = new_position[old] as OptionIndex;
            }
        }
        self.correct_answers.sort_unstable();
        self
    }
}

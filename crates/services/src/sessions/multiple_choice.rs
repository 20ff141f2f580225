use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::fmt;
use tracing::{debug, info};

use drill_core::distractor::{OptionSet, generate_options};
use drill_core::model::DrillSettings;

use crate::content::QuizQuestion;
use crate::error::SessionError;
use super::progress::SessionProgress;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Single pass over a question pool with four lettered options per question.
///
/// Each question is asked exactly once, in pool order, whether it was
/// answered correctly or not. There is no mastery tracking, only a running
/// count of correct answers.
pub struct MultipleChoiceSession<R = StdRng> {
    questions: Vec<QuizQuestion>,
    answers: Vec<String>,
    position: usize,
    correct_count: usize,
    options: Option<OptionSet>,
    rng: R,
}

impl MultipleChoiceSession<StdRng> {
    /// Create a session using the shuffle flag and randomness source in `settings`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn new(
        questions: Vec<QuizQuestion>,
        settings: &DrillSettings,
    ) -> Result<Self, SessionError> {
        Self::with_rng(questions, settings.shuffle(), settings.rng())
    }
}

impl<R: Rng> MultipleChoiceSession<R> {
    /// Create a session with an injected randomness source.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn with_rng(
        mut questions: Vec<QuizQuestion>,
        shuffle: bool,
        mut rng: R,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        if shuffle {
            questions.shuffle(&mut rng);
        }
        let answers = questions.iter().map(|q| q.answer().to_string()).collect();

        Ok(Self {
            questions,
            answers,
            position: 0,
            correct_count: 0,
            options: None,
            rng,
        })
    }

    /// Rewind to the first question and generate its options.
    pub fn start(&mut self) {
        self.position = 0;
        self.correct_count = 0;
        self.regenerate_options();
        debug!(questions = self.questions.len(), "multiple choice session started");
    }

    /// Answer the current question with a lowercase option letter (`'a'` first).
    ///
    /// Returns whether the chosen option was the expected answer. The session
    /// moves on to the next question either way.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` before `start`, `SessionError::Completed`
    /// once every question has been answered, and `SessionError::ChoiceOutOfRange`
    /// for a letter that does not name one of the current options.
    pub fn advance(&mut self, choice: char) -> Result<bool, SessionError> {
        if self.is_finished() {
            return Err(SessionError::Completed);
        }
        let options = self.options.as_ref().ok_or(SessionError::NotStarted)?;

        let chosen = choice_index(choice)
            .and_then(|index| options.get(index))
            .ok_or(SessionError::ChoiceOutOfRange {
                choice,
                options: options.options().len(),
            })?;

        let correct = chosen == self.questions[self.position].answer();
        if correct {
            self.correct_count += 1;
        }
        debug!(position = self.position, %choice, correct, "choice recorded");

        self.position += 1;
        if self.is_finished() {
            info!(
                correct = self.correct_count,
                total = self.questions.len(),
                "multiple choice session finished"
            );
        } else {
            self.regenerate_options();
        }
        Ok(correct)
    }

    fn regenerate_options(&mut self) {
        let correct = self.questions[self.position].answer();
        self.options = Some(generate_options(correct, &self.answers, &mut self.rng));
    }
}

impl<R> MultipleChoiceSession<R> {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.position >= self.questions.len()
    }

    /// Options generated for the current question, in display order.
    ///
    /// After the last answer this still holds the final question's options.
    #[must_use]
    pub fn current_options(&self) -> Option<&OptionSet> {
        self.options.as_ref()
    }

    #[must_use]
    pub fn correct_answer_index(&self) -> Option<usize> {
        self.options.as_ref().map(OptionSet::correct_index)
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.position)
    }

    #[must_use]
    pub fn current_prompt(&self) -> Option<&str> {
        self.current_question().map(|q| q.prompt.as_str())
    }

    /// Zero-based index of the current question.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.position.min(self.questions.len());
        SessionProgress {
            total: self.questions.len(),
            answered,
            correct: self.correct_count,
            remaining: self.questions.len() - answered,
            is_finished: self.is_finished(),
        }
    }

    /// Summary line such as `"3 of 5 correct"`.
    #[must_use]
    pub fn results(&self) -> String {
        format!("{} of {} correct", self.correct_count, self.questions.len())
    }
}

fn choice_index(choice: char) -> Option<usize> {
    let offset = u32::from(choice).checked_sub(u32::from('a'))?;
    usize::try_from(offset).ok()
}

impl<R> fmt::Debug for MultipleChoiceSession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipleChoiceSession")
            .field("questions_len", &self.questions.len())
            .field("position", &self.position)
            .field("correct_count", &self.correct_count)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

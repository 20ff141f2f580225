use std::fmt;
use std::sync::Arc;

use tracing::info;

use drill_core::AdaptiveScheduler;
use drill_core::model::{
    AnswerField, ConjugationForm, DrillSettings, DrillSettingsDraft, ItemKey, LessonId, RawItem,
};

use crate::content::{self, LessonSource};
use crate::error::SessionError;
use super::multiple_choice::MultipleChoiceSession;

/// Orchestrates loading lesson content and starting drills over it.
#[derive(Clone)]
pub struct SessionLauncher {
    lessons: Arc<dyn LessonSource>,
    settings: DrillSettings,
}

impl fmt::Debug for SessionLauncher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionLauncher")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl SessionLauncher {
    #[must_use]
    pub fn new(lessons: Arc<dyn LessonSource>, settings: DrillSettings) -> Self {
        Self { lessons, settings }
    }

    /// Create a launcher from stored, not yet validated settings.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Settings` if the draft fails validation.
    pub fn from_draft(
        lessons: Arc<dyn LessonSource>,
        draft: DrillSettingsDraft,
    ) -> Result<Self, SessionError> {
        Ok(Self::new(lessons, draft.validate()?))
    }

    #[must_use]
    pub fn with_settings(mut self, settings: DrillSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &DrillSettings {
        &self.settings
    }

    /// Start a repeat-until-learnt vocabulary drill over the given lessons.
    ///
    /// An empty selection yields a drill with no current item.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Content` if lessons cannot be loaded, or
    /// `SessionError::Scheduler` if the pool is malformed.
    pub fn start_vocabulary(
        &self,
        lesson_ids: &[LessonId],
        expected: AnswerField,
    ) -> Result<AdaptiveScheduler, SessionError> {
        let lessons = self.lessons.load_lessons(lesson_ids)?;
        let items = content::vocabulary_items(&lessons, expected);
        info!(items = items.len(), ?expected, "starting vocabulary drill");
        Ok(AdaptiveScheduler::new(items, &self.settings)?)
    }

    /// Start a repeat-until-learnt conjugation drill for the selected forms.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Content` if lessons cannot be loaded, or
    /// `SessionError::Scheduler` if the pool is malformed.
    pub fn start_conjugation(
        &self,
        lesson_ids: &[LessonId],
        forms: &[ConjugationForm],
    ) -> Result<AdaptiveScheduler, SessionError> {
        let lessons = self.lessons.load_lessons(lesson_ids)?;
        let items = content::conjugation_items(&lessons, forms);
        info!(items = items.len(), forms = forms.len(), "starting conjugation drill");
        Ok(AdaptiveScheduler::new(items, &self.settings)?)
    }

    /// Start a drill over the items behind `keys`, for example the mistakes
    /// reported by an earlier drill.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Content` if lessons cannot be loaded or a key is
    /// malformed.
    pub fn start_review(
        &self,
        lesson_ids: &[LessonId],
        keys: &[ItemKey],
        expected: AnswerField,
    ) -> Result<AdaptiveScheduler, SessionError> {
        let lessons = self.lessons.load_lessons(lesson_ids)?;
        let items = content::review_items(&lessons, keys, expected)?;
        info!(items = items.len(), requested = keys.len(), "starting review drill");
        Ok(AdaptiveScheduler::new(items, &self.settings)?)
    }

    /// Start a drill directly from raw loader records.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Scheduler` if two records share a key.
    pub fn start_from_records(
        &self,
        records: Vec<RawItem>,
    ) -> Result<AdaptiveScheduler, SessionError> {
        let items = content::items_from_records(records);
        Ok(AdaptiveScheduler::new(items, &self.settings)?)
    }

    /// Start a single-pass multiple-choice session; the first question is ready on return.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Content` if lessons cannot be loaded, or
    /// `SessionError::Empty` if the lessons hold no words.
    pub fn start_multiple_choice(
        &self,
        lesson_ids: &[LessonId],
        prompt: AnswerField,
        expected: AnswerField,
    ) -> Result<MultipleChoiceSession, SessionError> {
        let lessons = self.lessons.load_lessons(lesson_ids)?;
        let questions = content::quiz_questions(&lessons, prompt, expected);
        info!(questions = questions.len(), "starting multiple choice session");
        let mut session = MultipleChoiceSession::new(questions, &self.settings)?;
        session.start();
        Ok(session)
    }
}

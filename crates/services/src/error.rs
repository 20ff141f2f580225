//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::SchedulerError;
use drill_core::model::{LessonId, ParseKeyError, SettingsError};

/// Errors emitted by lesson sources.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentError {
    #[error("lesson not found: {0}")]
    LessonNotFound(LessonId),
    #[error("content source failed: {0}")]
    Source(String),
    #[error("invalid item key: {0}")]
    InvalidKey(#[from] ParseKeyError),
}

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error("session has not been started")]
    NotStarted,
    #[error("session already completed")]
    Completed,
    #[error("choice '{choice}' is outside the {options} available options")]
    ChoiceOutOfRange { choice: char, options: usize },
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

//! Drill orchestration on top of `drill-core`: lesson sources, content
//! builders and the multiple-choice session.

#![forbid(unsafe_code)]

pub mod content;
pub mod error;
pub mod sessions;

pub use drill_core::{AdaptiveScheduler, DrillProgress};

pub use content::{InMemoryLessons, LessonSource, QuizQuestion};
pub use error::{ContentError, SessionError};
pub use sessions::{MultipleChoiceSession, SessionLauncher, SessionProgress};

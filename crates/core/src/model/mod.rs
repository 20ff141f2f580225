mod conjugation;
mod ids;
mod item;
mod settings;
mod statistics;
mod word;

pub use ids::{ItemKey, LessonId, ParseKeyError, WordId};

pub use conjugation::{ConjugationError, ConjugationForm};
pub use item::{RawItem, StudyItem};
pub use settings::{DrillSettings, DrillSettingsDraft, SettingsError};
pub use statistics::ItemStatistics;
pub use word::{AnswerField, Lesson, Word};

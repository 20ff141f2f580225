use thiserror::Error;

use crate::model::{ConjugationError, ParseKeyError, SettingsError};
use crate::scheduler::SchedulerError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Conjugation(#[from] ConjugationError),
    #[error(transparent)]
    Key(#[from] ParseKeyError),
}

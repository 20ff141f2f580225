//! Flashcard scheduling engine for vocabulary and conjugation drills.
//!
//! - `model`: study items, words and lessons, per-item statistics, drill settings
//! - `scheduler`: repeat-until-learnt scheduling over a pool of study items
//! - `distractor`: four-option answer sets for multiple-choice questions

#![forbid(unsafe_code)]

pub mod distractor;
pub mod error;
pub mod model;
pub mod scheduler;

pub use distractor::{OPTION_COUNT, OptionSet, generate_options};
pub use error::Error;
pub use scheduler::{AdaptiveScheduler, DrillProgress, SchedulerError};

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

use crate::model::conjugation::{ConjugationError, ConjugationForm};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseKeyError {
    #[error("item key `{0}` does not start with a word id")]
    InvalidWordId(String),
    #[error("item key `{0}` has a malformed form index")]
    InvalidFormIndex(String),
    #[error(transparent)]
    Form(#[from] ConjugationError),
}

//
// ─── IDS ───────────────────────────────────────────────────────────────────────
//

/// Dictionary word id as assigned by the content loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(u64);

impl WordId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(u64);

impl LessonId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── ITEM KEY ──────────────────────────────────────────────────────────────────
//

/// Stable identity of a drill target inside a pool.
///
/// Vocabulary items render as `"<word id>"`, conjugation items as
/// `"<word id>_<form index>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the key back into the word it drills and, for conjugation
    /// items, the form.
    ///
    /// # Errors
    ///
    /// Returns `ParseKeyError` if either part is not a number or the form
    /// index names no known form.
    pub fn parts(&self) -> Result<(WordId, Option<ConjugationForm>), ParseKeyError> {
        let (word, form) = match self.0.split_once('_') {
            Some((word, form)) => (word, Some(form)),
            None => (self.0.as_str(), None),
        };

        let word_id = word
            .parse::<u64>()
            .map(WordId::new)
            .map_err(|_| ParseKeyError::InvalidWordId(self.0.clone()))?;
        let form = match form {
            Some(index) => {
                let index = index
                    .parse::<u8>()
                    .map_err(|_| ParseKeyError::InvalidFormIndex(self.0.clone()))?;
                Some(ConjugationForm::from_index(index)?)
            }
            None => None,
        };

        Ok((word_id, form))
    }
}

impl Borrow<str> for ItemKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConjugationError {
    #[error("unknown conjugation form index: {0}")]
    UnknownForm(u8),
}

//
// ─── CONJUGATION FORM ─────────────────────────────────────────────────────────
//

/// Verb conjugation drilled by a conjugation item.
///
/// The numeric index is part of every conjugation item key, so variants must
/// never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConjugationForm {
    Plain,
    Polite,
    Negative,
    PoliteNegative,
    Past,
    PolitePast,
    PastNegative,
    PolitePastNegative,
    TeForm,
    Potential,
    Passive,
    Causative,
    Conditional,
    Volitional,
    Imperative,
}

impl ConjugationForm {
    /// Every form, in index order.
    pub const ALL: [ConjugationForm; 15] = [
        Self::Plain,
        Self::Polite,
        Self::Negative,
        Self::PoliteNegative,
        Self::Past,
        Self::PolitePast,
        Self::PastNegative,
        Self::PolitePastNegative,
        Self::TeForm,
        Self::Potential,
        Self::Passive,
        Self::Causative,
        Self::Conditional,
        Self::Volitional,
        Self::Imperative,
    ];

    #[must_use]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Converts a stored index back into a form.
    ///
    /// # Errors
    ///
    /// Returns `ConjugationError::UnknownForm` if the index is past the last form.
    pub fn from_index(index: u8) -> Result<Self, ConjugationError> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(ConjugationError::UnknownForm(index))
    }

    /// Human readable name shown next to a conjugation prompt.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Plain => "Plain",
            Self::Polite => "Polite",
            Self::Negative => "Negative",
            Self::PoliteNegative => "Polite Negative",
            Self::Past => "Past Form",
            Self::PolitePast => "Past Positive Formal",
            Self::PastNegative => "Past Negative",
            Self::PolitePastNegative => "Polite Past Negative",
            Self::TeForm => "Te Form",
            Self::Potential => "Potential",
            Self::Passive => "Passive",
            Self::Causative => "Causative",
            Self::Conditional => "Conditional",
            Self::Volitional => "Volitional",
            Self::Imperative => "Imperative",
        }
    }
}

impl fmt::Display for ConjugationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

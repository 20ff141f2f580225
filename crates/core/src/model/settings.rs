use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("required correct answers must be > 0")]
    InvalidRequiredCorrectAnswers,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Validated configuration for a drill session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillSettings {
    required_correct_answers: u32,
    shuffle: bool,
    seed: Option<u64>,
}

impl DrillSettings {
    /// Creates settings with the given mastery threshold and selection policy.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidRequiredCorrectAnswers` if the threshold is zero.
    pub fn new(required_correct_answers: u32, shuffle: bool) -> Result<Self, SettingsError> {
        if required_correct_answers == 0 {
            return Err(SettingsError::InvalidRequiredCorrectAnswers);
        }
        Ok(Self {
            required_correct_answers,
            shuffle,
            seed: None,
        })
    }

    /// Fix the randomness source so a session replays the same sequence.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn required_correct_answers(&self) -> u32 {
        self.required_correct_answers
    }

    #[must_use]
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Builds the randomness source for one session.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

impl Default for DrillSettings {
    fn default() -> Self {
        Self {
            required_correct_answers: 1,
            shuffle: true,
            seed: None,
        }
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated settings as stored by the settings collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillSettingsDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_correct_answers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuffle: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl DrillSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft, filling unset fields from `DrillSettings::default()`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the mastery threshold is zero.
    pub fn validate(self) -> Result<DrillSettings, SettingsError> {
        let defaults = DrillSettings::default();
        let settings = DrillSettings::new(
            self.required_correct_answers
                .unwrap_or(defaults.required_correct_answers),
            self.shuffle.unwrap_or(defaults.shuffle),
        )?;
        Ok(match self.seed {
            Some(seed) => settings.with_seed(seed),
            None => settings,
        })
    }
}

impl From<&DrillSettings> for DrillSettingsDraft {
    fn from(settings: &DrillSettings) -> Self {
        Self {
            required_correct_answers: Some(settings.required_correct_answers),
            shuffle: Some(settings.shuffle),
            seed: settings.seed,
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::model::conjugation::ConjugationForm;
use crate::model::ids::{ItemKey, WordId};

//
// ─── STUDY ITEM ───────────────────────────────────────────────────────────────
//

/// A single drillable unit: something with a stable key and an exact expected answer.
///
/// One word yields one vocabulary item, but may yield several conjugation
/// items (one per drilled form).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StudyItem {
    Vocabulary {
        word_id: WordId,
        answer: String,
    },
    Conjugation {
        word_id: WordId,
        form: ConjugationForm,
        answer: String,
    },
}

impl StudyItem {
    #[must_use]
    pub fn vocabulary(word_id: WordId, answer: impl Into<String>) -> Self {
        Self::Vocabulary {
            word_id,
            answer: answer.into(),
        }
    }

    #[must_use]
    pub fn conjugation(word_id: WordId, form: ConjugationForm, answer: impl Into<String>) -> Self {
        Self::Conjugation {
            word_id,
            form,
            answer: answer.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> ItemKey {
        match self {
            Self::Vocabulary { word_id, .. } => ItemKey::new(word_id.to_string()),
            Self::Conjugation { word_id, form, .. } => {
                ItemKey::new(format!("{word_id}_{}", form.index()))
            }
        }
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        match self {
            Self::Vocabulary { answer, .. } | Self::Conjugation { answer, .. } => answer,
        }
    }

    #[must_use]
    pub fn word_id(&self) -> WordId {
        match self {
            Self::Vocabulary { word_id, .. } | Self::Conjugation { word_id, .. } => *word_id,
        }
    }

    #[must_use]
    pub fn form(&self) -> Option<ConjugationForm> {
        match self {
            Self::Vocabulary { .. } => None,
            Self::Conjugation { form, .. } => Some(*form),
        }
    }
}

//
// ─── RAW RECORD ───────────────────────────────────────────────────────────────
//

/// Flat record handed over by a content loader before it is typed into a `StudyItem`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    pub word_id: WordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<ConjugationForm>,
    pub answer: String,
}

impl From<RawItem> for StudyItem {
    fn from(raw: RawItem) -> Self {
        match raw.form {
            Some(form) => StudyItem::conjugation(raw.word_id, form, raw.answer),
            None => StudyItem::vocabulary(raw.word_id, raw.answer),
        }
    }
}

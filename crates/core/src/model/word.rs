use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::conjugation::ConjugationForm;
use crate::model::ids::{LessonId, WordId};

//
// ─── ANSWER FIELD ─────────────────────────────────────────────────────────────
//

/// Which rendering of a word is shown as the prompt or expected as the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerField {
    /// Meaning in the learner's own language.
    Translation,
    /// Hiragana/katakana spelling.
    Kana,
    /// Latin transliteration.
    Romaji,
}

//
// ─── WORD ─────────────────────────────────────────────────────────────────────
//

/// Dictionary entry as supplied by the content loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub kana: String,
    #[serde(default)]
    pub kanji: String,
    pub translation: String,
    pub romaji: String,
    #[serde(default)]
    pub conjugations: BTreeMap<ConjugationForm, String>,
}

impl Word {
    #[must_use]
    pub fn new(
        id: WordId,
        kana: impl Into<String>,
        translation: impl Into<String>,
        romaji: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kana: kana.into(),
            kanji: String::new(),
            translation: translation.into(),
            romaji: romaji.into(),
            conjugations: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_kanji(mut self, kanji: impl Into<String>) -> Self {
        self.kanji = kanji.into();
        self
    }

    #[must_use]
    pub fn with_conjugation(mut self, form: ConjugationForm, text: impl Into<String>) -> Self {
        self.conjugations.insert(form, text.into());
        self
    }

    #[must_use]
    pub fn text(&self, field: AnswerField) -> &str {
        match field {
            AnswerField::Translation => &self.translation,
            AnswerField::Kana => &self.kana,
            AnswerField::Romaji => &self.romaji,
        }
    }

    /// Conjugated text for `form`, or `None` when the word has no usable entry.
    #[must_use]
    pub fn conjugation(&self, form: ConjugationForm) -> Option<&str> {
        self.conjugations
            .get(&form)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }
}

//
// ─── LESSON ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    #[serde(default)]
    pub group_name: String,
    pub main_name: String,
    #[serde(default)]
    pub sub_name: String,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl Lesson {
    #[must_use]
    pub fn new(id: LessonId, main_name: impl Into<String>, words: Vec<Word>) -> Self {
        Self {
            id,
            group_name: String::new(),
            main_name: main_name.into(),
            sub_name: String::new(),
            words,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.group_name.is_empty()
            && self.main_name.is_empty()
            && self.sub_name.is_empty()
            && self.words.is_empty()
    }
}

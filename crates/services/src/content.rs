//! Turning loaded lessons and raw records into drillable content.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

use drill_core::model::{
    AnswerField, ConjugationForm, ItemKey, Lesson, LessonId, RawItem, StudyItem, Word, WordId,
};

use crate::error::ContentError;

//
// ─── LESSON SOURCE ─────────────────────────────────────────────────────────────
//

/// Supplies lessons to drill. Implemented by whatever owns lesson storage.
pub trait LessonSource {
    /// Load the requested lessons, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::LessonNotFound` if any id is unknown, or
    /// `ContentError::Source` if the backing store fails.
    fn load_lessons(&self, ids: &[LessonId]) -> Result<Vec<Lesson>, ContentError>;
}

/// Lesson source backed by a plain list, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLessons {
    lessons: Vec<Lesson>,
}

impl InMemoryLessons {
    #[must_use]
    pub fn new(lessons: Vec<Lesson>) -> Self {
        Self { lessons }
    }

    /// Insert or replace a lesson by id.
    pub fn upsert(&mut self, lesson: Lesson) {
        match self.lessons.iter_mut().find(|l| l.id == lesson.id) {
            Some(existing) => *existing = lesson,
            None => self.lessons.push(lesson),
        }
    }

    #[must_use]
    pub fn ids(&self) -> Vec<LessonId> {
        self.lessons.iter().map(|l| l.id).collect()
    }
}

impl LessonSource for InMemoryLessons {
    fn load_lessons(&self, ids: &[LessonId]) -> Result<Vec<Lesson>, ContentError> {
        ids.iter()
            .map(|id| {
                self.lessons
                    .iter()
                    .find(|l| l.id == *id)
                    .cloned()
                    .ok_or(ContentError::LessonNotFound(*id))
            })
            .collect()
    }
}

//
// ─── QUIZ QUESTION ─────────────────────────────────────────────────────────────
//

/// A study item paired with the text shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub item: StudyItem,
}

impl QuizQuestion {
    #[must_use]
    pub fn new(prompt: impl Into<String>, item: StudyItem) -> Self {
        Self {
            prompt: prompt.into(),
            item,
        }
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        self.item.answer()
    }
}

//
// ─── BUILDERS ──────────────────────────────────────────────────────────────────
//

/// One vocabulary item per word, expecting the text in `expected`.
///
/// A word appearing in several lessons is only drilled once.
#[must_use]
pub fn vocabulary_items(lessons: &[Lesson], expected: AnswerField) -> Vec<StudyItem> {
    let mut seen = HashSet::new();
    let items: Vec<StudyItem> = lessons
        .iter()
        .flat_map(|l| &l.words)
        .filter(|word| seen.insert(word.id))
        .map(|word| StudyItem::vocabulary(word.id, word.text(expected)))
        .collect();
    if items.is_empty() {
        warn!(lessons = lessons.len(), "no vocabulary items in selected lessons");
    }
    items
}

/// One conjugation item per word and selected form the word has text for.
#[must_use]
pub fn conjugation_items(lessons: &[Lesson], forms: &[ConjugationForm]) -> Vec<StudyItem> {
    let mut seen = HashSet::new();
    let mut items: Vec<StudyItem> = Vec::new();
    for word in lessons.iter().flat_map(|l| &l.words) {
        for &form in forms {
            let Some(text) = word.conjugation(form) else {
                continue;
            };
            let item = StudyItem::conjugation(word.id, form, text);
            if seen.insert(item.key()) {
                items.push(item);
            }
        }
    }
    if items.is_empty() {
        warn!(
            lessons = lessons.len(),
            forms = forms.len(),
            "no conjugation items could be created"
        );
    }
    items
}

/// Multiple-choice questions prompting with `prompt` and expecting `expected`.
#[must_use]
pub fn quiz_questions(
    lessons: &[Lesson],
    prompt: AnswerField,
    expected: AnswerField,
) -> Vec<QuizQuestion> {
    lessons
        .iter()
        .flat_map(|l| &l.words)
        .map(|word| {
            QuizQuestion::new(
                word.text(prompt),
                StudyItem::vocabulary(word.id, word.text(expected)),
            )
        })
        .collect()
}

/// Rebuild the items behind `keys`, typically the mistakes of an earlier drill.
///
/// Vocabulary keys expect the text in `expected`; conjugation keys expect the
/// stored conjugation. Keys whose word or form is no longer in the lessons are
/// skipped.
///
/// # Errors
///
/// Returns `ContentError::InvalidKey` if a key is malformed.
pub fn review_items(
    lessons: &[Lesson],
    keys: &[ItemKey],
    expected: AnswerField,
) -> Result<Vec<StudyItem>, ContentError> {
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(keys.len());
    for key in keys {
        if !seen.insert(key) {
            continue;
        }
        let (word_id, form) = key.parts()?;
        let Some(word) = find_word(lessons, word_id) else {
            warn!(key = %key, "word for review item not found");
            continue;
        };
        match form {
            None => items.push(StudyItem::vocabulary(word_id, word.text(expected))),
            Some(form) => match word.conjugation(form) {
                Some(text) => items.push(StudyItem::conjugation(word_id, form, text)),
                None => warn!(key = %key, %form, "conjugation for review item not found"),
            },
        }
    }
    Ok(items)
}

fn find_word(lessons: &[Lesson], word_id: WordId) -> Option<&Word> {
    lessons
        .iter()
        .flat_map(|l| &l.words)
        .find(|word| word.id == word_id)
}

/// Type a batch of raw loader records.
#[must_use]
pub fn items_from_records(records: impl IntoIterator<Item = RawItem>) -> Vec<StudyItem> {
    records.into_iter().map(StudyItem::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lessons() -> Vec<Lesson> {
        let taberu = Word::new(WordId::new(1), "たべる", "to eat", "taberu")
            .with_conjugation(ConjugationForm::Past, "tabeta")
            .with_conjugation(ConjugationForm::Negative, "tabenai");
        let nomu = Word::new(WordId::new(2), "のむ", "to drink", "nomu")
            .with_conjugation(ConjugationForm::Past, "nonda");
        vec![
            Lesson::new(LessonId::new(1), "Verbs 1", vec![taberu.clone(), nomu]),
            Lesson::new(LessonId::new(2), "Review", vec![taberu]),
        ]
    }

    #[test]
    fn vocabulary_items_use_requested_field_once_per_word() {
        let items = vocabulary_items(&lessons(), AnswerField::Romaji);
        let answers: Vec<&str> = items.iter().map(StudyItem::answer).collect();
        assert_eq!(answers, vec!["taberu", "nomu"]);
    }

    #[test]
    fn conjugation_items_skip_missing_forms() {
        let forms = [ConjugationForm::Past, ConjugationForm::Negative];
        let items = conjugation_items(&lessons(), &forms);
        let keys: Vec<String> = items.iter().map(|i| i.key().to_string()).collect();
        assert_eq!(keys, vec!["1_4", "1_2", "2_4"]);
    }

    #[test]
    fn conjugation_items_empty_when_no_form_matches() {
        let items = conjugation_items(&lessons(), &[ConjugationForm::Imperative]);
        assert!(items.is_empty());
    }

    #[test]
    fn quiz_questions_pair_prompt_and_answer() {
        let questions = quiz_questions(&lessons(), AnswerField::Translation, AnswerField::Kana);
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].prompt, "to eat");
        assert_eq!(questions[0].answer(), "たべる");
    }

    #[test]
    fn in_memory_source_reports_missing_lesson() {
        let source = InMemoryLessons::new(lessons());
        let err = source
            .load_lessons(&[LessonId::new(1), LessonId::new(9)])
            .unwrap_err();
        assert_eq!(err, ContentError::LessonNotFound(LessonId::new(9)));
    }

    #[test]
    fn in_memory_source_upserts_by_id() {
        let mut source = InMemoryLessons::new(lessons());
        source.upsert(Lesson::new(LessonId::new(2), "Renamed", Vec::new()));
        source.upsert(Lesson::new(LessonId::new(3), "New", Vec::new()));

        assert_eq!(
            source.ids(),
            vec![LessonId::new(1), LessonId::new(2), LessonId::new(3)]
        );
        let loaded = source.load_lessons(&[LessonId::new(2)]).unwrap();
        assert_eq!(loaded[0].main_name, "Renamed");
    }

    #[test]
    fn review_items_rebuild_both_kinds() {
        let keys = [ItemKey::new("2_4"), ItemKey::new("1"), ItemKey::new("2_4")];
        let items = review_items(&lessons(), &keys, AnswerField::Translation).unwrap();

        assert_eq!(
            items,
            vec![
                StudyItem::conjugation(WordId::new(2), ConjugationForm::Past, "nonda"),
                StudyItem::vocabulary(WordId::new(1), "to eat"),
            ]
        );
    }

    #[test]
    fn review_items_skip_vanished_words_and_forms() {
        let keys = [ItemKey::new("9"), ItemKey::new("2_8"), ItemKey::new("1_2")];
        let items = review_items(&lessons(), &keys, AnswerField::Kana).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].answer(), "tabenai");
    }

    #[test]
    fn review_items_reject_malformed_keys() {
        let err = review_items(&lessons(), &[ItemKey::new("x_1")], AnswerField::Kana).unwrap_err();
        assert!(matches!(err, ContentError::InvalidKey(_)));
    }

    #[test]
    fn dedup_keeps_first_occurrence_across_many_lessons() {
        let many: Vec<Lesson> = (0..50).flat_map(|_| lessons()).collect();
        assert_eq!(vocabulary_items(&many, AnswerField::Kana).len(), 2);
        assert_eq!(conjugation_items(&many, &[ConjugationForm::Past]).len(), 2);
    }

    #[test]
    fn records_become_typed_items() {
        let items = items_from_records(vec![
            RawItem {
                word_id: WordId::new(4),
                form: None,
                answer: "sleep".to_string(),
            },
            RawItem {
                word_id: WordId::new(4),
                form: Some(ConjugationForm::Polite),
                answer: "nemasu".to_string(),
            },
        ]);
        assert_eq!(items[0].key().as_str(), "4");
        assert_eq!(items[1].key().as_str(), "4_1");
    }
}

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{DrillSettings, ItemKey, ItemStatistics, StudyItem};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchedulerError {
    #[error("no current item: the pool is empty or every item is learnt")]
    NoCurrentItem,
    #[error("duplicate item key in pool: {0}")]
    DuplicateKey(ItemKey),
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Aggregated view of drill progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrillProgress {
    pub total: usize,
    pub learnt: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

//
// ─── SCHEDULER ─────────────────────────────────────────────────────────────────
//

/// Repeats study items until each one is learnt.
///
/// Every answer is judged by exact string comparison. An item is learnt once
/// its correct answers outnumber its wrong answers by the configured
/// threshold, after which it is never presented again.
///
/// Two selection policies are available:
///
/// - shuffle: pick uniformly among all unlearnt items, which may repeat the
///   item that was just answered
/// - in order: walk the pool circularly, skipping learnt items
///
/// An empty pool is accepted. It has no current item and never completes.
///
/// # Examples
///
/// ```
/// # use drill_core::model::{DrillSettings, StudyItem, WordId};
/// # use drill_core::scheduler::AdaptiveScheduler;
/// let items = vec![StudyItem::vocabulary(WordId::new(1), "ate")];
/// let settings = DrillSettings::new(1, false)?;
/// let mut scheduler = AdaptiveScheduler::new(items, &settings)?;
///
/// assert!(scheduler.advance("ate"));
/// assert!(scheduler.is_complete());
/// # Ok::<(), drill_core::Error>(())
/// ```
pub struct AdaptiveScheduler<R = StdRng> {
    items: Vec<StudyItem>,
    keys: Vec<ItemKey>,
    statistics: HashMap<ItemKey, ItemStatistics>,
    current: Option<usize>,
    required_correct_answers: u32,
    shuffle: bool,
    rng: R,
}

impl AdaptiveScheduler<StdRng> {
    /// Create a scheduler using the randomness source described by `settings`.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::DuplicateKey` if two items share a key.
    pub fn new(items: Vec<StudyItem>, settings: &DrillSettings) -> Result<Self, SchedulerError> {
        Self::with_rng(items, settings, settings.rng())
    }
}

impl<R: Rng> AdaptiveScheduler<R> {
    /// Create a scheduler with an injected randomness source.
    ///
    /// The pool is shuffled once here when shuffling is enabled.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::DuplicateKey` if two items share a key.
    pub fn with_rng(
        mut items: Vec<StudyItem>,
        settings: &DrillSettings,
        mut rng: R,
    ) -> Result<Self, SchedulerError> {
        if settings.shuffle() {
            items.shuffle(&mut rng);
        }

        let keys: Vec<ItemKey> = items.iter().map(StudyItem::key).collect();
        let mut statistics = HashMap::with_capacity(keys.len());
        for key in &keys {
            if statistics
                .insert(key.clone(), ItemStatistics::default())
                .is_some()
            {
                return Err(SchedulerError::DuplicateKey(key.clone()));
            }
        }

        let current = if items.is_empty() { None } else { Some(0) };
        debug!(
            items = items.len(),
            required = settings.required_correct_answers(),
            shuffle = settings.shuffle(),
            "drill started"
        );

        Ok(Self {
            items,
            keys,
            statistics,
            current,
            required_correct_answers: settings.required_correct_answers(),
            shuffle: settings.shuffle(),
            rng,
        })
    }

    /// Judge `answer` against the current item, record it and move on.
    ///
    /// Returns whether the answer matched. Once the drill is complete (or the
    /// pool is empty) this does nothing and returns false.
    pub fn advance(&mut self, answer: &str) -> bool {
        let Some(index) = self.current else {
            return false;
        };

        let correct = answer == self.items[index].answer();
        let key = &self.keys[index];
        if let Some(stats) = self.statistics.get_mut(key) {
            if correct {
                if stats.record_correct(self.required_correct_answers) {
                    info!(
                        key = %key,
                        good = stats.good_attempts(),
                        bad = stats.bad_attempts(),
                        "item learnt"
                    );
                }
            } else {
                stats.record_incorrect();
            }
        }
        debug!(key = %key, correct, "answer recorded");

        self.move_to_next();
        correct
    }

    fn move_to_next(&mut self) {
        if self.is_complete() {
            info!(items = self.items.len(), "drill complete");
            self.current = None;
            return;
        }

        let next = if self.shuffle {
            let unlearnt: Vec<usize> = (0..self.items.len())
                .filter(|&i| !self.is_learnt_at(i))
                .collect();
            if unlearnt.is_empty() {
                None
            } else {
                Some(unlearnt[self.rng.random_range(0..unlearnt.len())])
            }
        } else {
            let len = self.items.len();
            let start = self.current.unwrap_or(0);
            (1..=len)
                .map(|step| (start + step) % len)
                .find(|&i| !self.is_learnt_at(i))
        };

        debug!(next = ?next.map(|i| self.keys[i].as_str()), "next item selected");
        self.current = next;
    }

    fn is_learnt_at(&self, index: usize) -> bool {
        self.statistics
            .get(&self.keys[index])
            .is_some_and(ItemStatistics::is_learnt)
    }
}

impl<R> AdaptiveScheduler<R> {
    /// True iff `answer` matches the current item. Records nothing.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.current
            .is_some_and(|index| self.items[index].answer() == answer)
    }

    /// True iff the pool is non-empty and every item is learnt.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.items.is_empty() && self.statistics.values().all(ItemStatistics::is_learnt)
    }

    /// The item to present next.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::NoCurrentItem` for an empty pool or a completed drill.
    pub fn current_item(&self) -> Result<&StudyItem, SchedulerError> {
        self.current
            .map(|index| &self.items[index])
            .ok_or(SchedulerError::NoCurrentItem)
    }

    #[must_use]
    pub fn statistics(&self) -> &HashMap<ItemKey, ItemStatistics> {
        &self.statistics
    }

    #[must_use]
    pub fn statistics_for(&self, key: &str) -> Option<&ItemStatistics> {
        self.statistics.get(key)
    }

    /// Items in presentation pool order (after the construction shuffle).
    #[must_use]
    pub fn items(&self) -> &[StudyItem] {
        &self.items
    }

    #[must_use]
    pub fn required_correct_answers(&self) -> u32 {
        self.required_correct_answers
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn learnt_count(&self) -> usize {
        self.statistics.values().filter(|s| s.is_learnt()).count()
    }

    /// Items answered wrongly at least `min_mistakes` times, in pool order.
    #[must_use]
    pub fn items_with_mistakes(&self, min_mistakes: u32) -> Vec<&StudyItem> {
        self.items_where(|stats| stats.bad_attempts() >= min_mistakes)
    }

    #[must_use]
    pub fn learnt_items(&self) -> Vec<&StudyItem> {
        self.items_where(ItemStatistics::is_learnt)
    }

    #[must_use]
    pub fn progress(&self) -> DrillProgress {
        let learnt = self.learnt_count();
        DrillProgress {
            total: self.items.len(),
            learnt,
            remaining: self.items.len().saturating_sub(learnt),
            is_complete: self.is_complete(),
        }
    }

    fn items_where(&self, predicate: impl Fn(&ItemStatistics) -> bool) -> Vec<&StudyItem> {
        self.items
            .iter()
            .zip(&self.keys)
            .filter(|(_, key)| self.statistics.get(*key).is_some_and(&predicate))
            .map(|(item, _)| item)
            .collect()
    }
}

impl<R> fmt::Debug for AdaptiveScheduler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptiveScheduler")
            .field("items_len", &self.items.len())
            .field("current", &self.current)
            .field("learnt", &self.learnt_count())
            .field("required_correct_answers", &self.required_correct_answers)
            .field("shuffle", &self.shuffle)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConjugationForm, WordId};
    use rand::SeedableRng;

    fn item(id: u64, answer: &str) -> StudyItem {
        StudyItem::vocabulary(WordId::new(id), answer)
    }

    fn in_order(required: u32) -> DrillSettings {
        DrillSettings::new(required, false).unwrap()
    }

    fn shuffled(required: u32, seed: u64) -> DrillSettings {
        DrillSettings::new(required, true).unwrap().with_seed(seed)
    }

    fn answer_current<R: Rng>(scheduler: &mut AdaptiveScheduler<R>) -> bool {
        let answer = scheduler.current_item().unwrap().answer().to_string();
        scheduler.advance(&answer)
    }

    #[test]
    fn single_item_learnt_after_one_correct_answer() {
        let mut scheduler = AdaptiveScheduler::new(vec![item(1, "ate")], &in_order(1)).unwrap();

        assert!(scheduler.advance("ate"));
        assert!(scheduler.is_complete());

        let stats = scheduler.statistics_for("1").unwrap();
        assert_eq!(stats.good_attempts(), 1);
        assert_eq!(stats.bad_attempts(), 0);
        assert!(stats.is_learnt());
    }

    #[test]
    fn threshold_two_needs_two_correct_answers() {
        let mut scheduler = AdaptiveScheduler::new(vec![item(1, "ate")], &in_order(2)).unwrap();

        assert!(scheduler.advance("ate"));
        assert!(!scheduler.is_complete());
        assert!(scheduler.advance("ate"));
        assert!(scheduler.is_complete());
    }

    #[test]
    fn wrong_answer_counts_as_bad_attempt() {
        let mut scheduler = AdaptiveScheduler::new(vec![item(1, "ate")], &in_order(1)).unwrap();

        assert!(!scheduler.advance("wrong"));
        let stats = scheduler.statistics_for("1").unwrap();
        assert_eq!(stats.good_attempts(), 0);
        assert_eq!(stats.bad_attempts(), 1);
        assert!(!stats.is_learnt());
        assert!(!scheduler.is_complete());
    }

    #[test]
    fn mistakes_must_be_made_up_before_learning() {
        let mut scheduler = AdaptiveScheduler::new(vec![item(1, "ate")], &in_order(1)).unwrap();

        scheduler.advance("eat");
        assert!(scheduler.advance("ate"));
        assert!(!scheduler.is_complete());
        assert!(scheduler.advance("ate"));
        assert!(scheduler.is_complete());
    }

    #[test]
    fn comparison_is_exact() {
        let scheduler = AdaptiveScheduler::new(vec![item(1, "ate")], &in_order(1)).unwrap();
        assert!(scheduler.is_correct("ate"));
        assert!(!scheduler.is_correct("Ate"));
        assert!(!scheduler.is_correct(" ate"));
    }

    #[test]
    fn is_correct_does_not_record() {
        let scheduler = AdaptiveScheduler::new(vec![item(1, "ate")], &in_order(1)).unwrap();
        assert!(scheduler.is_correct("ate"));
        assert_eq!(scheduler.statistics_for("1"), Some(&ItemStatistics::default()));
    }

    #[test]
    fn empty_pool_is_never_complete() {
        let mut scheduler = AdaptiveScheduler::new(Vec::new(), &in_order(1)).unwrap();

        assert!(!scheduler.is_complete());
        assert!(!scheduler.advance("anything"));
        assert!(!scheduler.is_correct("anything"));
        assert_eq!(scheduler.current_item(), Err(SchedulerError::NoCurrentItem));
    }

    #[test]
    fn completed_drill_has_no_current_item_and_ignores_answers() {
        let mut scheduler = AdaptiveScheduler::new(vec![item(1, "ate")], &in_order(1)).unwrap();
        scheduler.advance("ate");

        assert_eq!(scheduler.current_item(), Err(SchedulerError::NoCurrentItem));
        assert!(!scheduler.advance("ate"));
        assert_eq!(scheduler.statistics_for("1").unwrap().good_attempts(), 1);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = AdaptiveScheduler::new(vec![item(1, "ate"), item(1, "eat")], &in_order(1))
            .unwrap_err();
        assert_eq!(err, SchedulerError::DuplicateKey(ItemKey::new("1")));
    }

    #[test]
    fn in_order_walks_the_pool_and_skips_learnt_items() {
        let items = vec![item(1, "a"), item(2, "b"), item(3, "c")];
        let mut scheduler = AdaptiveScheduler::new(items, &in_order(1)).unwrap();

        assert_eq!(scheduler.current_item().unwrap().answer(), "a");
        scheduler.advance("a");
        assert_eq!(scheduler.current_item().unwrap().answer(), "b");
        scheduler.advance("wrong");
        assert_eq!(scheduler.current_item().unwrap().answer(), "c");
        scheduler.advance("c");
        // "a" is learnt, so the walk wraps straight to "b".
        assert_eq!(scheduler.current_item().unwrap().answer(), "b");
        scheduler.advance("b");
        assert_eq!(scheduler.current_item().unwrap().answer(), "b");
        scheduler.advance("b");
        assert!(scheduler.is_complete());
    }

    #[test]
    fn in_order_revisits_last_unlearnt_item() {
        let items = vec![item(1, "a"), item(2, "b")];
        let mut scheduler = AdaptiveScheduler::new(items, &in_order(1)).unwrap();

        scheduler.advance("a");
        scheduler.advance("nope");
        assert_eq!(scheduler.current_item().unwrap().answer(), "b");
    }

    #[test]
    fn shuffle_completes_once_every_item_answered() {
        let items = vec![item(1, "a"), item(2, "b"), item(3, "c")];
        let mut scheduler = AdaptiveScheduler::new(items, &shuffled(1, 42)).unwrap();

        let mut turns = 0;
        while !scheduler.is_complete() {
            assert!(answer_current(&mut scheduler));
            turns += 1;
        }
        assert_eq!(turns, 3);
        assert_eq!(scheduler.learnt_count(), 3);
        assert_eq!(scheduler.current_item(), Err(SchedulerError::NoCurrentItem));
    }

    #[test]
    fn shuffle_only_selects_unlearnt_items() {
        let items: Vec<StudyItem> = (1..=6).map(|id| item(id, &format!("w{id}"))).collect();
        let mut scheduler = AdaptiveScheduler::new(items, &shuffled(2, 5)).unwrap();

        let mut turn = 0;
        while !scheduler.is_complete() {
            let key = scheduler.current_item().unwrap().key();
            assert!(!scheduler.statistics_for(key.as_str()).unwrap().is_learnt());
            if turn < 6 {
                scheduler.advance("miss");
            } else {
                answer_current(&mut scheduler);
            }
            turn += 1;
        }
    }

    #[test]
    fn shuffle_may_repeat_just_answered_item() {
        let items = vec![item(1, "a"), item(2, "b"), item(3, "c")];
        let mut repeats = 0;

        for seed in 0..50 {
            let mut scheduler = AdaptiveScheduler::new(items.clone(), &shuffled(3, seed)).unwrap();
            let mut previous = scheduler.current_item().unwrap().key();
            for _ in 0..5 {
                scheduler.advance("miss");
                let next = scheduler.current_item().unwrap().key();
                if next == previous {
                    repeats += 1;
                }
                previous = next;
            }
        }

        assert!(repeats > 0);
    }

    #[test]
    fn in_order_never_repeats_while_others_remain() {
        let items = vec![item(1, "a"), item(2, "b"), item(3, "c")];
        let mut scheduler = AdaptiveScheduler::new(items, &in_order(3)).unwrap();

        let mut previous = scheduler.current_item().unwrap().key();
        for _ in 0..9 {
            scheduler.advance("miss");
            let next = scheduler.current_item().unwrap().key();
            assert_ne!(next, previous);
            previous = next;
        }
    }

    #[test]
    fn same_seed_gives_same_order() {
        let items: Vec<StudyItem> = (1..=8).map(|id| item(id, &format!("w{id}"))).collect();

        let run = |seed: u64| {
            let mut scheduler = AdaptiveScheduler::new(items.clone(), &shuffled(1, seed)).unwrap();
            let mut seen = Vec::new();
            while let Ok(current) = scheduler.current_item() {
                seen.push(current.key());
                answer_current(&mut scheduler);
            }
            seen
        };

        assert_eq!(run(17), run(17));
    }

    #[test]
    fn with_rng_accepts_injected_source() {
        let rng = StdRng::seed_from_u64(3);
        let items = vec![item(1, "a"), item(2, "b")];
        let scheduler = AdaptiveScheduler::with_rng(items, &shuffled(1, 0), rng).unwrap();
        assert_eq!(scheduler.item_count(), 2);
    }

    #[test]
    fn counters_never_decrease() {
        let items = vec![item(1, "a"), item(2, "b")];
        let mut scheduler = AdaptiveScheduler::new(items, &shuffled(2, 8)).unwrap();
        let mut last: HashMap<ItemKey, ItemStatistics> = scheduler.statistics().clone();

        for turn in 0..40 {
            if scheduler.is_complete() {
                break;
            }
            if turn % 3 == 0 {
                scheduler.advance("miss");
            } else {
                answer_current(&mut scheduler);
            }
            for (key, stats) in scheduler.statistics() {
                let before = &last[key];
                assert!(stats.good_attempts() >= before.good_attempts());
                assert!(stats.bad_attempts() >= before.bad_attempts());
                assert!(stats.is_learnt() || !before.is_learnt());
            }
            last = scheduler.statistics().clone();
        }
    }

    #[test]
    fn reporting_helpers() {
        let items = vec![
            item(1, "a"),
            StudyItem::conjugation(WordId::new(1), ConjugationForm::Past, "ta"),
            item(2, "b"),
        ];
        let mut scheduler = AdaptiveScheduler::new(items, &in_order(1)).unwrap();

        scheduler.advance("a");
        scheduler.advance("wrong");
        scheduler.advance("wrong");

        let progress = scheduler.progress();
        assert_eq!(progress.total, 3);
        assert_eq!(progress.learnt, 1);
        assert_eq!(progress.remaining, 2);
        assert!(!progress.is_complete);

        let mistakes: Vec<String> = scheduler
            .items_with_mistakes(1)
            .iter()
            .map(|i| i.key().to_string())
            .collect();
        assert_eq!(mistakes, vec!["1_4".to_string(), "2".to_string()]);
        assert_eq!(scheduler.learnt_items().len(), 1);
    }
}

//! Multiple-choice option generation.
//!
//! Builds a fixed-size answer set around a correct answer, filling the other
//! slots with distinct answers drawn from the question pool.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::warn;

/// Number of options presented per question.
pub const OPTION_COUNT: usize = 4;

/// Upper bound on random draws per generated set, relative to pool size.
const DRAWS_PER_POOL_ENTRY: usize = 8;

/// Prefix of synthetic options used when the pool cannot supply enough distinct answers.
pub const PLACEHOLDER_PREFIX: &str = "dummy_option_";

/// Shuffled options for one question and the position of the correct answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    options: [String; OPTION_COUNT],
    correct_index: usize,
}

impl OptionSet {
    /// Options in display order.
    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }
}

/// Generate `OPTION_COUNT` options containing `correct` exactly once.
///
/// Pools smaller than `OPTION_COUNT` contribute every distinct answer they
/// have. Larger pools are sampled at random; if sampling keeps hitting
/// duplicates the pool is swept in order instead. Any slot still empty is
/// filled with a `dummy_option_<n>` placeholder.
pub fn generate_options<S, R>(correct: &str, pool: &[S], rng: &mut R) -> OptionSet
where
    S: AsRef<str>,
    R: Rng,
{
    let mut options: Vec<String> = Vec::with_capacity(OPTION_COUNT);
    options.push(correct.to_string());

    if pool.len() < OPTION_COUNT {
        fill_in_order(&mut options, pool);
    } else {
        let max_draws = pool.len().saturating_mul(DRAWS_PER_POOL_ENTRY);
        let mut draws = 0;
        while options.len() < OPTION_COUNT && draws < max_draws {
            draws += 1;
            let candidate = pool[rng.random_range(0..pool.len())].as_ref();
            push_distinct(&mut options, candidate);
        }
        fill_in_order(&mut options, pool);
    }

    if options.len() < OPTION_COUNT {
        warn!(
            distinct = options.len(),
            pool = pool.len(),
            "not enough distinct answers, padding with placeholders"
        );
        pad_with_placeholders(&mut options);
    }

    options.shuffle(rng);
    let correct_index = options
        .iter()
        .position(|option| option == correct)
        .unwrap_or_default();
    let options = std::array::from_fn(|i| std::mem::take(&mut options[i]));

    OptionSet {
        options,
        correct_index,
    }
}

fn fill_in_order<S: AsRef<str>>(options: &mut Vec<String>, pool: &[S]) {
    for answer in pool {
        if options.len() >= OPTION_COUNT {
            break;
        }
        push_distinct(options, answer.as_ref());
    }
}

fn push_distinct(options: &mut Vec<String>, candidate: &str) {
    if !options.iter().any(|existing| existing == candidate) {
        options.push(candidate.to_string());
    }
}

fn pad_with_placeholders(options: &mut Vec<String>) {
    let mut n = options.len();
    while options.len() < OPTION_COUNT {
        let placeholder = format!("{PLACEHOLDER_PREFIX}{n}");
        n += 1;
        push_distinct(options, &placeholder);
    }
}

use serde::{Deserialize, Serialize};

/// Per-item attempt counters for one drill.
///
/// Counters only grow and `learnt` never goes back to false once set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStatistics {
    good_attempts: u32,
    bad_attempts: u32,
    learnt: bool,
}

impl ItemStatistics {
    #[must_use]
    pub fn good_attempts(&self) -> u32 {
        self.good_attempts
    }

    #[must_use]
    pub fn bad_attempts(&self) -> u32 {
        self.bad_attempts
    }

    #[must_use]
    pub fn is_learnt(&self) -> bool {
        self.learnt
    }

    /// Record a correct answer. Returns true when this answer made the item learnt.
    ///
    /// An item becomes learnt once `good >= bad + required_correct_answers`.
    pub fn record_correct(&mut self, required_correct_answers: u32) -> bool {
        self.good_attempts = self.good_attempts.saturating_add(1);
        if self.learnt {
            return false;
        }
        if self.good_attempts >= self.bad_attempts.saturating_add(required_correct_answers) {
            self.learnt = true;
            return true;
        }
        false
    }

    pub fn record_incorrect(&mut self) {
        self.bad_attempts = self.bad_attempts.saturating_add(1);
    }
}

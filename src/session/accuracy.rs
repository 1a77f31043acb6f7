//! Keystroke accuracy
//!
//! Every processed keystroke is either a hit or a miss, so errors can
//! never exceed keystrokes and the percentage stays within [0, 100].

use serde::Serialize;

/// Running keystroke and error counters for a session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AccuracyTracker {
    /// Total keystrokes processed (characters and delimiters)
    total_keystrokes: u32,
    /// Keystrokes that did not match
    total_errors: u32,
}

impl AccuracyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one keystroke
    pub fn record(&mut self, correct: bool) {
        self.total_keystrokes = self.total_keystrokes.saturating_add(1);
        if !correct {
            self.total_errors = self.total_errors.saturating_add(1);
        }
    }

    pub fn keystrokes(&self) -> u32 {
        self.total_keystrokes
    }

    pub fn errors(&self) -> u32 {
        self.total_errors
    }

    /// `(1 - errors / keystrokes) * 100`, or 100 before any keystroke
    pub fn percent(&self) -> f64 {
        if self.total_keystrokes == 0 {
            100.0
        } else {
            (1.0 - self.total_errors as f64 / self.total_keystrokes as f64) * 100.0
        }
    }

    /// Accuracy rounded to two decimals for display
    pub fn display(&self) -> String {
        format!("{:.2}", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_untouched_is_perfect() {
        let tracker = AccuracyTracker::new();
        assert_eq!(tracker.percent(), 100.0);
        assert_eq!(tracker.display(), "100.00");
    }

    #[test]
    fn test_rounding_two_decimals() {
        let mut tracker = AccuracyTracker::new();
        tracker.record(true);
        tracker.record(true);
        tracker.record(false);
        assert_eq!(tracker.display(), "66.67");
        assert_eq!(tracker.keystrokes(), 3);
        assert_eq!(tracker.errors(), 1);
    }

    proptest! {
        #[test]
        fn accuracy_stays_in_range(hits in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut tracker = AccuracyTracker::new();
            for hit in &hits {
                tracker.record(*hit);
            }
            let percent = tracker.percent();
            prop_assert!((0.0..=100.0).contains(&percent));
            prop_assert!(tracker.errors() <= tracker.keystrokes());
            if tracker.errors() == 0 {
                prop_assert_eq!(percent, 100.0);
            }
        }
    }
}

//! Confusion tracking: which characters get typed in place of which
//!
//! Detects:
//! - Repeated confusions (3+ times the same wrong character)
//! - The most frequent confusion pairs for the session summary

use rustc_hash::FxHashMap;

/// Occurrences of one (expected, typed) pair before it is flagged
const ERROR_THRESHOLD: u32 = 3;

#[derive(Clone, Debug, Default)]
pub struct ErrorDetector {
    /// expected char → (typed char → count)
    error_pairs: FxHashMap<char, FxHashMap<char, u32>>,
}

impl ErrorDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mismatch: `got` was typed where `expected` was due
    pub fn record_error(&mut self, expected: char, got: char) {
        if expected == got {
            return;
        }

        *self
            .error_pairs
            .entry(expected)
            .or_default()
            .entry(got)
            .or_insert(0) += 1;
    }

    /// Most common pairs, most frequent first (ties by expected char)
    pub fn top_error_pairs(&self, count: usize) -> Vec<((char, char), u32)> {
        let mut pairs: Vec<_> = self
            .error_pairs
            .iter()
            .flat_map(|(&expected, got_map)| {
                got_map
                    .iter()
                    .map(move |(&got, &n)| ((expected, got), n))
            })
            .collect();

        pairs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        pairs.truncate(count);
        pairs
    }

    /// Expected characters with at least one repeated confusion, sorted
    pub fn problematic_chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = self
            .error_pairs
            .iter()
            .filter(|(_, got_map)| got_map.values().any(|&n| n >= ERROR_THRESHOLD))
            .map(|(&expected, _)| expected)
            .collect();
        chars.sort_unstable();
        chars
    }
}

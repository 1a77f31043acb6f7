//! Session state tracking
//!
//! Maintains:
//! - Lifecycle phase (not started, in progress, ended)
//! - Position in the lesson (level, exercise, sentence, word)
//! - Partial input for the current word
//! - Keystroke/error counters and timing

use super::accuracy::AccuracyTracker;
use crate::narration::Voice;
use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    NotStarted,
    InProgress,
    Ended,
}

/// Indices into the lesson; all zero at the start
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub level: usize,
    pub exercise: usize,
    pub sentence: usize,
    pub word: usize,
}

/// Everything that changes during one lesson
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub phase: Phase,
    pub position: Position,
    /// Accepted characters of the current word, always a prefix of it
    pub partial: String,
    pub tally: AccuracyTracker,
    pub started_at: Option<Instant>,
    /// Wall-clock end time for the results summary
    pub ended_wall: Option<DateTime<Local>>,
    pub elapsed: Option<Duration>,
    /// No narration at all when set
    pub voice_disabled: bool,
    pub voice: Voice,
    /// Input is only processed while focused
    pub focused: bool,
    /// Completed passes over the current sentence
    pub sentence_passes: u32,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Keystrokes are only handled while in progress and focused
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::InProgress && self.focused
    }

    pub fn errors(&self) -> u32 {
        self.tally.errors()
    }

    pub fn keystrokes(&self) -> u32 {
        self.tally.keystrokes()
    }

    /// Elapsed time so far (live while in progress, frozen once ended)
    pub fn duration_at(&self, now: Instant) -> Duration {
        match (self.elapsed, self.started_at) {
            (Some(elapsed), _) => elapsed,
            (None, Some(start)) => now.saturating_duration_since(start),
            (None, None) => Duration::ZERO,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_at(Instant::now()).as_secs_f64()
    }

    /// Back to the first word of the sentence with empty input
    pub fn reset_word(&mut self) {
        self.position.word = 0;
        self.partial.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = SessionState::new();
        assert_eq!(state.phase, Phase::NotStarted);
        assert_eq!(state.position, Position::default());
        assert!(!state.accepts_input());
        assert_eq!(state.duration_secs(), 0.0);
    }

    #[test]
    fn test_elapsed_frozen_after_end() {
        let start = Instant::now();
        let state = SessionState {
            phase: Phase::Ended,
            started_at: Some(start),
            elapsed: Some(Duration::from_secs(7)),
            ..SessionState::default()
        };
        let later = start + Duration::from_secs(60);
        assert_eq!(state.duration_at(later), Duration::from_secs(7));
    }
}

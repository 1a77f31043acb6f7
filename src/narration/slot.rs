//! Single-slot narration queue
//!
//! Depth 1, overwrite semantics: a new request replaces whatever is still
//! pending, so only the most recent cue ever reaches the narrator.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Voice preference forwarded to the narrator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Male,
    Female,
}

impl Voice {
    pub fn toggled(self) -> Self {
        match self {
            Voice::Male => Voice::Female,
            Voice::Female => Voice::Male,
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Voice::Male => f.write_str("voix masculine"),
            Voice::Female => f.write_str("voix féminine"),
        }
    }
}

/// One narration request: segments spoken in order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utterance {
    pub segments: Vec<String>,
    pub voice: Voice,
}

impl Utterance {
    pub fn new(segments: Vec<String>, voice: Voice) -> Self {
        Utterance { segments, voice }
    }

    /// Segments joined for display or a single TTS call
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Default)]
pub struct NarrationSlot {
    pending: Option<Utterance>,
    superseded: u64,
}

impl NarrationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `utterance`, dropping any request still pending
    pub fn request(&mut self, utterance: Utterance) {
        if let Some(dropped) = self.pending.replace(utterance) {
            self.superseded += 1;
            log::trace!("narration superseded: {:?}", dropped.text());
        }
    }

    /// Hand the pending request to the narrator
    pub fn take(&mut self) -> Option<Utterance> {
        self.pending.take()
    }

    /// Number of requests overwritten before being taken
    pub fn superseded(&self) -> u64 {
        self.superseded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(text: &str) -> Utterance {
        Utterance::new(vec![text.to_string()], Voice::Male)
    }

    #[test]
    fn test_last_request_wins() {
        let mut slot = NarrationSlot::new();
        slot.request(utterance("first"));
        slot.request(utterance("second"));

        assert_eq!(slot.superseded(), 1);
        assert_eq!(slot.take().unwrap().text(), "second");
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_taken_request_is_not_superseded() {
        let mut slot = NarrationSlot::new();
        slot.request(utterance("first"));
        assert!(slot.take().is_some());
        slot.request(utterance("second"));

        assert_eq!(slot.superseded(), 0);
        assert_eq!(slot.take().unwrap().text(), "second");
    }

    #[test]
    fn test_text_skips_empty_segments() {
        let u = Utterance::new(
            vec!["Prochain mot:".into(), String::new(), "dog".into()],
            Voice::Female,
        );
        assert_eq!(u.text(), "Prochain mot: dog");
    }

    #[test]
    fn test_voice_toggle() {
        assert_eq!(Voice::Male.toggled(), Voice::Female);
        assert_eq!(Voice::Female.toggled().toggled(), Voice::Female);
    }
}

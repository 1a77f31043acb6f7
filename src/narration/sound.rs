//! Short sound cues
//!
//! Fire-and-forget, like narration. The terminal has no audio playback of
//! its own, so the default sink only rings the bell on mistakes.

use std::io::{stdout, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    /// Any processed keystroke
    Type,
    /// Mismatched character or wrong word
    Error,
    /// Word completed
    Success,
    /// Voice preference switched
    VoiceChange,
}

impl SoundCue {
    /// Resource identifier of the cue's sound file
    pub fn resource(&self) -> &'static str {
        match self {
            SoundCue::Type => "sounds/TypeSound.wav",
            SoundCue::Error => "sounds/ErrorSound.wav",
            SoundCue::Success => "sounds/GoodSound.wav",
            SoundCue::VoiceChange => "sounds/ChangementDeVoix.wav",
        }
    }
}

pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

#[derive(Debug, Default)]
pub struct Muted;

impl SoundSink for Muted {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Rings the terminal bell on errors
#[derive(Debug, Default)]
pub struct TerminalBell;

impl SoundSink for TerminalBell {
    fn play(&mut self, cue: SoundCue) {
        log::trace!("sound cue {}", cue.resource());
        if cue == SoundCue::Error {
            let mut out = stdout();
            let _ = out.write_all(b"\x07").and_then(|_| out.flush());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resources_are_distinct() {
        let cues = [
            SoundCue::Type,
            SoundCue::Error,
            SoundCue::Success,
            SoundCue::VoiceChange,
        ];
        for (i, a) in cues.iter().enumerate() {
            for b in &cues[i + 1..] {
                assert_ne!(a.resource(), b.resource());
            }
        }
    }
}

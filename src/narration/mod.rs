//! Narration: spoken feedback and sound cues
//!
//! # Components
//! - `cues.rs`: French wording of every narration cue
//! - `slot.rs`: Depth-1 request queue (last request wins) and voice preference
//! - `sink.rs`: Narrator trait, external TTS command, silent sink
//! - `sound.rs`: Sound cue identifiers and sinks

pub mod cues;
pub mod sink;
pub mod slot;
pub mod sound;

pub use sink::{CommandNarrator, Narrator, SilentNarrator};
pub use slot::{NarrationSlot, Utterance, Voice};
pub use sound::{Muted, SoundCue, SoundSink, TerminalBell};

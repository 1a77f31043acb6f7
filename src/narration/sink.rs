//! Narration sinks
//!
//! Narration is best effort: sinks never report failure back to the
//! session, they log and carry on.

use super::slot::{Utterance, Voice};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Placeholder replaced by the configured voice name in command arguments
pub const VOICE_PLACEHOLDER: &str = "{voice}";

/// Interval between exit checks while waiting for the last utterance
const FINISH_POLL: Duration = Duration::from_millis(20);

pub trait Narrator {
    /// Speak `utterance`, cutting off anything still being spoken
    fn speak(&mut self, utterance: &Utterance);

    /// Stop the in-flight utterance, if any
    fn cancel(&mut self);

    /// Let the in-flight utterance play out, for at most `timeout`.
    /// Returns false if it had to be cut off.
    fn finish(&mut self, timeout: Duration) -> bool;
}

/// Discards every request (narration disabled or no TTS available)
#[derive(Debug, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn speak(&mut self, _utterance: &Utterance) {}

    fn cancel(&mut self) {}

    fn finish(&mut self, _timeout: Duration) -> bool {
        true
    }
}

/// Runs an external text-to-speech program, one process per utterance
///
/// The utterance text is passed as the last argument. Any argument equal
/// to `{voice}` (or containing it) gets the configured voice name.
#[derive(Debug)]
pub struct CommandNarrator {
    program: String,
    args: Vec<String>,
    male_voice: String,
    female_voice: String,
    child: Option<Child>,
}

impl CommandNarrator {
    /// `command` is the program followed by its arguments; `None` if empty
    pub fn new(command: &[String], male_voice: &str, female_voice: &str) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(CommandNarrator {
            program: program.clone(),
            args: args.to_vec(),
            male_voice: male_voice.to_string(),
            female_voice: female_voice.to_string(),
            child: None,
        })
    }

    fn voice_name(&self, voice: Voice) -> &str {
        match voice {
            Voice::Male => &self.male_voice,
            Voice::Female => &self.female_voice,
        }
    }

    /// Full argument list for one utterance
    pub fn arguments(&self, utterance: &Utterance) -> Vec<String> {
        let voice = self.voice_name(utterance.voice);
        self.args
            .iter()
            .map(|arg| arg.replace(VOICE_PLACEHOLDER, voice))
            .chain(std::iter::once(utterance.text()))
            .collect()
    }
}

impl Narrator for CommandNarrator {
    fn speak(&mut self, utterance: &Utterance) {
        self.cancel();

        let text = utterance.text();
        if text.is_empty() {
            return;
        }

        let spawned = Command::new(&self.program)
            .args(self.arguments(utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => self.child = Some(child),
            Err(e) => log::warn!("narrator {:?} failed to start: {}", self.program, e),
        }
    }

    fn cancel(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };

        match child.try_wait() {
            Ok(Some(_)) => {}
            Ok(None) => {
                if let Err(e) = child.kill() {
                    log::debug!("failed to stop narrator: {}", e);
                }
                let _ = child.wait();
            }
            Err(e) => log::debug!("failed to poll narrator: {}", e),
        }
    }

    fn finish(&mut self, timeout: Duration) -> bool {
        let Some(mut child) = self.child.take() else {
            return true;
        };

        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    log::debug!("narrator finished: {}", status);
                    return true;
                }
                Ok(None) if Instant::now() < deadline => thread::sleep(FINISH_POLL),
                Ok(None) => {
                    log::debug!("narrator still speaking after {:?}, stopping it", timeout);
                    self.child = Some(child);
                    self.cancel();
                    return false;
                }
                Err(e) => {
                    log::debug!("failed to poll narrator: {}", e);
                    return false;
                }
            }
        }
    }
}

impl Drop for CommandNarrator {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_command_has_no_narrator() {
        assert!(CommandNarrator::new(&[], "m", "f").is_none());
    }

    #[test]
    fn test_voice_placeholder_substitution() {
        let narrator =
            CommandNarrator::new(&command(&["espeak-ng", "-v", "{voice}"]), "fr+m3", "fr+f2")
                .unwrap();

        let male = Utterance::new(vec!["Mot correct!".into()], Voice::Male);
        assert_eq!(narrator.arguments(&male), vec!["-v", "fr+m3", "Mot correct!"]);

        let female = Utterance::new(vec!["a".into()], Voice::Female);
        assert_eq!(narrator.arguments(&female), vec!["-v", "fr+f2", "a"]);
    }

    #[test]
    fn test_missing_program_is_swallowed() {
        let mut narrator =
            CommandNarrator::new(&command(&["/nonexistent/tts-program"]), "m", "f").unwrap();
        narrator.speak(&Utterance::new(vec!["bonjour".into()], Voice::Male));
        narrator.cancel();
        assert!(narrator.finish(Duration::from_millis(10)));
    }

    #[cfg(unix)]
    #[test]
    fn test_finish_waits_for_last_utterance() {
        // `sh -c script tts <text>`: the utterance lands in $1
        let mut narrator = CommandNarrator::new(
            &command(&["sh", "-c", "sleep 0.2", "tts"]),
            "m",
            "f",
        )
        .unwrap();
        let start = Instant::now();
        narrator.speak(&Utterance::new(vec!["Vous avez terminé la leçon!".into()], Voice::Male));

        assert!(narrator.finish(Duration::from_secs(10)));
        assert!(start.elapsed() >= Duration::from_millis(200));
        assert!(narrator.child.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_finish_stops_after_timeout() {
        let mut narrator =
            CommandNarrator::new(&command(&["sh", "-c", "sleep 10", "tts"]), "m", "f").unwrap();
        let start = Instant::now();
        narrator.speak(&Utterance::new(vec!["a".into()], Voice::Male));

        assert!(!narrator.finish(Duration::from_millis(50)));
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(narrator.child.is_none());
    }

    #[test]
    fn test_silent_narrator_finishes_immediately() {
        assert!(SilentNarrator.finish(Duration::ZERO));
    }
}

//! Settings file
//!
//! Optional JSON file; every field has a default, so a partial file (or no
//! file) is fine. Command-line flags are applied on top in `main`.

use crate::error::{Result, TutorError};
use crate::narration::Voice;
use crate::session::{ResultsFormat, RunnerOptions};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    pub voice: Voice,
    pub narration_enabled: bool,
    /// TTS program and arguments, e.g. `["espeak-ng", "-v", "{voice}"]`
    pub narrator_command: Vec<String>,
    pub male_voice: String,
    pub female_voice: String,
    /// Passes required over each sentence before moving on
    pub repeat_threshold: u32,
    pub sounds: bool,
    pub results_dir: PathBuf,
    pub results_format: ResultsFormat,
}

impl Default for TutorConfig {
    fn default() -> Self {
        TutorConfig {
            voice: Voice::Male,
            narration_enabled: true,
            narrator_command: Vec::new(),
            male_voice: "fr+m3".to_string(),
            female_voice: "fr+f2".to_string(),
            repeat_threshold: 1,
            sounds: true,
            results_dir: PathBuf::from("."),
            results_format: ResultsFormat::Text,
        }
    }
}

impl TutorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| TutorError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| TutorError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::load(path) {
            Ok(config) => {
                log::debug!("config loaded from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{} (using defaults)", e);
                Self::default()
            }
        }
    }

    pub fn runner_options(&self) -> RunnerOptions {
        RunnerOptions {
            voice: self.voice,
            narration_enabled: self.narration_enabled,
            repeat_threshold: self.repeat_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: TutorConfig =
            serde_json::from_str(r#"{ "voice": "female", "repeat_threshold": 3 }"#).unwrap();

        assert_eq!(config.voice, Voice::Female);
        assert_eq!(config.repeat_threshold, 3);
        assert!(config.narration_enabled);
        assert_eq!(config.male_voice, "fr+m3");
        assert_eq!(config.results_format, ResultsFormat::Text);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "narrator_command": ["say", "-v", "{{voice}}"], "results_format": "json" }}"#
        )
        .unwrap();

        let config = TutorConfig::load(file.path()).unwrap();
        assert_eq!(config.narrator_command, vec!["say", "-v", "{voice}"]);
        assert_eq!(config.results_format, ResultsFormat::Json);
    }

    #[test]
    fn test_broken_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            TutorConfig::load(file.path()),
            Err(TutorError::Parse { .. })
        ));
        assert_eq!(
            TutorConfig::load_or_default(Some(file.path())),
            TutorConfig::default()
        );
        assert_eq!(TutorConfig::load_or_default(None), TutorConfig::default());
    }

    #[test]
    fn test_runner_options() {
        let config = TutorConfig {
            narration_enabled: false,
            repeat_threshold: 2,
            ..TutorConfig::default()
        };
        let options = config.runner_options();
        assert!(!options.narration_enabled);
        assert_eq!(options.repeat_threshold, 2);
    }
}

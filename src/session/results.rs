//! End-of-lesson results
//!
//! A summary is built once the session has ended and written to a file in
//! the results directory, as plain text or JSON.

use super::errors::ErrorDetector;
use super::state::SessionState;
use crate::error::{Result, TutorError};
use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Player name used in the file name when none was given
const DEFAULT_PLAYER: &str = "typer";

/// Confusion pairs kept in the summary
const TOP_CONFUSIONS: usize = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultsFormat {
    #[default]
    Text,
    Json,
}

impl ResultsFormat {
    fn extension(&self) -> &'static str {
        match self {
            ResultsFormat::Text => "txt",
            ResultsFormat::Json => "json",
        }
    }
}

/// `typed` was entered `count` times where `expected` was due
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Confusion {
    pub expected: char,
    pub typed: char,
    pub count: u32,
}

impl fmt::Display for Confusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{} ×{}", self.expected, self.typed, self.count)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSummary {
    pub player: String,
    pub errors: u32,
    pub keystrokes: u32,
    /// Percentage rounded to two decimals
    pub accuracy: f64,
    /// Whole seconds, rounded down
    pub elapsed_secs: u64,
    pub ended_at: Option<DateTime<Local>>,
    pub problematic_chars: Vec<char>,
    /// Most frequent confusions first
    pub confusions: Vec<Confusion>,
}

impl SessionSummary {
    pub fn new(player: &str, state: &SessionState, detector: &ErrorDetector) -> Self {
        let elapsed = state.elapsed.unwrap_or_default();
        SessionSummary {
            player: player.trim().to_string(),
            errors: state.errors(),
            keystrokes: state.keystrokes(),
            accuracy: (state.tally.percent() * 100.0).round() / 100.0,
            elapsed_secs: elapsed.as_secs(),
            ended_at: state.ended_wall,
            problematic_chars: detector.problematic_chars(),
            confusions: detector
                .top_error_pairs(TOP_CONFUSIONS)
                .into_iter()
                .map(|((expected, typed), count)| Confusion {
                    expected,
                    typed,
                    count,
                })
                .collect(),
        }
    }

    pub fn to_text(&self) -> String {
        format!(
            "Résultats:\nNom: {}\nErreurs: {}\nPrécision: {:.2}%\nTemps: {} secondes",
            self.player, self.errors, self.accuracy, self.elapsed_secs
        )
    }

    /// `résultats_<player>.<ext>`, with path-unsafe characters replaced
    pub fn file_name(&self, format: ResultsFormat) -> String {
        let player: String = self
            .player
            .chars()
            .map(|c| {
                if c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
                    '_'
                } else {
                    c
                }
            })
            .collect();
        let player = if player.is_empty() {
            DEFAULT_PLAYER
        } else {
            player.as_str()
        };
        format!("résultats_{}.{}", player, format.extension())
    }

    pub fn render(&self, format: ResultsFormat) -> Result<String> {
        match format {
            ResultsFormat::Text => Ok(self.to_text()),
            ResultsFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Write the summary into `dir`, creating it if needed
    pub fn export(&self, dir: &Path, format: ResultsFormat) -> Result<PathBuf> {
        let path = dir.join(self.file_name(format));
        let export_err = |source: std::io::Error| TutorError::Export {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(dir).map_err(export_err)?;
        let content = self.render(format)?;
        fs::write(&path, content).map_err(export_err)?;

        log::info!("results written to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn summary(player: &str) -> SessionSummary {
        let mut state = SessionState::new();
        for hit in [true, true, true, false] {
            state.tally.record(hit);
        }
        state.elapsed = Some(Duration::from_millis(12_900));
        let mut detector = ErrorDetector::new();
        detector.record_error('o', 'p');
        SessionSummary::new(player, &state, &detector)
    }

    #[test]
    fn test_confusions_most_frequent_first() {
        let mut detector = ErrorDetector::new();
        for _ in 0..3 {
            detector.record_error('o', 'p');
        }
        detector.record_error('s', 'd');
        let summary = SessionSummary::new("Ana", &SessionState::new(), &detector);

        let shown: Vec<String> = summary.confusions.iter().map(|c| c.to_string()).collect();
        assert_eq!(shown, vec!["o→p ×3", "s→d ×1"]);
        assert_eq!(summary.problematic_chars, vec!['o']);
    }

    #[test]
    fn test_text_layout() {
        assert_eq!(
            summary("Ana").to_text(),
            "Résultats:\nNom: Ana\nErreurs: 1\nPrécision: 75.00%\nTemps: 12 secondes"
        );
    }

    #[test]
    fn test_file_names() {
        assert_eq!(summary("").file_name(ResultsFormat::Text), "résultats_typer.txt");
        assert_eq!(summary("  Zoé ").file_name(ResultsFormat::Json), "résultats_Zoé.json");
        assert_eq!(summary("a/b").file_name(ResultsFormat::Text), "résultats_a_b.txt");
    }

    #[test]
    fn test_export_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = summary("Ana")
            .export(&dir.path().join("out"), ResultsFormat::Text)
            .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Résultats:\nNom: Ana"));
        assert!(path.ends_with("résultats_Ana.txt"));
    }

    #[test]
    fn test_export_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = summary("Ana").export(dir.path(), ResultsFormat::Json).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["errors"], 1);
        assert_eq!(value["keystrokes"], 4);
        assert_eq!(value["accuracy"], 75.0);
        assert_eq!(value["elapsed_secs"], 12);
        assert_eq!(value["confusions"][0]["expected"], "o");
        assert_eq!(value["confusions"][0]["count"], 1);
    }
}

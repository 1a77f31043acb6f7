//! Application error type
//!
//! Typing mismatches are not errors; they are counted by the session.
//! This enum only covers the I/O and content failures around it.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TutorError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid lesson content: {0}")]
    Content(String),

    #[error("level {requested} does not exist (lesson has {available})")]
    NoSuchLevel { requested: usize, available: usize },

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("failed to write results to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode results: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TutorError>;

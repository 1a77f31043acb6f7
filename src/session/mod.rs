//! Session Management: lesson progression, accuracy metrics, and results
//!
//! # Components
//! - `runner.rs`: LessonRunner state machine driven by keystrokes
//! - `state.rs`: SessionState (phase, position, partial input, timing)
//! - `accuracy.rs`: Keystroke/error counters and the accuracy percentage
//! - `errors.rs`: Confusion-pair detection for repeated mistakes
//! - `results.rs`: End-of-lesson summary and export

pub mod accuracy;
pub mod errors;
pub mod results;
pub mod runner;
pub mod state;

pub use accuracy::AccuracyTracker;
pub use errors::ErrorDetector;
pub use results::{Confusion, ResultsFormat, SessionSummary};
pub use runner::{Feedback, Key, LessonRunner, RunnerOptions, Transition};
pub use state::{Phase, Position, SessionState};

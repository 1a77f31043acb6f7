//! Lesson content model and loading
//!
//! # Components
//! - `content.rs`: Lesson → Level → Exercise → Sentence, JSON loading, validation

pub mod content;

pub use content::{ContentWarning, Exercise, ExerciseKind, Lesson, Level};

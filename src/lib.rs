//! Narrated typing lessons
//!
//! Lessons are nested levels → exercises → sentences → words. The user
//! types each word character by character and submits it with space; the
//! [`session::LessonRunner`] checks every keystroke, moves through the
//! content, counts errors and queues spoken feedback.

pub mod cli;
pub mod config;
pub mod error;
pub mod lesson;
pub mod logging;
pub mod narration;
pub mod session;

pub use error::{Result, TutorError};

//! CLI Interface: User input and terminal rendering
//!
//! # Components
//! - `input.rs`: Keystroke capture and action mapping using crossterm
//! - `display.rs`: Terminal rendering and UI

pub mod display;
pub mod input;

pub use display::{print_summary, Display, ElapsedClock};
pub use input::{Action, InputHandler};

//! Logger setup
//!
//! `RUST_LOG` wins when set. While the lesson screen is up the terminal is
//! in raw mode, so logs should go to a file (`--log-file`) rather than
//! stderr when anything more verbose than warnings is wanted.

use crate::error::{Result, TutorError};
use env_logger::{Builder, Env, Target};
use std::fs::File;
use std::path::Path;

pub fn init(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if debug { "debug" } else { "warn" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));

    if let Some(path) = log_file {
        let file = File::create(path).map_err(|source| TutorError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
    Ok(())
}

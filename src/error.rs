//! Error types for persistence and input parsing.
//!
//! The color model itself never fails: out-of-range values are clamped.
//! Errors only arise at the edges, when reading user text or touching disk.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or saving the last-used color.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Saved color was written by a newer version
    #[error("Saved color version {file_version} is newer than supported version {supported_version}")]
    VersionTooNew {
        /// Version found in the file
        file_version: u32,
        /// Highest version this build reads
        supported_version: u32,
    },

    /// No platform directory to store the color in
    #[error("Could not determine a storage location")]
    NoStorageLocation,

    /// Path exists but is not a regular file
    #[error("Not a file: {path:?}")]
    NotAFile {
        /// The offending path
        path: PathBuf,
    },
}

/// Errors that can occur when parsing user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Nothing was entered
    #[error("Empty input")]
    Empty,

    /// Text field content is not a finite number
    #[error("Not a number: '{0}'")]
    NotANumber(String),

    /// Unknown field name
    #[error("Unknown field '{0}' (expected 1, 2, 3, alpha or a channel name)")]
    UnknownField(String),

    /// Unknown mode name
    #[error("Unknown mode '{0}' (expected rgb or hsb)")]
    UnknownMode(String),

    /// Unknown command word
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    /// Command is missing an argument
    #[error("'{command}' needs {expected}")]
    MissingArgument {
        /// Command that was entered
        command: String,
        /// What was expected
        expected: &'static str,
    },
}

impl InputError {
    /// Create a missing argument error.
    pub fn missing_argument(command: impl Into<String>, expected: &'static str) -> Self {
        Self::MissingArgument {
            command: command.into(),
            expected,
        }
    }
}

//! Error types for the typosuggest library.
//!
//! Typo resolution itself never fails: an invocation that cannot be turned into
//! a suggestion simply yields `None`. The errors here cover the surfaces around
//! the engine: building or loading a command hierarchy, reading configuration,
//! and the CLI's file handling.
//!
//! # Examples
//!
//! ```
//! use typosuggest::error::{TypoError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TypoError::invalid_config("cache capacity must be a number"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for typosuggest operations.
#[derive(Error, Debug)]
pub enum TypoError {
    /// I/O errors (reading hierarchy or config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Command hierarchy construction errors (duplicate or empty names)
    #[error("Hierarchy error: {0}")]
    Hierarchy(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with TypoError.
pub type Result<T> = std::result::Result<T, TypoError>;

impl TypoError {
    /// Create a new hierarchy error.
    pub fn hierarchy<S: Into<String>>(msg: S) -> Self {
        TypoError::Hierarchy(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        TypoError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TypoError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        TypoError::Other(format!("Not found: {}", msg.into()))
    }
}

//! Error types for Composer operations.
//!
//! Parsing never fails, so [`ComposerError`] only covers the surrounding
//! work: reading input, loading configuration, and rendering output.

use std::io;

use thiserror::Error;

/// The main error type for Composer operations.
#[derive(Debug, Error)]
pub enum ComposerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl From<crate::export::Error> for ComposerError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(error.to_string())
    }
}

//! Export functionality for Composer documents.
//!
//! This module provides the [`Exporter`] trait that turns a parsed document
//! tree into text, and the [`ExportFormat`] selector used by configuration
//! and the command line.
//!
//! # Available Backends
//!
//! - [`tree`] — one line per node, indented by depth
//! - [`outline`] — headings and block-level constructs only

pub mod outline;
pub mod tree;

use std::{fmt, str::FromStr};

use serde::Deserialize;

use composer_core::node::Node;

pub use outline::OutlineExporter;
pub use tree::TreeExporter;

/// Abstraction for document export backends.
pub trait Exporter {
    /// Renders the tree rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the tree cannot be converted to the
    /// target format.
    fn export(&self, root: &Node) -> Result<String, Error>;
}

/// Output formats understood by [`Exporter`] backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Tree,
    Outline,
}

impl ExportFormat {
    /// Builds the exporter for this format.
    pub fn exporter(self, indent: &str) -> Box<dyn Exporter> {
        match self {
            Self::Tree => Box::new(TreeExporter::new(indent)),
            Self::Outline => Box::new(OutlineExporter::new(indent)),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tree" => Ok(Self::Tree),
            "outline" => Ok(Self::Outline),
            other => Err(format!("unknown export format `{other}`, expected `tree` or `outline`")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree => write!(f, "tree"),
            Self::Outline => write!(f, "outline"),
        }
    }
}

/// Errors that can occur during export.
///
/// Converted into [`ComposerError::Export`](crate::ComposerError::Export) at
/// the crate boundary.
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Self::Render(err.to_string())
    }
}

//! Composer - a lightweight markup language for rich text documents.
//!
//! Parsing turns Composer source into a typed document tree; exporters turn
//! that tree into text. Parsing never fails: malformed markup degrades to
//! plain text.

pub mod config;
pub mod export;

mod error;

pub use composer_core::{block, color, element, node};
pub use composer_parser::{Clock, MacroContext};

pub use error::ComposerError;

use log::{debug, info, trace};

use config::AppConfig;
use node::Node;

/// Builder for parsing and rendering Composer documents.
///
/// # Examples
///
/// ```
/// use composer::{DocumentBuilder, config::AppConfig, element::ElementType};
///
/// let builder = DocumentBuilder::new(AppConfig::default());
///
/// let root = builder.parse("#1 header");
/// assert_eq!(root.children()[0].kind(), ElementType::H1);
///
/// let output = builder.render(&root).expect("Failed to render");
/// assert!(output.starts_with("ROOT"));
/// ```
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    config: AppConfig,
}

impl DocumentBuilder {
    /// Create a new document builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source text into a document tree.
    ///
    /// Reads the configured clock once; every macro in the document resolves
    /// against that reading.
    pub fn parse(&self, source: &str) -> Node {
        let clock = self.config.parser().clock();
        info!(clock:?; "Parsing document");

        let context = MacroContext::capture(clock);
        self.parse_with(source, &context)
    }

    /// Parse source text against an explicit macro context.
    pub fn parse_with(&self, source: &str, context: &MacroContext) -> Node {
        let root = composer_parser::parse_with(source, context);

        debug!(blocks = root.children().len(); "Document parsed successfully");
        trace!(root:?; "Parsed document");
        root
    }

    /// Render a document tree with the configured exporter.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::Export`] if the exporter fails.
    pub fn render(&self, root: &Node) -> Result<String, ComposerError> {
        let export = self.config.export();
        info!(format:% = export.format(); "Rendering document");

        let exporter = export.format().exporter(export.indent());
        let output = exporter.export(root)?;

        debug!(bytes = output.len(); "Document rendered");
        Ok(output)
    }
}

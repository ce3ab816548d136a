//! Configuration types for Composer parsing and export.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! TOML files. Every field is optional; missing sections use their defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining parser and export settings.
//! - [`ParserConfig`] - Selects the [`Clock`] that date-time macros read.
//! - [`ExportConfig`] - Selects the [`ExportFormat`] and its indentation.
//!
//! # Example
//!
//! ```
//! # use composer::{Clock, config::AppConfig, export::ExportFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.parser().clock(), Clock::Local);
//! assert_eq!(config.export().format(), ExportFormat::Tree);
//! ```

use serde::Deserialize;

use composer_parser::Clock;

use crate::export::ExportFormat;

/// Indentation used by exporters when none is configured.
pub const DEFAULT_INDENT: &str = "|    ";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(parser: ParserConfig, export: ExportConfig) -> Self {
        Self { parser, export }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Returns this configuration with the export format replaced.
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.export.format = format;
        self
    }
}

/// Parser settings.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ParserConfig {
    /// Clock read once per parse for `%pattern%` and `$name` macros.
    #[serde(default)]
    clock: Clock,
}

impl ParserConfig {
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }
}

/// Export settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    format: ExportFormat,

    /// Prefix repeated once per nesting level.
    #[serde(default = "default_indent")]
    indent: String,
}

impl ExportConfig {
    pub fn new(format: ExportFormat, indent: impl Into<String>) -> Self {
        Self {
            format,
            indent: indent.into(),
        }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new(ExportFormat::default(), DEFAULT_INDENT)
    }
}

fn default_indent() -> String {
    DEFAULT_INDENT.to_string()
}

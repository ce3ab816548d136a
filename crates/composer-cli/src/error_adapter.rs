//! Error adapter for converting ComposerError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use composer::ComposerError;

/// Adapter rendering a [`ComposerError`] through miette.
///
/// Parsing never fails, so there is no source snippet to point at; the
/// adapter only adds an error code and, for configuration errors, a hint.
pub struct ErrorAdapter<'a>(pub &'a ComposerError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ComposerError::Io(_) => "composer::io",
            ComposerError::Config(_) => "composer::config",
            ComposerError::Export(_) => "composer::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            ComposerError::Config(_) => Some(Box::new(
                "valid keys are [parser] clock = \"local\" | \"utc\" and [export] format = \"tree\" | \"outline\", indent",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Renders an error as a miette report.
pub fn render_report(err: &ComposerError) -> String {
    let reporter = miette::GraphicalReportHandler::new();
    let mut writer = String::new();
    if reporter
        .render_report(&mut writer, &ErrorAdapter(err))
        .is_err()
    {
        return err.to_string();
    }
    writer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let io = ComposerError::Io(std::io::Error::other("disk"));
        let config = ComposerError::Config("bad".to_string());
        let export = ComposerError::Export("broken".to_string());

        assert_eq!(ErrorAdapter(&io).code().unwrap().to_string(), "composer::io");
        assert_eq!(
            ErrorAdapter(&config).code().unwrap().to_string(),
            "composer::config"
        );
        assert_eq!(
            ErrorAdapter(&export).code().unwrap().to_string(),
            "composer::export"
        );
    }

    #[test]
    fn test_help_only_for_config() {
        let config = ComposerError::Config("bad".to_string());
        let export = ComposerError::Export("broken".to_string());

        assert!(ErrorAdapter(&config).help().is_some());
        assert!(ErrorAdapter(&export).help().is_none());
    }

    #[test]
    fn test_render_report_contains_message() {
        let err = ComposerError::Config("Missing configuration file: x.toml".to_string());
        let report = render_report(&err);
        assert!(report.contains("Missing configuration file: x.toml"));
        assert!(report.contains("composer::config"));
    }
}

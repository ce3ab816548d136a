//! Composer CLI library
//!
//! This module contains the core CLI logic for the Composer markup tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::ErrorAdapter;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use composer::{ComposerError, DocumentBuilder};

/// Run the Composer CLI application
///
/// This function parses the input file and writes the rendered tree to the
/// output file, or to stdout when no output path is given.
///
/// # Errors
///
/// Returns `ComposerError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), ComposerError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing document"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(format) = args.format {
        app_config = app_config.with_format(format);
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = DocumentBuilder::new(app_config);
    let root = builder.parse(&source);
    let output = builder.render(&root)?;

    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            info!(output_file = path; "Document exported successfully");
        }
        None => io::stdout().lock().write_all(output.as_bytes())?,
    }

    Ok(())
}

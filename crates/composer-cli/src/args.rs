//! Command-line argument definitions for the Composer CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the export format, and logging verbosity.

use clap::Parser;

use composer::export::ExportFormat;

/// Command-line arguments for the Composer markup tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input Composer file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Export format (tree, outline); overrides the configuration file
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use composer_cli::{Args, error_adapter};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Composer");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = composer_cli::run(&args) {
        error!("Failed\n{}", error_adapter::render_report(&err));
        process::exit(1);
    }

    info!("Completed successfully");
}

//! Simblog - offline related-content engine
//!
//! Stores HTML documents in SQLite, embeds them with a hashing-trick
//! vectorizer and ranks related documents by cosine similarity.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::{Cli, OutputFormat};
use simblog_core::error::{ExitCode as SimblogExitCode, SimblogError};
use simblog_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap fails before `Cli.format` exists, so honour a JSON request from argv
            if argv_requests_json() {
                let error = match err.kind() {
                    clap::error::ErrorKind::DisplayHelp
                    | clap::error::ErrorKind::DisplayVersion => err.exit(),
                    clap::error::ErrorKind::ValueValidation
                    | clap::error::ErrorKind::InvalidValue
                    | clap::error::ErrorKind::InvalidSubcommand
                    | clap::error::ErrorKind::UnknownArgument
                    | clap::error::ErrorKind::ArgumentConflict
                    | clap::error::ErrorKind::MissingRequiredArgument
                    | clap::error::ErrorKind::MissingSubcommand
                    | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                        SimblogError::UsageError(err.to_string())
                    }
                    _ => SimblogError::Other(err.to_string()),
                };

                eprintln!("{}", error.to_json());
                return ExitCode::from(error.exit_code() as u8);
            }

            err.exit();
        }
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    let Err(e) = commands::dispatch::run(&cli, start) else {
        return ExitCode::from(SimblogExitCode::Success as u8);
    };

    match cli.format {
        OutputFormat::Json => eprintln!("{}", e.to_json()),
        OutputFormat::Human if !cli.quiet => eprintln!("error: {}", e),
        OutputFormat::Human => {}
    }
    ExitCode::from(e.exit_code() as u8)
}

/// Whether argv asks for `--format json`, read without clap
fn argv_requests_json() -> bool {
    let args: Vec<String> = env::args().skip(1).collect();
    let requested = args.iter().enumerate().find_map(|(i, arg)| match arg.as_str() {
        "--format" => args.get(i + 1).map(String::as_str),
        other => other.strip_prefix("--format="),
    });
    requested.and_then(|f| f.parse::<OutputFormat>().ok()) == Some(OutputFormat::Json)
}

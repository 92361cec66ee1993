//! Air: prompt templating front end for hosted generation models.
//!
//! This is the main entry point for the `air` CLI. It parses arguments,
//! sets up logging and the `.env` file, runs the pipeline, and maps errors
//! to exit codes.

mod ai;
mod cli;
mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod fs;
mod logging;
pub mod schema;
pub mod template;

use cli::Cli;
use error::AirError;
use std::process::ExitCode;
use tracing::warn;

fn main() -> ExitCode {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let err = AirError::InvalidArgs(err.render().to_string());
            eprint!("{}", err);
            return ExitCode::from(err.exit_code() as u8);
        }
        Err(err) => {
            // --help and --version
            let _ = err.print();
            return ExitCode::from(exit_codes::SUCCESS as u8);
        }
    };

    logging::init_logging(cli.verbose, cli.quiet);

    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        warn!("failed to load .env file: {}", e);
    }

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

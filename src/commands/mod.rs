//! Command implementation for air.
//!
//! `air` has a single command; [`dispatch`] wires the real dependencies
//! (working directory, process environment, Vertex client, stdout) into the
//! run pipeline.

mod run;

pub use run::{RunContext, RunOptions, run};

use crate::ai::VertexClient;
use crate::cli::Cli;
use crate::error::{AirError, Result};
use crate::template::{PathResolver, env_variables};

/// Run the pipeline for parsed command-line arguments.
pub fn dispatch(cli: Cli) -> Result<()> {
    let options = RunOptions::from(cli);

    let resolver = PathResolver::from_current_dir()?;
    let client = VertexClient::new().map_err(|e| AirError::AiError(e.to_string()))?;
    let env_vars = env_variables();
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    run(
        &options,
        RunContext {
            resolver: &resolver,
            client: &client,
            env_vars: &env_vars,
            stdout: &mut stdout,
        },
    )
}

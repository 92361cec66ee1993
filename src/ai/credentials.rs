//! Project, region, and access token for Vertex AI.
//!
//! Settings come from the environment (a `.env` file is loaded at startup).
//! The bearer token is taken from `GOOGLE_CLOUD_ACCESS_TOKEN` when set;
//! otherwise a token command is run, `gcloud auth print-access-token` unless
//! `AIR_TOKEN_COMMAND` overrides it.

use super::AiError;
use crate::config::types::DEFAULT_LOCATION;
use std::process::Command;
use tracing::debug;

pub const PROJECT_VAR: &str = "GOOGLE_CLOUD_PROJECT";
pub const LOCATION_VAR: &str = "GOOGLE_CLOUD_LOCATION";
pub const ACCESS_TOKEN_VAR: &str = "GOOGLE_CLOUD_ACCESS_TOKEN";
pub const TOKEN_COMMAND_VAR: &str = "AIR_TOKEN_COMMAND";
pub const DEFAULT_TOKEN_COMMAND: &str = "gcloud auth print-access-token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexSettings {
    pub project: String,
    pub location: String,
    pub access_token: String,
}

impl VertexSettings {
    /// Resolve settings from the process environment.
    pub fn from_env() -> Result<Self, AiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let project = get(PROJECT_VAR).ok_or_else(|| {
            AiError::Credentials(format!("{} environment variable is not set", PROJECT_VAR))
        })?;
        let location = get(LOCATION_VAR).unwrap_or_else(|| DEFAULT_LOCATION.to_string());

        let access_token = match get(ACCESS_TOKEN_VAR) {
            Some(token) => token.trim().to_string(),
            None => {
                let command =
                    get(TOKEN_COMMAND_VAR).unwrap_or_else(|| DEFAULT_TOKEN_COMMAND.to_string());
                run_token_command(&command)?
            }
        };

        Ok(Self {
            project,
            location,
            access_token,
        })
    }
}

/// Run the token command without a shell and return its trimmed stdout.
fn run_token_command(command: &str) -> Result<String, AiError> {
    let args = shell_words::split(command).map_err(|e| {
        AiError::Credentials(format!("failed to parse token command '{}': {}", command, e))
    })?;

    let Some((program, rest)) = args.split_first() else {
        return Err(AiError::Credentials("token command is empty".to_string()));
    };

    debug!(program = %program, "fetching access token");

    let output = Command::new(program).args(rest).output().map_err(|e| {
        AiError::Credentials(format!(
            "failed to execute token command '{}': {}\n\
             Fix: install the Google Cloud CLI or set {}.",
            program, e, ACCESS_TOKEN_VAR
        ))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(AiError::Credentials(format!(
            "token command '{}' failed (exit code {}): {}",
            program,
            output.status.code().unwrap_or(-1),
            stderr
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(AiError::Credentials(format!(
            "token command '{}' printed no token",
            program
        )));
    }

    Ok(token)
}

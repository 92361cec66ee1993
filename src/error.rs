//! Error types for the air CLI.
//!
//! Uses thiserror for derive macros. Template-engine failures keep their own
//! structured type ([`TemplateError`]) and are wrapped here so that each kind
//! still maps to its own exit code.

use crate::exit_codes;
use crate::template::TemplateError;
use thiserror::Error;

/// Main error type for air operations.
#[derive(Error, Debug)]
pub enum AirError {
    /// Bad command-line arguments.
    #[error("{0}")]
    InvalidArgs(String),

    /// A file could not be read or written.
    #[error("{0}")]
    FileError(String),

    /// Include expansion or placeholder substitution failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Frontmatter could not be parsed or is invalid.
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// The generation API call failed.
    #[error("generation failed: {0}")]
    AiError(String),
}

impl AirError {
    /// Returns the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AirError::InvalidArgs(_) => exit_codes::INVALID_ARGS,
            AirError::FileError(_) => exit_codes::FILE_ERROR,
            AirError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            AirError::AiError(_) => exit_codes::AI_ERROR,
            AirError::Template(err) => match err {
                TemplateError::PathResolution { .. } => exit_codes::PATH_RESOLUTION_ERROR,
                TemplateError::PathEscape { .. } => exit_codes::PATH_ESCAPE_ERROR,
                TemplateError::CircularInclude { .. } => exit_codes::CIRCULAR_INCLUDE_ERROR,
                TemplateError::FileRead { .. } => exit_codes::FILE_ERROR,
                TemplateError::MissingVariables { .. } => exit_codes::MISSING_VARIABLES_ERROR,
            },
        }
    }
}

/// Result type alias for air operations.
pub type Result<T> = std::result::Result<T, AirError>;

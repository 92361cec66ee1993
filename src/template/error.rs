//! Error type for include expansion and placeholder substitution.

use std::path::PathBuf;
use thiserror::Error;

/// Failure kinds of the template engine.
///
/// Every variant carries the include reference or variable names it is
/// about, so callers can print a one-line message without extra context.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The include reference could not be turned into a path at all.
    #[error("cannot resolve include path '{reference}': {source}")]
    PathResolution {
        reference: String,
        source: std::io::Error,
    },

    /// The resolved path lies outside the project root.
    #[error("include path '{reference}' is outside the project directory")]
    PathEscape { reference: String, path: PathBuf },

    /// The resolved path is already being expanded further up the chain.
    #[error("circular include detected: '{reference}' ({})", .path.display())]
    CircularInclude { reference: String, path: PathBuf },

    /// The included file could not be read.
    #[error("failed to read included file '{reference}' ({}): {source}", .path.display())]
    FileRead {
        reference: String,
        path: PathBuf,
        source: std::io::Error,
    },

    /// Placeholders with neither a value nor a default. Names are sorted and unique.
    #[error("undefined variables without defaults: {}", .names.join(", "))]
    MissingVariables { names: Vec<String> },
}

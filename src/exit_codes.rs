//! Exit code constants for the air CLI.
//!
//! - 0: Success
//! - 1: Invalid arguments (bad flags, malformed `--var`)
//! - 2: File error (template or include unreadable, output unwritable)
//! - 3: Configuration error (frontmatter, YAML, validation, response schema)
//! - 4: Generation API failure
//! - 5: Include path could not be resolved
//! - 6: Include path escapes the project root
//! - 7: Circular include
//! - 8: Undefined variables without defaults

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Invalid command-line arguments.
pub const INVALID_ARGS: i32 = 1;

/// A template, included file, or output file could not be read or written.
pub const FILE_ERROR: i32 = 2;

/// Frontmatter could not be parsed or failed validation.
pub const CONFIG_ERROR: i32 = 3;

/// The generation request failed or returned an unusable response.
pub const AI_ERROR: i32 = 4;

/// An include reference could not be turned into a path.
pub const PATH_RESOLUTION_ERROR: i32 = 5;

/// An include reference resolved outside the project root.
pub const PATH_ESCAPE_ERROR: i32 = 6;

/// An include chain refers back to one of its ancestors.
pub const CIRCULAR_INCLUDE_ERROR: i32 = 7;

/// One or more placeholders have neither a value nor a default.
pub const MISSING_VARIABLES_ERROR: i32 = 8;

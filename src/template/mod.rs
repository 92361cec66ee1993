//! Template engine: file inclusion and placeholder substitution.
//!
//! This module provides:
//!
//! - **Path**: include reference resolution confined to a project root
//! - **Include**: recursive `{{include "path"}}` expansion with cycle detection
//! - **Placeholder**: `{{name}}` / `{{name|default}}` substitution
//! - **Vars**: variable sources and precedence merging
//!
//! # Template Syntax
//!
//! ```text
//! ---
//! model: gemini-2.0-flash-001
//! ---
//! {{include "partials/persona.md"}}
//!
//! Summarize {{topic}} for a {{audience|general}} audience.
//! ```
//!
//! Includes are expanded first, over the raw file, so included files may
//! contribute frontmatter. Placeholders are substituted in the body only.

mod error;
mod include;
mod path;
mod placeholder;
mod vars;


pub use error::TemplateError;
pub use include::{FsSource, IncludeExpander, IncludeSource, InclusionContext, expand_includes};
pub use path::{PathResolver, resolve_path};
pub use placeholder::{Placeholder, placeholders, substitute};
pub use vars::{env_variables, merge_variables, parse_var, vars};

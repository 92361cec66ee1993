//! Prompt configuration from YAML frontmatter.
//!
//! A template may begin with a `---` delimited YAML block holding generation
//! settings, declared variables, and an optional response schema. Parsing is
//! forward-compatible (unknown keys are ignored), every value is optional,
//! and values are validated before use.

mod frontmatter;
mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use frontmatter::parse_frontmatter;
pub use model::PromptConfig;

//! CLI argument parsing for air.
//!
//! Uses clap derive macros for declarative argument definitions.
//! The pipeline itself lives in the `commands` module.

use crate::template::parse_var;
use clap::Parser;
use std::path::PathBuf;

/// Air: resolve a prompt template and send it to a generation model.
///
/// A template is a markdown file with optional YAML frontmatter:
/// - `{{include "path"}}` pulls in other files, relative to the includer
/// - `{{name}}` and `{{name|default}}` are filled from variables
/// - frontmatter sets the model, sampling, and an optional response schema
#[derive(Parser, Debug)]
#[command(name = "air")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Prompt template file.
    pub template: PathBuf,

    /// Set a template variable (repeatable). Overrides frontmatter and environment.
    #[arg(short = 'v', long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Write the response (or prompt) to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the resolved prompt and skip the generation call.
    #[arg(long)]
    pub show_prompt_only: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Cli::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_template_only() {
        let cli = Cli::try_parse_from(["air", "prompt.md"]).unwrap();
        assert_eq!(cli.template, PathBuf::from("prompt.md"));
        assert!(cli.vars.is_empty());
        assert!(cli.output.is_none());
        assert!(!cli.show_prompt_only);
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn parse_full() {
        let cli = Cli::try_parse_from([
            "air",
            "prompts/review.md",
            "--var",
            "lang=rust",
            "-v",
            "query=a=b",
            "-o",
            "out/result.json",
            "--show-prompt-only",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(cli.template, PathBuf::from("prompts/review.md"));
        assert_eq!(
            cli.vars,
            vec![
                ("lang".to_string(), "rust".to_string()),
                ("query".to_string(), "a=b".to_string()),
            ]
        );
        assert_eq!(cli.output, Some(PathBuf::from("out/result.json")));
        assert!(cli.show_prompt_only);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_empty_var_value() {
        let cli = Cli::try_parse_from(["air", "t.md", "--var", "name="]).unwrap();
        assert_eq!(cli.vars, vec![("name".to_string(), String::new())]);
    }

    #[test]
    fn parse_quiet_short() {
        let cli = Cli::try_parse_from(["air", "t.md", "-q"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn reject_var_without_equals() {
        let err = Cli::try_parse_from(["air", "t.md", "--var", "oops"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn reject_var_with_empty_key() {
        let err = Cli::try_parse_from(["air", "t.md", "-v", "=value"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn reject_duplicate_output() {
        let err = Cli::try_parse_from(["air", "t.md", "-o", "a.txt", "-o", "b.txt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn reject_missing_template() {
        let err = Cli::try_parse_from(["air"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn help_is_not_a_failure() {
        let err = Cli::try_parse_from(["air", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }
}

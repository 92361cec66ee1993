//! The `air` run pipeline.
//!
//! Steps, in order:
//! 1. Read the template file
//! 2. Expand `{{include}}` directives (so included files may carry frontmatter)
//! 3. Split off and validate the frontmatter config
//! 4. Merge variables: environment < frontmatter < `--var`
//! 5. Substitute placeholders in the body
//! 6. Print the prompt, or send it to the generation client
//! 7. Check the response against `responseSchema` (warning only) and format it
//! 8. Write to `--output` or stdout
//!
//! Everything with side effects comes in through [`RunContext`].

use crate::ai::GenerationClient;
use crate::cli::Cli;
use crate::config::{PromptConfig, parse_frontmatter};
use crate::error::{AirError, Result};
use crate::fs::atomic_write_file;
use crate::schema::{format_response, validate_response};
use crate::template::{
    InclusionContext, PathResolver, expand_includes, merge_variables, substitute, vars,
};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What to run, taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub template: PathBuf,
    /// `--var` values; a repeated key keeps the last value.
    pub vars: HashMap<String, String>,
    pub output: Option<PathBuf>,
    pub show_prompt_only: bool,
}

impl From<Cli> for RunOptions {
    fn from(cli: Cli) -> Self {
        Self {
            template: cli.template,
            vars: vars(cli.vars),
            output: cli.output,
            show_prompt_only: cli.show_prompt_only,
        }
    }
}

/// External dependencies of a run.
pub struct RunContext<'a> {
    /// Project root; the template path is relative to it and includes may not leave it.
    pub resolver: &'a PathResolver,
    pub client: &'a dyn GenerationClient,
    /// Lowest-precedence variable source.
    pub env_vars: &'a HashMap<String, String>,
    pub stdout: &'a mut dyn Write,
}

/// Run the pipeline end to end.
pub fn run(options: &RunOptions, ctx: RunContext<'_>) -> Result<()> {
    let (config, prompt) = resolve_prompt(options, ctx.resolver, ctx.env_vars)?;

    if options.show_prompt_only {
        debug!("--show-prompt-only set, skipping generation");
        return emit(&prompt, options.output.as_deref(), ctx.stdout);
    }

    info!(model = %config.model_or_default(), "sending prompt");
    let response = ctx
        .client
        .generate(&config, &prompt)
        .map_err(|e| AirError::AiError(e.to_string()))?;

    let text = match &config.response_schema {
        Some(schema) => {
            if let Err(e) = validate_response(&response.text, schema) {
                warn!("{}", e);
            }
            format_response(&response.text)
        }
        None => response.text,
    };

    emit(&text, options.output.as_deref(), ctx.stdout)
}

/// Resolve the template into its config and final prompt text.
pub fn resolve_prompt(
    options: &RunOptions,
    resolver: &PathResolver,
    env_vars: &HashMap<String, String>,
) -> Result<(PromptConfig, String)> {
    let template_path = resolver.root().join(&options.template);
    let raw = std::fs::read_to_string(&template_path).map_err(|e| {
        AirError::FileError(format!(
            "failed to read template '{}': {}",
            options.template.display(),
            e
        ))
    })?;

    let mut inclusion = InclusionContext::for_template(resolver, &options.template)?;
    let expanded = expand_includes(&raw, &mut inclusion, resolver)?;

    let (config, body) = parse_frontmatter(&expanded)?;

    let variables = merge_variables([env_vars, &config.variables, &options.vars]);
    let prompt = substitute(&body, &variables)?;

    debug!(
        template = %options.template.display(),
        chars = prompt.len(),
        "resolved prompt"
    );

    Ok((config, prompt))
}

fn emit(text: &str, output: Option<&Path>, stdout: &mut dyn Write) -> Result<()> {
    match output {
        Some(path) => {
            let mut content = text.to_string();
            if !content.ends_with('\n') {
                content.push('\n');
            }
            atomic_write_file(path, &content)?;
            info!(path = %path.display(), "wrote output");
            Ok(())
        }
        None => writeln!(stdout, "{}", text)
            .map_err(|e| AirError::FileError(format!("failed to write to stdout: {}", e))),
    }
}

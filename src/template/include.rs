//! Recursive expansion of `{{include "path"}}` directives.
//!
//! Relative references resolve against the directory of the file that
//! contains the directive. Every resolved path must stay inside the project
//! root, and a file may not include one of its own ancestors. The same file
//! may still be included from sibling branches (diamond inclusion).

use super::path::resolve_path;
use super::{PathResolver, TemplateError};
use regex::Regex;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

static INCLUDE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{include\s+"([^"]+)"\}\}"#).expect("Invalid include directive regex")
});

/// Source of included file contents.
pub trait IncludeSource {
    /// Read the file at the canonical `path`.
    fn read(&self, path: &Path) -> io::Result<String>;
}

/// Reads included files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl IncludeSource for FsSource {
    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Traversal state for one top-level expansion.
///
/// `visited` holds exactly the files on the current include chain, and
/// `base_dir` is the directory of the file currently being expanded.
/// Build a fresh context for every top-level template.
#[derive(Debug)]
pub struct InclusionContext {
    visited: HashSet<PathBuf>,
    base_dir: PathBuf,
}

impl InclusionContext {
    /// Context for expanding free-standing text with includes relative to `base_dir`.
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            visited: HashSet::new(),
            base_dir: base_dir.into(),
        }
    }

    /// Context for expanding the contents of `template`.
    ///
    /// The template itself counts as the first ancestor, so a chain that
    /// leads back to it is reported as circular.
    pub fn for_template(resolver: &PathResolver, template: &Path) -> Result<Self, TemplateError> {
        let path = resolve_path(template, resolver.root()).map_err(|source| {
            TemplateError::PathResolution {
                reference: template.display().to_string(),
                source,
            }
        })?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| resolver.root().to_path_buf());

        let mut visited = HashSet::new();
        visited.insert(path);
        Ok(Self { visited, base_dir })
    }

    /// Directory used to resolve the next relative include.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Whether `path` is on the current include chain.
    pub fn is_active(&self, path: &Path) -> bool {
        self.visited.contains(path)
    }

    /// Number of files on the current include chain.
    pub fn depth(&self) -> usize {
        self.visited.len()
    }

    fn enter(&mut self, path: PathBuf) -> PathBuf {
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.base_dir.clone());
        self.visited.insert(path);
        std::mem::replace(&mut self.base_dir, dir)
    }

    fn exit(&mut self, path: &Path, previous_base_dir: PathBuf) {
        self.visited.remove(path);
        self.base_dir = previous_base_dir;
    }
}

/// Expands include directives using a resolver and a content source.
pub struct IncludeExpander<'a, S: IncludeSource> {
    resolver: &'a PathResolver,
    source: &'a S,
}

impl<'a, S: IncludeSource> IncludeExpander<'a, S> {
    pub fn new(resolver: &'a PathResolver, source: &'a S) -> Self {
        Self { resolver, source }
    }

    /// Expand every include directive in `text`.
    ///
    /// Directives are processed left to right; each one is replaced by the
    /// fully expanded contents of the referenced file, and scanning resumes
    /// after the directive in `text`. Spliced content is never rescanned at
    /// this level. Any failure aborts the whole expansion.
    pub fn expand(&self, text: &str, ctx: &mut InclusionContext) -> Result<String, TemplateError> {
        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;

        while let Some(caps) = INCLUDE_PATTERN.captures_at(text, cursor) {
            let (Some(directive), Some(reference)) = (caps.get(0), caps.get(1)) else {
                break;
            };

            output.push_str(&text[cursor..directive.start()]);
            output.push_str(&self.include(reference.as_str(), ctx)?);
            cursor = directive.end();
        }

        output.push_str(&text[cursor..]);
        Ok(output)
    }

    fn include(&self, reference: &str, ctx: &mut InclusionContext) -> Result<String, TemplateError> {
        let path = self.resolver.resolve(reference, ctx.base_dir())?;
        self.resolver.check_within_root(reference, &path)?;

        if ctx.is_active(&path) {
            return Err(TemplateError::CircularInclude {
                reference: reference.to_string(),
                path,
            });
        }

        debug!(
            reference,
            path = %path.display(),
            depth = ctx.depth(),
            "expanding include"
        );

        let previous_base_dir = ctx.enter(path.clone());
        let result = self
            .source
            .read(&path)
            .map_err(|source| TemplateError::FileRead {
                reference: reference.to_string(),
                path: path.clone(),
                source,
            })
            .and_then(|content| self.expand(&content, ctx));
        ctx.exit(&path, previous_base_dir);

        result
    }
}

/// Expand include directives in `text`, reading files from disk.
pub fn expand_includes(
    text: &str,
    ctx: &mut InclusionContext,
    resolver: &PathResolver,
) -> Result<String, TemplateError> {
    IncludeExpander::new(resolver, &FsSource).expand(text, ctx)
}

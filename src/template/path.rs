//! Include path resolution and the project-root containment check.
//!
//! Paths are made absolute, `.` and `..` segments are folded lexically, and
//! the longest existing prefix is canonicalized so symlinks are resolved
//! before any containment check runs. The containment check is always
//! performed on that canonical form, never on the raw reference.

use super::TemplateError;
use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolves include references and enforces that they stay under a root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver confined to `root`.
    ///
    /// The root itself is canonicalized so that comparisons with resolved
    /// include paths are symlink-consistent.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, TemplateError> {
        let root = root.as_ref();
        let root = canonicalize(root).map_err(|source| TemplateError::PathResolution {
            reference: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Create a resolver confined to the current working directory.
    pub fn from_current_dir() -> Result<Self, TemplateError> {
        let cwd = std::env::current_dir().map_err(|source| TemplateError::PathResolution {
            reference: ".".to_string(),
            source,
        })?;
        Self::new(cwd)
    }

    /// The canonical project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `reference` against `base_dir` into a canonical absolute path.
    pub fn resolve(&self, reference: &str, base_dir: &Path) -> Result<PathBuf, TemplateError> {
        resolve_path(reference, base_dir).map_err(|source| TemplateError::PathResolution {
            reference: reference.to_string(),
            source,
        })
    }

    /// Fail with [`TemplateError::PathEscape`] if `path` is not under the root.
    ///
    /// `path` must already be canonical (see [`PathResolver::resolve`]).
    pub fn check_within_root(&self, reference: &str, path: &Path) -> Result<(), TemplateError> {
        if path.starts_with(&self.root) {
            Ok(())
        } else {
            Err(TemplateError::PathEscape {
                reference: reference.to_string(),
                path: path.to_path_buf(),
            })
        }
    }
}

/// Resolve `reference` into a canonical absolute path.
///
/// Absolute references are canonicalized directly; relative ones are joined
/// onto `base_dir` first. Missing files are not an error here: the existing
/// part of the path is canonicalized and the rest appended, so a later read
/// reports the missing file instead.
pub fn resolve_path<P: AsRef<Path>>(reference: P, base_dir: &Path) -> io::Result<PathBuf> {
    let reference = reference.as_ref();
    if reference.as_os_str().is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty path"));
    }

    let joined = if reference.is_absolute() {
        reference.to_path_buf()
    } else {
        base_dir.join(reference)
    };

    canonicalize(&joined)
}

fn canonicalize(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    canonicalize_existing_prefix(&normalize_lexically(&absolute))
}

/// Fold `.` and `..` segments without touching the filesystem.
///
/// `..` at the root stays at the root.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Canonicalize the longest existing ancestor of `path` and re-append the
/// components that do not exist yet.
fn canonicalize_existing_prefix(path: &Path) -> io::Result<PathBuf> {
    let mut missing: Vec<OsString> = Vec::new();
    let mut current = path;

    loop {
        match std::fs::canonicalize(current) {
            Ok(mut resolved) => {
                for part in missing.iter().rev() {
                    resolved.push(part);
                }
                return Ok(resolved);
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                match (current.parent(), current.file_name()) {
                    (Some(parent), Some(name)) => {
                        missing.push(name.to_os_string());
                        current = parent;
                    }
                    _ => return Ok(path.to_path_buf()),
                }
            }
            Err(err) => return Err(err),
        }
    }
}

//! Repository and file-scope resolution.

use std::path::{Path, PathBuf};

use crate::error::{Result, SearchError};

/// Which part of the repository a search covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileScope {
    /// Search the whole repository tree
    Repository,
    /// Restrict the search to exactly this path, relative to the repository
    File(String),
}

impl FileScope {
    /// Build a scope from a raw file argument, where an empty string means
    /// the whole repository.
    pub fn from_arg(file: &str) -> Self {
        if file.is_empty() {
            Self::Repository
        } else {
            Self::File(file.to_owned())
        }
    }

    /// The pathspec to hand to the engine, if any.
    pub fn pathspec(&self) -> Option<&str> {
        match self {
            Self::Repository => None,
            Self::File(path) => Some(path.as_str()),
        }
    }
}

/// Check that `repository` is an existing directory and return its canonical
/// form.
///
/// # Errors
/// Returns `InvalidScope` if the path does not exist or is not a directory
pub fn resolve_repository(repository: &Path) -> Result<PathBuf> {
    let canonical = repository.canonicalize().map_err(|err| {
        SearchError::InvalidScope(format!("Invalid repository path {}: {err}", repository.display()))
    })?;

    if !canonical.is_dir() {
        return Err(SearchError::InvalidScope(format!(
            "Repository path is not a directory: {}",
            repository.display()
        )));
    }

    Ok(canonical)
}

/// Validate a file scope against a canonical repository root.
///
/// The scoped path must exist and must stay inside the repository once
/// symlinks and `..` components are resolved.
///
/// # Errors
/// Returns `InvalidScope` if the file is missing or outside the repository
pub fn validate_scope(root: &Path, scope: &FileScope) -> Result<()> {
    let FileScope::File(path) = scope else {
        return Ok(());
    };

    let full_path = root.join(path);
    if !full_path.exists() {
        return Err(SearchError::InvalidScope(format!(
            "File does not exist: {path}"
        )));
    }

    let canonical_path = full_path
        .canonicalize()
        .map_err(|err| SearchError::InvalidScope(format!("Invalid path '{path}': {err}")))?;

    if !canonical_path.starts_with(root) {
        return Err(SearchError::InvalidScope(format!(
            "Path '{path}' is outside the repository"
        )));
    }

    Ok(())
}

//! Request types: the six gateway operations and the search requests they
//! resolve to.

use std::path::{Path, PathBuf};

use crate::scope::FileScope;

/// Declaration keywords that introduce a signal, followed by whitespace.
pub const SIGNAL_DECLARATION_PATTERN: &str = r"(wire|reg|logic|input|output)\s";
/// Module declarations anchored at the start of a line.
pub const MODULE_DECLARATION_PATTERN: &str = "^module";
/// Result returned when an operation fails for any reason other than an
/// empty search.
pub const FAILURE_SENTINEL: &str = "Error Occurred";

/// One gateway operation together with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Lines in `file` matching `pattern`.
    SearchInFile {
        /// Repository root
        repository: PathBuf,
        /// Regex handed to the engine unescaped
        pattern: String,
        /// File relative to the repository root; must not be empty
        file: String,
    },
    /// Rendered directory tree of the repository.
    DirectoryTree {
        /// Repository root
        repository: PathBuf,
    },
    /// Matches with surrounding context lines.
    SearchWithContext {
        /// Repository root
        repository: PathBuf,
        /// Regex handed to the engine unescaped
        pattern: String,
        /// Lines of context before and after each match
        context_lines: u32,
        /// Optional file scope; empty searches the whole repository
        file: String,
    },
    /// Signal declarations (`wire`, `reg`, `logic`, `input`, `output`).
    ListSignals {
        /// Repository root
        repository: PathBuf,
        /// Optional file scope; empty searches the whole repository
        file: String,
    },
    /// Every line mentioning `signal`, with line numbers.
    SignalUsage {
        /// Repository root
        repository: PathBuf,
        /// Signal name or regex
        signal: String,
    },
    /// Lines starting with a module declaration.
    ListModules {
        /// Repository root
        repository: PathBuf,
    },
}

impl Query {
    /// Operation name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SearchInFile { .. } => "search_in_file",
            Self::DirectoryTree { .. } => "directory_tree",
            Self::SearchWithContext { .. } => "search_with_context",
            Self::ListSignals { .. } => "list_signals",
            Self::SignalUsage { .. } => "signal_usage",
            Self::ListModules { .. } => "list_modules",
        }
    }

    /// Repository the query runs against.
    pub fn repository(&self) -> &Path {
        match self {
            Self::SearchInFile { repository, .. }
            | Self::DirectoryTree { repository }
            | Self::SearchWithContext { repository, .. }
            | Self::ListSignals { repository, .. }
            | Self::SignalUsage { repository, .. }
            | Self::ListModules { repository } => repository,
        }
    }

    /// Whether successful output is trimmed of surrounding whitespace.
    pub fn trims_output(&self) -> bool {
        matches!(
            self,
            Self::ListSignals { .. } | Self::SignalUsage { .. } | Self::ListModules { .. }
        )
    }

    /// Message returned when the search ran but found nothing.
    pub fn not_found_message(&self) -> String {
        match self {
            Self::SearchInFile { .. } | Self::DirectoryTree { .. } | Self::SearchWithContext { .. } => {
                FAILURE_SENTINEL.to_owned()
            }
            Self::ListSignals { .. } => "No signals found.".to_owned(),
            Self::SignalUsage { signal, .. } => format!("Signal \"{signal}\" not found."),
            Self::ListModules { .. } => "No modules found.".to_owned(),
        }
    }

    /// The search request this query maps to, or `None` for the directory
    /// tree, which uses the tree renderer instead of the search engine.
    pub fn search_request(&self) -> Option<SearchRequest> {
        let request = match self {
            Self::DirectoryTree { .. } => return None,
            Self::SearchInFile {
                repository,
                pattern,
                file,
            } => SearchRequest::new(repository, pattern).with_scope(FileScope::from_arg(file)),
            Self::SearchWithContext {
                repository,
                pattern,
                context_lines,
                file,
            } => SearchRequest::new(repository, pattern)
                .with_scope(FileScope::from_arg(file))
                .with_context(*context_lines),
            Self::ListSignals { repository, file } => {
                SearchRequest::new(repository, SIGNAL_DECLARATION_PATTERN)
                    .with_scope(FileScope::from_arg(file))
                    .extended()
            }
            Self::SignalUsage { repository, signal } => {
                SearchRequest::new(repository, signal).with_line_numbers()
            }
            Self::ListModules { repository } => {
                SearchRequest::new(repository, MODULE_DECLARATION_PATTERN).extended()
            }
        };
        Some(request)
    }
}

/// A single search against a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Repository root the engine runs in
    pub repository: PathBuf,
    /// Pattern handed to the engine unescaped
    pub pattern: String,
    /// Whole repository or a single path
    pub scope: FileScope,
    /// Lines of context around each match
    pub context_lines: Option<u32>,
    /// Prefix matches with their line numbers
    pub line_numbers: bool,
    /// Use extended regex syntax
    pub extended_regex: bool,
}

impl SearchRequest {
    /// Search the whole repository for `pattern` with basic regex syntax.
    pub fn new(repository: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            pattern: pattern.into(),
            scope: FileScope::Repository,
            context_lines: None,
            line_numbers: false,
            extended_regex: false,
        }
    }

    /// Restrict the search to `scope`.
    #[must_use]
    pub fn with_scope(mut self, scope: FileScope) -> Self {
        self.scope = scope;
        self
    }

    /// Include `lines` lines of context around each match.
    #[must_use]
    pub fn with_context(mut self, lines: u32) -> Self {
        self.context_lines = Some(lines);
        self
    }

    /// Prefix each match with its line number.
    #[must_use]
    pub fn with_line_numbers(mut self) -> Self {
        self.line_numbers = true;
        self
    }

    /// Interpret the pattern as an extended regex.
    #[must_use]
    pub fn extended(mut self) -> Self {
        self.extended_regex = true;
        self
    }
}

//! The search gateway: six operations, one external invocation each, with
//! uniform result and failure normalization.

use std::path::{Path, PathBuf};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::invocation::{ExternalInvocation, InvocationOutput, NO_MATCH_EXIT_CODE};
use crate::request::{FAILURE_SENTINEL, Query, SearchRequest};
use crate::scope::{resolve_repository, validate_scope};

/// Typed result of one operation, before it is rendered as text.
#[derive(Debug)]
pub enum Outcome {
    /// The engine succeeded; holds its raw stdout.
    Matches(String),
    /// The engine ran but found nothing; holds any stdout it produced anyway.
    NoMatches {
        /// Output written despite the zero-matches status
        partial: String,
    },
    /// The operation could not be carried out.
    Failed {
        /// Cause of the failure
        error: SearchError,
        /// Output written before the failure, if any
        partial: String,
    },
}

impl Outcome {
    fn failed(error: SearchError) -> Self {
        Self::Failed {
            error,
            partial: String::new(),
        }
    }

    /// Whether the operation failed rather than producing an answer.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Render the outcome as the string answer for `query`.
    ///
    /// Successful output is trimmed only for the operations that trim.
    /// Partial output always wins over the fixed messages.
    pub fn render(self, query: &Query) -> String {
        match self {
            Self::Matches(text) if query.trims_output() => text.trim().to_owned(),
            Self::Matches(text) => text,
            Self::NoMatches { partial } if partial.is_empty() => query.not_found_message(),
            Self::Failed { partial, .. } if partial.is_empty() => FAILURE_SENTINEL.to_owned(),
            Self::NoMatches { partial } | Self::Failed { partial, .. } => partial,
        }
    }
}

/// Entry point for all repository searches.
///
/// Holds only immutable configuration, so it can be cloned and shared freely
/// between concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct SearchGateway {
    config: SearchConfig,
}

impl SearchGateway {
    /// Create a gateway with the given configuration.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Lines in `file` matching `pattern`, or the failure sentinel.
    pub async fn search_in_file(&self, repository: &Path, pattern: &str, file: &str) -> String {
        self.answer(&Query::SearchInFile {
            repository: repository.to_path_buf(),
            pattern: pattern.to_owned(),
            file: file.to_owned(),
        })
        .await
    }

    /// Text rendering of the directory tree, or the failure sentinel.
    pub async fn directory_tree(&self, repository: &Path) -> String {
        self.answer(&Query::DirectoryTree {
            repository: repository.to_path_buf(),
        })
        .await
    }

    /// Matches of `pattern` with `context_lines` lines around each one. An
    /// empty `file` searches the whole repository.
    pub async fn search_with_context(
        &self,
        repository: &Path,
        pattern: &str,
        context_lines: u32,
        file: &str,
    ) -> String {
        self.answer(&Query::SearchWithContext {
            repository: repository.to_path_buf(),
            pattern: pattern.to_owned(),
            context_lines,
            file: file.to_owned(),
        })
        .await
    }

    /// Signal declarations in `file`, or in the whole repository when `file`
    /// is empty.
    pub async fn list_all_signals(&self, repository: &Path, file: &str) -> String {
        self.answer(&Query::ListSignals {
            repository: repository.to_path_buf(),
            file: file.to_owned(),
        })
        .await
    }

    /// Every numbered line in the repository mentioning `signal`.
    pub async fn find_signal_usage(&self, repository: &Path, signal: &str) -> String {
        self.answer(&Query::SignalUsage {
            repository: repository.to_path_buf(),
            signal: signal.to_owned(),
        })
        .await
    }

    /// Every module declaration in the repository.
    pub async fn list_all_modules(&self, repository: &Path) -> String {
        self.answer(&Query::ListModules {
            repository: repository.to_path_buf(),
        })
        .await
    }

    /// Run `query` and render its outcome as text.
    pub async fn answer(&self, query: &Query) -> String {
        self.execute(query).await.render(query)
    }

    /// Run `query` and return its typed outcome.
    ///
    /// Never issues more than one external invocation; queries rejected
    /// during scope validation issue none.
    pub async fn execute(&self, query: &Query) -> Outcome {
        tracing::info!("{} in {:?}", query.name(), query.repository());

        let outcome = self.execute_inner(query).await;
        if let Outcome::Failed { error, .. } = &outcome {
            tracing::warn!("{} failed: {error}", query.name());
        }
        outcome
    }

    async fn execute_inner(&self, query: &Query) -> Outcome {
        if let Query::SearchInFile { file, .. } = query
            && file.is_empty()
        {
            return Outcome::failed(SearchError::InvalidScope(
                "search_in_file requires a file".to_owned(),
            ));
        }

        let root = match resolve_repository(query.repository()) {
            Ok(root) => root,
            Err(error) => return Outcome::failed(error),
        };

        let Some(request) = query.search_request() else {
            let invocation = self.tree_invocation(&root);
            return self.run(&invocation, None).await;
        };

        if let Err(error) = validate_scope(&root, &request.scope) {
            return Outcome::failed(error);
        }

        let invocation = self.grep_invocation(root, &request);
        self.run(&invocation, Some(NO_MATCH_EXIT_CODE)).await
    }

    /// Build the search engine invocation for `request`, rooted at `root`.
    pub fn grep_invocation(&self, root: PathBuf, request: &SearchRequest) -> ExternalInvocation {
        let mut invocation =
            ExternalInvocation::new(root, self.config.engine.grep_program.as_str())
                .args(["grep", "--no-color"]);

        if self.config.engine.untracked {
            invocation = invocation.arg("--untracked");
        }
        if request.line_numbers {
            invocation = invocation.arg("-n");
        }
        if request.extended_regex {
            invocation = invocation.arg("-E");
        }
        if let Some(lines) = request.context_lines {
            invocation = invocation.arg(format!("-C{lines}"));
        }

        invocation = invocation.args(["-e", request.pattern.as_str()]);

        match request.scope.pathspec() {
            Some(path) => invocation.args(["--".to_owned(), format!(":(literal){path}")]),
            None => invocation,
        }
    }

    /// Build the tree renderer invocation rooted at `root`.
    pub fn tree_invocation(&self, root: &Path) -> ExternalInvocation {
        ExternalInvocation::new(root, self.config.engine.tree_program.as_str())
    }

    async fn run(&self, invocation: &ExternalInvocation, no_match_code: Option<i32>) -> Outcome {
        match invocation.run(self.config.limits.timeout()).await {
            Ok(output) => classify(output, no_match_code),
            Err(error) => Outcome::failed(error),
        }
    }
}

/// Sort a finished process into success, zero matches, or genuine failure.
fn classify(output: InvocationOutput, no_match_code: Option<i32>) -> Outcome {
    if output.succeeded() {
        return Outcome::Matches(output.stdout);
    }

    if no_match_code.is_some() && output.exit_code == no_match_code {
        return Outcome::NoMatches {
            partial: output.stdout,
        };
    }

    Outcome::Failed {
        error: SearchError::EngineFailed {
            exit_code: output.exit_code,
            stderr: output.stderr.trim().to_owned(),
        },
        partial: output.stdout,
    }
}

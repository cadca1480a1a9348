//! Single-shot external process execution.
//!
//! Every search resolves to exactly one [`ExternalInvocation`]. The working
//! directory is applied through the process-launch API and never encoded in
//! the argument list.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time;

use crate::error::{Result, SearchError};

/// Exit code `git grep` uses to report that nothing matched.
pub const NO_MATCH_EXIT_CODE: i32 = 1;

/// A fully resolved external command, rooted at a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalInvocation {
    /// Directory the process is started in
    pub working_dir: PathBuf,
    /// Program to launch
    pub program: String,
    /// Arguments passed verbatim to the program
    pub args: Vec<String>,
}

/// Captured result of a process that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationOutput {
    /// Exit code, or `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Everything the process wrote to stdout
    pub stdout: String,
    /// Everything the process wrote to stderr
    pub stderr: String,
}

impl InvocationOutput {
    /// Whether the process exited with status zero.
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Whether the process reported the engine's zero-matches status.
    pub fn is_no_match(&self) -> bool {
        self.exit_code == Some(NO_MATCH_EXIT_CODE)
    }
}

impl ExternalInvocation {
    /// Create an invocation of `program` in `working_dir` with no arguments.
    pub fn new(working_dir: impl Into<PathBuf>, program: impl Into<String>) -> Self {
        Self {
            working_dir: working_dir.into(),
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the process once, waiting at most `timeout`.
    ///
    /// stdin is closed and both output streams are drained before returning.
    /// The child is killed if the timeout elapses.
    ///
    /// # Errors
    ///
    /// Returns `EngineNotFound` when the program cannot be found, `Timeout`
    /// when the limit elapses, and `Io` for any other launch failure. A
    /// non-zero exit is not an error at this level.
    pub async fn run(&self, timeout: Duration) -> Result<InvocationOutput> {
        tracing::debug!(
            "Running {} {:?} in {:?}",
            self.program,
            self.args,
            self.working_dir
        );

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let Ok(result) = time::timeout(timeout, command.output()).await else {
            tracing::warn!(
                "{} timed out after {} seconds",
                self.program,
                timeout.as_secs()
            );
            return Err(SearchError::Timeout {
                seconds: timeout.as_secs(),
            });
        };

        let output = result.map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                SearchError::EngineNotFound {
                    program: self.program.clone(),
                }
            } else {
                SearchError::Io(err)
            }
        })?;

        let exit_code = output.status.code();
        tracing::debug!("{} exited with code {:?}", self.program, exit_code);

        Ok(InvocationOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

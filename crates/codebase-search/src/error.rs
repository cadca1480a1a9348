//! Error types for search invocations and configuration loading.

use std::io::Error as IoError;
use std::path::PathBuf;
use std::result::Result as StdResult;

use thiserror::Error;
use toml::de::Error as TomlDeError;
use toml::ser::Error as TomlSerError;

/// Result type alias using `SearchError`.
pub type Result<T> = StdResult<T, SearchError>;

/// Failures that can occur while resolving or running a search invocation.
///
/// A search that ran but matched nothing is not an error; see
/// [`Outcome::NoMatches`](crate::Outcome::NoMatches).
#[derive(Debug, Error)]
pub enum SearchError {
    /// The search or tree-render binary is absent from the environment.
    #[error("Engine not found: {program}")]
    EngineNotFound {
        /// Program that could not be spawned
        program: String,
    },

    /// The repository path or file scope does not exist or is not usable.
    #[error("Invalid scope: {0}")]
    InvalidScope(String),

    /// The engine ran and exited with a genuine error status.
    #[error("Engine failed with exit code {exit_code:?}: {stderr}")]
    EngineFailed {
        /// Exit code reported by the process, if it exited normally
        exit_code: Option<i32>,
        /// Diagnostic text captured from stderr
        stderr: String,
    },

    /// The invocation did not finish within the configured limit.
    #[error("Timeout after {seconds}s")]
    Timeout {
        /// Configured timeout in seconds
        seconds: u64,
    },

    /// Any other failure launching or waiting on the process.
    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    #[error("Failed to access config {path:?}: {source}")]
    Io {
        /// Path of the config file
        path: PathBuf,
        /// Underlying IO error
        source: IoError,
    },

    /// The config file is not valid TOML for `SearchConfig`.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] TomlDeError),

    /// The config could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] TomlSerError),

    /// An environment override held an unusable value.
    #[error("Invalid value for {key}: {value}")]
    InvalidOverride {
        /// Environment variable name
        key: &'static str,
        /// Raw value that failed to parse
        value: String,
    },

    /// A config file field holds an unusable value.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Dotted path of the field
        key: &'static str,
        /// Offending value
        value: String,
    },

    /// The home directory could not be determined.
    #[error("Could not determine home directory")]
    NoHomeDir,
}

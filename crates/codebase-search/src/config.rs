//! Configuration for the search engines and invocation limits.
//!
//! Configuration is read from `~/.codebase-search/config.toml` when present and
//! can be overridden per field through environment variables.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Overrides the search engine program.
pub const ENV_GREP_PROGRAM: &str = "CODEBASE_SEARCH_GIT";
/// Overrides the directory tree renderer program.
pub const ENV_TREE_PROGRAM: &str = "CODEBASE_SEARCH_TREE";
/// Overrides the invocation timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "CODEBASE_SEARCH_TIMEOUT_SECS";

/// Complete gateway configuration.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// External programs used to answer queries
    pub engine: EngineConfig,
    /// Resource limits applied to every invocation
    pub limits: LimitsConfig,
}

/// External program configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Program providing the `grep` subcommand (default: `git`)
    pub grep_program: String,
    /// Program rendering directory trees (default: `tree`)
    pub tree_program: String,
    /// Also search files that are not tracked by the index
    pub untracked: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grep_program: "git".to_owned(),
            tree_program: "tree".to_owned(),
            untracked: false,
        }
    }
}

/// Limits applied to each external invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Seconds to wait for the external process before killing it; must be
    /// at least 1
    pub timeout_seconds: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

impl LimitsConfig {
    /// Timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl SearchConfig {
    /// Get the default config directory path (`~/.codebase-search`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".codebase-search"))
    }

    /// Get the default config file path (`~/.codebase-search/config.toml`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default location, falling back to defaults when
    /// no file exists. Environment overrides are applied afterwards.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be read or parsed, or an
    /// override is malformed
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let config = match Self::config_path() {
            Ok(path) if path.exists() => Self::load_from_file(&path)?,
            Ok(_) | Err(ConfigError::NoHomeDir) => Self::default(),
            Err(error) => return Err(error),
        };
        config.apply_env_overrides()
    }

    /// Load config from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or sets a zero
    /// timeout
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents)?;
        if config.limits.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "limits.timeout_seconds",
                value: "0".to_owned(),
            });
        }

        tracing::debug!(
            "Loaded config from {:?}: grep={}, tree={}, timeout={}s",
            path,
            config.engine.grep_program,
            config.engine.tree_program,
            config.limits.timeout_seconds
        );

        Ok(config)
    }

    /// Save config to a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    /// Returns an error if an override holds an unparsable value
    pub fn apply_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_env_lookup(|key| env::var(key).ok())
    }

    /// Apply overrides resolved through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    /// Returns an error if an override holds an unparsable value or a zero
    /// timeout
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(program) = lookup(ENV_GREP_PROGRAM).filter(|value| !value.is_empty()) {
            self.engine.grep_program = program;
        }
        if let Some(program) = lookup(ENV_TREE_PROGRAM).filter(|value| !value.is_empty()) {
            self.engine.tree_program = program;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let parsed = raw.trim().parse::<u64>().ok().filter(|seconds| *seconds > 0);
            self.limits.timeout_seconds = parsed.ok_or(ConfigError::InvalidOverride {
                key: ENV_TIMEOUT_SECS,
                value: raw,
            })?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.engine.grep_program, "git");
        assert_eq!(config.engine.tree_program, "tree");
        assert!(!config.engine.untracked);
        assert_eq!(config.limits.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_save_and_load() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let path = temp.path().join("nested").join("config.toml");

        let mut config = SearchConfig::default();
        config.engine.untracked = true;
        config.limits.timeout_seconds = 5;
        config.save_to_file(&path).expect("Failed to save config");

        let loaded = SearchConfig::load_from_file(&path).expect("Failed to load config");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[limits]\ntimeout_seconds = 7\n").expect("Failed to write config");

        let loaded = SearchConfig::load_from_file(&path).expect("Failed to load config");
        assert_eq!(loaded.limits.timeout_seconds, 7);
        assert_eq!(loaded.engine, EngineConfig::default());
    }

    #[test]
    fn test_invalid_config_is_parse_error() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "limits = 3").expect("Failed to write config");

        let result = SearchConfig::load_from_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_GREP_PROGRAM, "/usr/local/bin/git"),
            (ENV_TIMEOUT_SECS, " 12 "),
        ]);
        let config = SearchConfig::default()
            .with_env_lookup(|key| vars.get(key).map(|value| (*value).to_owned()))
            .expect("Overrides should apply");

        assert_eq!(config.engine.grep_program, "/usr/local/bin/git");
        assert_eq!(config.engine.tree_program, "tree");
        assert_eq!(config.limits.timeout_seconds, 12);
    }

    #[test]
    fn test_env_override_rejects_bad_timeout() {
        let result = SearchConfig::default().with_env_lookup(|key| {
            (key == ENV_TIMEOUT_SECS).then(|| "soon".to_owned())
        });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidOverride {
                key: ENV_TIMEOUT_SECS,
                ..
            })
        ));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = SearchConfig::default().with_env_lookup(|key| {
            (key == ENV_TIMEOUT_SECS).then(|| "0".to_owned())
        });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidOverride {
                key: ENV_TIMEOUT_SECS,
                ..
            })
        ));

        let temp = TempDir::new().expect("Failed to create temp dir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[limits]\ntimeout_seconds = 0\n").expect("Failed to write config");
        let result = SearchConfig::load_from_file(&path);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                key: "limits.timeout_seconds",
                ..
            })
        ));
    }
}

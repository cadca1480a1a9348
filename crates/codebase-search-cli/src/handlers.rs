//! Command handlers for the codebase-search CLI.

use std::io::{Write as _, stdout};
use std::path::Path;

use anyhow::{Context as _, Result};
use codebase_search::{SearchConfig, SearchGateway, ToolRegistry, serve};
use serde_json::json;
use tokio::io::{BufReader, stdin, stdout as async_stdout};

use crate::cli::Commands;

/// Resolve the effective configuration from an explicit file or the default
/// location, then environment overrides, then the `--timeout` flag.
///
/// # Errors
/// Returns an error if the config file cannot be read or an override is invalid
pub fn load_config(config_path: Option<&Path>, timeout: Option<u64>) -> Result<SearchConfig> {
    let mut config = match config_path {
        Some(path) => SearchConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?
            .apply_env_overrides()?,
        None => SearchConfig::load_or_default()?,
    };

    if let Some(seconds) = timeout {
        config.limits.timeout_seconds = seconds;
    }

    Ok(config)
}

/// Run one CLI command against `config`.
///
/// # Errors
/// Returns an error if writing results or serving requests fails
pub async fn handle(command: Commands, config: SearchConfig) -> Result<()> {
    let gateway = SearchGateway::new(config);

    let answer = match command {
        Commands::SearchInFile {
            pattern,
            file,
            path,
        } => gateway.search_in_file(&path, &pattern, &file).await,
        Commands::Tree { path } => gateway.directory_tree(&path).await,
        Commands::Context {
            pattern,
            context_lines,
            file,
            path,
        } => {
            gateway
                .search_with_context(&path, &pattern, context_lines, &file)
                .await
        }
        Commands::Signals { file, path } => gateway.list_all_signals(&path, &file).await,
        Commands::Usage { signal, path } => gateway.find_signal_usage(&path, &signal).await,
        Commands::Modules { path } => gateway.list_all_modules(&path).await,
        Commands::Serve => return handle_serve(&gateway).await,
        Commands::Tools => handle_tools(&gateway)?,
        Commands::Config => toml::to_string_pretty(gateway.config())?,
    };

    write_answer(&answer)
}

async fn handle_serve(gateway: &SearchGateway) -> Result<()> {
    let registry = ToolRegistry::search_tools(gateway);
    tracing::info!("Serving {} tools on stdin/stdout", registry.len());

    let answered = serve(&registry, BufReader::new(stdin()), async_stdout())
        .await
        .context("serving tool requests")?;

    tracing::info!("Served {answered} requests");
    Ok(())
}

fn handle_tools(gateway: &SearchGateway) -> Result<String> {
    let registry = ToolRegistry::search_tools(gateway);
    let tools: Vec<_> = registry
        .list_tools()
        .into_iter()
        .map(|tool| {
            json!({
                "name": tool.name(),
                "description": tool.description(),
                "parameters": tool.parameters_schema(),
            })
        })
        .collect();

    Ok(serde_json::to_string_pretty(&tools)?)
}

/// Write an answer to stdout, ending it with exactly the newlines it
/// already has, or one if it has none.
fn write_answer(answer: &str) -> Result<()> {
    let mut out = stdout().lock();
    out.write_all(answer.as_bytes())?;
    if !answer.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_applies_timeout_flag() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[engine]\ntree_program = \"eza\"\n").expect("Failed to write config");

        let config = load_config(Some(&path), Some(4)).expect("config loads");
        assert_eq!(config.engine.tree_program, "eza");
        assert_eq!(config.limits.timeout_seconds, 4);
    }

    #[test]
    fn test_load_config_missing_file_fails() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        load_config(Some(&temp.path().join("absent.toml")), None)
            .expect_err("a missing config file is an error");
    }

    #[test]
    fn test_tools_listing_names_every_operation() {
        let listing = handle_tools(&SearchGateway::default()).expect("tools render");
        for name in [
            "search_in_specific_file",
            "get_directory_tree",
            "search_in_specific_file_with_context",
            "list_all_signals",
            "find_signal_usage",
            "list_all_modules",
        ] {
            assert!(listing.contains(name), "missing {name}");
        }
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand, value_parser};

/// Command-line arguments for codebase-search
#[derive(Debug, Parser)]
#[command(name = "codebase-search")]
#[command(about = "Search hardware-description repositories with git grep", long_about = None)]
pub struct Cli {
    /// Config file to load instead of ~/.codebase-search/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seconds to wait for each external invocation (overrides config)
    #[arg(long, global = true, value_parser = value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Operation to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available operations
#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Search one file of a repository for a pattern")]
    SearchInFile {
        #[arg(help = "Search string or regex")]
        pattern: String,

        #[arg(help = "File relative to the repository root")]
        file: String,

        #[arg(short, long, default_value = ".", help = "Repository root directory")]
        path: PathBuf,
    },

    #[command(about = "Render the directory tree of a repository")]
    Tree {
        #[arg(short, long, default_value = ".", help = "Repository root directory")]
        path: PathBuf,
    },

    #[command(about = "Search for a pattern and show surrounding lines")]
    Context {
        #[arg(help = "Search string or regex")]
        pattern: String,

        #[arg(short = 'C', long, default_value_t = 3, help = "Lines of context around each match")]
        context_lines: u32,

        #[arg(short, long, default_value = "", help = "Restrict the search to one file")]
        file: String,

        #[arg(short, long, default_value = ".", help = "Repository root directory")]
        path: PathBuf,
    },

    #[command(about = "List wire/reg/logic/input/output declarations")]
    Signals {
        #[arg(short, long, default_value = "", help = "Restrict the search to one file")]
        file: String,

        #[arg(short, long, default_value = ".", help = "Repository root directory")]
        path: PathBuf,
    },

    #[command(about = "Find every line mentioning a signal")]
    Usage {
        #[arg(help = "Signal name to search for")]
        signal: String,

        #[arg(short, long, default_value = ".", help = "Repository root directory")]
        path: PathBuf,
    },

    #[command(about = "List module declarations")]
    Modules {
        #[arg(short, long, default_value = ".", help = "Repository root directory")]
        path: PathBuf,
    },

    #[command(about = "Serve line-delimited JSON tool requests on stdin/stdout")]
    Serve,

    #[command(about = "List available tools and their parameter schemas")]
    Tools,

    #[command(about = "Show the effective configuration")]
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_context_defaults() {
        let cli = Cli::try_parse_from(["codebase-search", "context", "rst_n"])
            .expect("context parses with defaults");

        let Commands::Context {
            pattern,
            context_lines,
            file,
            path,
        } = cli.command
        else {
            panic!("expected context command");
        };
        assert_eq!(pattern, "rst_n");
        assert_eq!(context_lines, 3);
        assert!(file.is_empty());
        assert_eq!(path, PathBuf::from("."));
    }

    #[test]
    fn test_global_timeout() {
        let cli = Cli::try_parse_from(["codebase-search", "modules", "--timeout", "5"])
            .expect("timeout is global");
        assert_eq!(cli.timeout, Some(5));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        Cli::try_parse_from(["codebase-search", "modules", "--timeout", "0"])
            .expect_err("a zero timeout is refused");
    }
}

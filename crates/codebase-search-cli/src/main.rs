//! codebase-search - repository search tools for hardware-description codebases
#![cfg_attr(
    test,
    allow(
        dead_code,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::print_stdout,
        clippy::print_stderr,
        reason = "Allow for tests"
    )
)]

use std::io::stderr;

use anyhow::Result;
use clap::Parser as _;
use cli::Cli;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

mod cli;
mod handlers;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries results and the serve protocol.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codebase_search=info,codebase_search_cli=info".into()),
        )
        .with(layer().with_writer(stderr))
        .init();

    let cli = Cli::parse();
    let config = handlers::load_config(cli.config.as_deref(), cli.timeout)?;

    handlers::handle(cli.command, config).await
}

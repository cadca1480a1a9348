//! Repository search tools for hardware-description codebases.
//!
//! This crate provides:
//! - `SearchGateway`, six search operations that each run one external
//!   `git grep` or `tree` invocation and normalize the result to a string
//! - Tool trait and registry exposing those operations to an agent
//! - A line-delimited JSON dispatcher for serving the tools over a stream
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

/// Engine and limit configuration.
pub mod config;
/// Error types.
mod error;
/// The search gateway and outcome normalization.
mod gateway;
/// Single-shot external process execution.
mod invocation;
/// Tool registry for managing available tools.
mod registry;
/// Query and request types.
mod request;
/// Repository and file-scope resolution.
mod scope;
/// Line-delimited JSON dispatcher.
pub mod server;
/// Core abstractions shared by all tools.
mod tool;
/// Tools wrapping each gateway operation.
mod tools;

pub use config::{EngineConfig, LimitsConfig, SearchConfig};
pub use error::{ConfigError, Result, SearchError};
pub use gateway::{Outcome, SearchGateway};
pub use invocation::{ExternalInvocation, InvocationOutput, NO_MATCH_EXIT_CODE};
pub use registry::ToolRegistry;
pub use request::{
    FAILURE_SENTINEL, MODULE_DECLARATION_PATTERN, Query, SIGNAL_DECLARATION_PATTERN, SearchRequest,
};
pub use scope::FileScope;
pub use server::{DispatchRequest, DispatchResponse, serve};
pub use tool::{Tool, ToolError, ToolInput, ToolOutput, ToolResult};
pub use tools::{
    DirectoryTreeTool, ListModulesTool, ListSignalsTool, SearchInFileTool, SearchWithContextTool,
    SignalUsageTool,
};

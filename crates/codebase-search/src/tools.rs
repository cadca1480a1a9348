//! Agent-facing tools, one per gateway operation.
//!
//! Tool names match the names agents already use for these operations. Each
//! tool parses its JSON parameters into a [`Query`] and returns the gateway's
//! normalized answer as the output message.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, from_value, json};

use crate::gateway::{Outcome, SearchGateway};
use crate::request::Query;
use crate::{Tool, ToolError, ToolInput, ToolOutput, ToolResult};

fn parse_params<T: DeserializeOwned>(tool: &str, params: Value) -> ToolResult<T> {
    from_value(params)
        .map_err(|err| ToolError::InvalidInput(format!("{tool}: invalid parameters: {err}")))
}

/// Run `query` and wrap the rendered answer, tagging the typed outcome in
/// `data` so callers can tell zero matches from failures.
async fn answer(gateway: &SearchGateway, query: &Query) -> ToolOutput {
    let outcome = gateway.execute(query).await;
    let data = match &outcome {
        Outcome::Matches(_) => json!({"outcome": "matches"}),
        Outcome::NoMatches { .. } => json!({"outcome": "no_matches"}),
        Outcome::Failed { error, .. } => json!({"outcome": "failed", "error": error.to_string()}),
    };
    let failed = outcome.is_failure();
    let message = outcome.render(query);

    if failed {
        ToolOutput {
            success: false,
            message,
            data: Some(data),
        }
    } else {
        ToolOutput::success_with_data(message, data)
    }
}

#[derive(Debug, Deserialize)]
struct SearchInFileParams {
    path: PathBuf,
    pattern: String,
    file: String,
}

/// Searches one file of a repository for a pattern.
#[derive(Debug, Clone)]
pub struct SearchInFileTool {
    gateway: SearchGateway,
}

impl SearchInFileTool {
    /// Create the tool on top of `gateway`.
    #[must_use]
    pub fn new(gateway: SearchGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for SearchInFileTool {
    fn name(&self) -> &'static str {
        "search_in_specific_file"
    }

    fn description(&self) -> &'static str {
        "Search a single file of a repository for a pattern (regex). Returns matching lines \
         prefixed with the file name, or 'Error Occurred'."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": "Path to the repository root"},
                "pattern": {"type": "string", "description": "Search string or regex"},
                "file": {"type": "string", "description": "File relative to the repository root"}
            },
            "required": ["path", "pattern", "file"]
        })
    }

    async fn execute(&self, input: ToolInput) -> ToolResult<ToolOutput> {
        let params: SearchInFileParams = parse_params(self.name(), input.params)?;
        let query = Query::SearchInFile {
            repository: params.path,
            pattern: params.pattern,
            file: params.file,
        };
        Ok(answer(&self.gateway, &query).await)
    }
}

#[derive(Debug, Deserialize)]
struct DirectoryTreeParams {
    path: PathBuf,
}

/// Renders the directory tree of a repository.
#[derive(Debug, Clone)]
pub struct DirectoryTreeTool {
    gateway: SearchGateway,
}

impl DirectoryTreeTool {
    /// Create the tool on top of `gateway`.
    #[must_use]
    pub fn new(gateway: SearchGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for DirectoryTreeTool {
    fn name(&self) -> &'static str {
        "get_directory_tree"
    }

    fn description(&self) -> &'static str {
        "Render the directory tree of a repository."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": "Path to the repository root"}
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, input: ToolInput) -> ToolResult<ToolOutput> {
        let params: DirectoryTreeParams = parse_params(self.name(), input.params)?;
        let query = Query::DirectoryTree {
            repository: params.path,
        };
        Ok(answer(&self.gateway, &query).await)
    }
}

#[derive(Debug, Deserialize)]
struct SearchWithContextParams {
    path: PathBuf,
    pattern: String,
    context_lines: u32,
    #[serde(default)]
    file: String,
}

/// Searches for a pattern and returns surrounding context lines.
#[derive(Debug, Clone)]
pub struct SearchWithContextTool {
    gateway: SearchGateway,
}

impl SearchWithContextTool {
    /// Create the tool on top of `gateway`.
    #[must_use]
    pub fn new(gateway: SearchGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for SearchWithContextTool {
    fn name(&self) -> &'static str {
        "search_in_specific_file_with_context"
    }

    fn description(&self) -> &'static str {
        "Search a repository (or one file of it) for a pattern, including context lines \
         before and after every match."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": "Path to the repository root"},
                "pattern": {"type": "string", "description": "Search string or regex"},
                "context_lines": {"type": "integer", "minimum": 0, "description": "Lines of context around each match"},
                "file": {"type": "string", "description": "Optional file to search; empty searches the whole repository"}
            },
            "required": ["path", "pattern", "context_lines"]
        })
    }

    async fn execute(&self, input: ToolInput) -> ToolResult<ToolOutput> {
        let params: SearchWithContextParams = parse_params(self.name(), input.params)?;
        let query = Query::SearchWithContext {
            repository: params.path,
            pattern: params.pattern,
            context_lines: params.context_lines,
            file: params.file,
        };
        Ok(answer(&self.gateway, &query).await)
    }
}

#[derive(Debug, Deserialize)]
struct ListSignalsParams {
    path: PathBuf,
    #[serde(default)]
    file: String,
}

/// Lists `wire`, `reg`, `logic`, `input` and `output` declarations.
#[derive(Debug, Clone)]
pub struct ListSignalsTool {
    gateway: SearchGateway,
}

impl ListSignalsTool {
    /// Create the tool on top of `gateway`.
    #[must_use]
    pub fn new(gateway: SearchGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for ListSignalsTool {
    fn name(&self) -> &'static str {
        "list_all_signals"
    }

    fn description(&self) -> &'static str {
        "List signal declarations (wire, reg, logic, input, output) in Verilog/SystemVerilog \
         sources, optionally restricted to one file."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": "Path to the repository root"},
                "file": {"type": "string", "description": "Optional file to search; empty searches the whole repository"}
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, input: ToolInput) -> ToolResult<ToolOutput> {
        let params: ListSignalsParams = parse_params(self.name(), input.params)?;
        let query = Query::ListSignals {
            repository: params.path,
            file: params.file,
        };
        Ok(answer(&self.gateway, &query).await)
    }
}

#[derive(Debug, Deserialize)]
struct SignalUsageParams {
    path: PathBuf,
    signal: String,
}

/// Finds every line in a repository that mentions a signal.
#[derive(Debug, Clone)]
pub struct SignalUsageTool {
    gateway: SearchGateway,
}

impl SignalUsageTool {
    /// Create the tool on top of `gateway`.
    #[must_use]
    pub fn new(gateway: SearchGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for SignalUsageTool {
    fn name(&self) -> &'static str {
        "find_signal_usage"
    }

    fn description(&self) -> &'static str {
        "Find every occurrence of a signal in the repository, with line numbers."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": "Path to the repository root"},
                "signal": {"type": "string", "description": "Signal name to search for"}
            },
            "required": ["path", "signal"]
        })
    }

    async fn execute(&self, input: ToolInput) -> ToolResult<ToolOutput> {
        let params: SignalUsageParams = parse_params(self.name(), input.params)?;
        let query = Query::SignalUsage {
            repository: params.path,
            signal: params.signal,
        };
        Ok(answer(&self.gateway, &query).await)
    }
}

#[derive(Debug, Deserialize)]
struct ListModulesParams {
    path: PathBuf,
}

/// Lists module declarations across a repository.
#[derive(Debug, Clone)]
pub struct ListModulesTool {
    gateway: SearchGateway,
}

impl ListModulesTool {
    /// Create the tool on top of `gateway`.
    #[must_use]
    pub fn new(gateway: SearchGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Tool for ListModulesTool {
    fn name(&self) -> &'static str {
        "list_all_modules"
    }

    fn description(&self) -> &'static str {
        "List all module declarations in the repository with their file locations."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "description": "Path to the repository root"}
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, input: ToolInput) -> ToolResult<ToolOutput> {
        let params: ListModulesParams = parse_params(self.name(), input.params)?;
        let query = Query::ListModules {
            repository: params.path,
        };
        Ok(answer(&self.gateway, &query).await)
    }
}

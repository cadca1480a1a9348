//! Tool registry for managing available tools.

use std::convert::AsRef;
use std::sync::Arc;

use super::Tool;
use crate::gateway::SearchGateway;
use crate::tools::{
    DirectoryTreeTool, ListModulesTool, ListSignalsTool, SearchInFileTool, SearchWithContextTool,
    SignalUsageTool,
};

type ToolList = Arc<Vec<Arc<dyn Tool>>>;

/// Registry for managing available tools
#[derive(Clone)]
pub struct ToolRegistry {
    tools: ToolList,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: Arc::new(Vec::new()),
        }
    }

    /// Create a registry holding the six repository search tools, all backed
    /// by `gateway`
    #[must_use]
    pub fn search_tools(gateway: &SearchGateway) -> Self {
        Self::new()
            .with_tool(Arc::new(SearchInFileTool::new(gateway.clone())))
            .with_tool(Arc::new(DirectoryTreeTool::new(gateway.clone())))
            .with_tool(Arc::new(SearchWithContextTool::new(gateway.clone())))
            .with_tool(Arc::new(ListSignalsTool::new(gateway.clone())))
            .with_tool(Arc::new(SignalUsageTool::new(gateway.clone())))
            .with_tool(Arc::new(ListModulesTool::new(gateway.clone())))
    }

    /// Add a tool to the registry
    #[must_use]
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        Arc::make_mut(&mut self.tools).push(tool);
        self
    }

    /// Get a tool by name, if it exists
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools
            .iter()
            .find(|tool_ref| tool_ref.name() == name)
            .cloned()
    }

    /// List all available tools
    #[must_use]
    pub fn list_tools(&self) -> Vec<&dyn Tool> {
        self.tools.iter().map(AsRef::as_ref).collect()
    }

    /// Get number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ToolInput, ToolOutput, ToolResult};
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct MockTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for MockTool {
        fn name(&self) -> &'static str {
            self.name
        }

        fn description(&self) -> &'static str {
            "A mock tool for testing"
        }

        fn parameters_schema(&self) -> Value {
            json!({"type": "object"})
        }

        async fn execute(&self, _input: ToolInput) -> ToolResult<ToolOutput> {
            Ok(ToolOutput::success("test"))
        }
    }

    /// Tests empty registry initialization.
    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    /// Tests retrieving tools from the registry by name.
    #[test]
    fn test_get_tool() {
        let tool = Arc::new(MockTool { name: "test_tool" });
        let registry = ToolRegistry::default().with_tool(tool);

        assert_eq!(registry.len(), 1);
        assert!(registry.get_tool("test_tool").is_some());
        assert!(registry.get_tool("nonexistent").is_none());
    }

    /// Tests that the search registry exposes every operation by name.
    #[test]
    fn test_search_tools() {
        let registry = ToolRegistry::search_tools(&SearchGateway::default());
        assert_eq!(registry.len(), 6);

        for name in [
            "search_in_specific_file",
            "get_directory_tree",
            "search_in_specific_file_with_context",
            "list_all_signals",
            "find_signal_usage",
            "list_all_modules",
        ] {
            assert!(registry.get_tool(name).is_some(), "missing tool {name}");
        }

        let names: Vec<&str> = registry.list_tools().iter().map(|tool| tool.name()).collect();
        assert_eq!(names.len(), 6);
    }
}

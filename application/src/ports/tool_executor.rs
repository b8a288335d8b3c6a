//! Tool Executor port
//!
//! The capability interface: how the reasoning loop invokes harvest
//! operations.

use async_trait::async_trait;
use explainer_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::ToolResult,
};

/// Port for tool execution
///
/// Implementations never fail: unknown tools and bad arguments come back as
/// failed [`ToolResult`]s so the model can correct itself.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is available, aliases included
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().get_resolved(name).is_some()
    }

    /// Get the definition of a specific tool, aliases included
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get_resolved(name)
    }

    /// Canonical names of all available tools, sorted
    fn available_tools(&self) -> Vec<&str> {
        self.tool_spec().names()
    }

    /// Execute a tool call
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}

//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how to serialize them for
//! the API" (infrastructure).

use explainer_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to the backend's JSON Schema format.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools, sorted by name.
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value>;
}

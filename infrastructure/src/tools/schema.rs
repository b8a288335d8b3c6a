//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`]. The output is
//! provider-neutral (`name`, `description`, `input_schema`); the gateway
//! wraps it in whatever envelope its backend expects.

use explainer_application::ports::tool_schema::ToolSchemaPort;
use explainer_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Maps `param_type` to a JSON Schema type:
/// - `"number"`, `"integer"`, `"boolean"` → themselves
/// - anything else → `"string"`
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let schema_type = match param.param_type.as_str() {
                "number" => "number",
                "integer" => "integer",
                "boolean" => "boolean",
                _ => "string",
            };

            properties.insert(
                param.name.clone(),
                serde_json::json!({
                    "type": schema_type,
                    "description": param.description,
                }),
            );

            if param.required {
                required.push(serde_json::json!(param.name));
            }
        }

        serde_json::json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        let mut tools: Vec<&ToolDefinition> = spec.all().collect();
        tools.sort_by_key(|t| &t.name);
        tools.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}

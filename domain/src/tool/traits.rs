//! Tool call validation
//!
//! Pure checks of a [`ToolCall`] against its [`ToolDefinition`]. The async
//! execution port lives in the application layer.

use super::entities::{ToolCall, ToolDefinition};
use serde_json::Value;

/// Validator for tool calls
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default validator.
///
/// - every required parameter is present and not `null`
/// - no argument outside the parameter list
/// - `"string"` parameters carry a string (or `null` when optional)
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            let value = call.arguments.get(&param.name);
            match value {
                None | Some(Value::Null) if param.required => {
                    return Err(format!(
                        "Missing required parameter '{}' for tool '{}'",
                        param.name, definition.name
                    ));
                }
                Some(Value::Null) | None => {}
                Some(v) if param.param_type == "string" && !v.is_string() => {
                    return Err(format!(
                        "Parameter '{}' for tool '{}' must be a string, got {}",
                        param.name, definition.name, v
                    ));
                }
                Some(_) => {}
            }
        }

        if let Some(unknown) = call
            .arguments
            .keys()
            .find(|arg| !definition.parameters.iter().any(|p| &p.name == *arg))
        {
            return Err(format!(
                "Unknown parameter '{}' for tool '{}'",
                unknown, definition.name
            ));
        }

        Ok(())
    }
}

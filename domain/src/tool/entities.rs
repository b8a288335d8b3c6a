//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Definition of a capability the reasoning component may invoke
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "get_help_text")
    pub name: String,
    /// Human-readable description shown to the model
    pub description: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint (e.g., "string", "number")
    pub param_type: String,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// Registry of available tools plus alias mappings
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: HashMap<String, ToolDefinition>,
    /// Alias → canonical name mapping (e.g. "get_manpage" → "get_man_page")
    aliases: HashMap<String, String>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    /// Register multiple aliases at once (builder pattern)
    pub fn register_aliases(
        mut self,
        mappings: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        for (alias, canonical) in mappings {
            self.aliases.insert(alias.into(), canonical.into());
        }
        self
    }

    /// Resolve a name: canonical names resolve to themselves, aliases to
    /// their target, anything else to `None`.
    pub fn resolve<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.tools.contains_key(name) {
            Some(name)
        } else {
            self.aliases.get(name).map(|s| s.as_str())
        }
    }

    /// Get tool definition by canonical name or alias
    pub fn get_resolved(&self, name: &str) -> Option<&ToolDefinition> {
        self.resolve(name).and_then(|canonical| self.tools.get(canonical))
    }

    /// Exact lookup; aliases are not consulted
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    /// Tool names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A call to a tool with arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: HashMap<String, serde_json::Value>,
    /// Backend-assigned id used to correlate the tool result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_id: Option<String>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
            native_id: None,
        }
    }

    /// Build a call from a backend tool-use block
    pub fn from_native(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            tool_name: name.into(),
            arguments,
            native_id: Some(id.into()),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ToolSpec {
        ToolSpec::new()
            .register(
                ToolDefinition::new("get_help_text", "Help text").with_parameter(
                    ToolParameter::new("cli_tool_name", "Tool", true),
                ),
            )
            .register(ToolDefinition::new("get_man_page", "Man page"))
            .register_aliases([
                ("get_cli_help", "get_help_text"),
                ("get_manpage", "get_man_page"),
            ])
    }

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new("get_help_text", "Help text").with_parameter(
            ToolParameter::new("subcommand", "Subcommand", false).with_type("string"),
        );

        assert_eq!(tool.name, "get_help_text");
        assert_eq!(tool.parameters.len(), 1);
        assert!(!tool.parameters[0].required);
    }

    #[test]
    fn test_tool_spec_resolve() {
        let spec = spec();
        assert_eq!(spec.resolve("get_help_text"), Some("get_help_text"));
        assert_eq!(spec.resolve("get_cli_help"), Some("get_help_text"));
        assert_eq!(spec.resolve("get_manpage"), Some("get_man_page"));
        assert_eq!(spec.resolve("run_command"), None);
        assert_eq!(spec.get_resolved("get_cli_help").unwrap().name, "get_help_text");
    }

    #[test]
    fn test_get_is_not_affected_by_aliases() {
        let spec = spec();
        assert!(spec.get("get_man_page").is_some());
        assert!(spec.get("get_manpage").is_none());
    }

    #[test]
    fn test_canonical_name_takes_priority_over_alias() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("help", "A real tool called help"))
            .register(ToolDefinition::new("get_help_text", "Help text"))
            .register_aliases([("help", "get_help_text")]);

        assert_eq!(spec.resolve("help"), Some("help"));
        assert_eq!(spec.get_resolved("help").unwrap().name, "help");
    }

    #[test]
    fn test_names_sorted() {
        let spec = spec();
        assert_eq!(spec.names(), vec!["get_help_text", "get_man_page"]);
        assert_eq!(spec.len(), 2);
        assert!(!spec.is_empty());
    }

    #[test]
    fn test_tool_call() {
        let call = ToolCall::new("get_help_text").with_arg("cli_tool_name", "git");

        assert_eq!(call.get_string("cli_tool_name"), Some("git"));
        assert_eq!(call.require_string("cli_tool_name").unwrap(), "git");
        assert!(call.require_string("subcommand").is_err());
        assert!(call.native_id.is_none());
    }

    #[test]
    fn test_tool_call_from_native() {
        let args = [("cli_tool_name".to_string(), serde_json::json!("tar"))]
            .into_iter()
            .collect();
        let call = ToolCall::from_native("call_1", "get_man_page", args);
        assert_eq!(call.native_id.as_deref(), Some("call_1"));
        assert_eq!(call.get_string("cli_tool_name"), Some("tar"));
    }
}

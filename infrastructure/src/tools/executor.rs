//! Harvest tool executor: the concrete implementation of [`ToolExecutorPort`].
//!
//! ```text
//! execute(call)
//!   ├─ resolve name (aliases)        → NOT_FOUND on miss
//!   ├─ normalize `command` synonym
//!   ├─ validate against definition   → INVALID_ARGUMENT
//!   └─ spawn_blocking(Harvester::run) → ToolResult::from_harvest
//! ```

use super::help::{COMMAND_SYNONYM, GET_HELP_TEXT, GET_MAN_PAGE};
use crate::harvest::Harvester;
use async_trait::async_trait;
use explainer_application::ports::tool_executor::ToolExecutorPort;
use explainer_domain::tool::{
    entities::{ToolCall, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
use explainer_domain::{HelpRequest, ToolQuery};
use std::time::Instant;
use tracing::{debug, warn};

/// Executor that answers harvest tool calls by spawning local processes.
#[derive(Debug, Clone)]
pub struct HarvestToolExecutor {
    harvester: Harvester,
    tool_spec: ToolSpec,
}

impl HarvestToolExecutor {
    pub fn new(harvester: Harvester) -> Self {
        Self {
            harvester,
            tool_spec: super::default_tool_spec(),
        }
    }

    /// Turn a call into a harvest request, or explain why it cannot be one.
    fn prepare(&self, call: &ToolCall) -> Result<(&'static str, HelpRequest), ToolError> {
        let canonical = match self.tool_spec.resolve(&call.tool_name) {
            Some(GET_HELP_TEXT) => GET_HELP_TEXT,
            Some(GET_MAN_PAGE) => GET_MAN_PAGE,
            _ => {
                return Err(ToolError::not_found(format!(
                    "Unknown tool: {}. Available tools: {}",
                    call.tool_name,
                    self.tool_spec.names().join(", ")
                )));
            }
        };
        if canonical != call.tool_name {
            debug!("Resolved tool alias '{}' → '{}'", call.tool_name, canonical);
        }

        let call = normalize_arguments(call, canonical);
        if let Some(definition) = self.tool_spec.get(canonical) {
            DefaultToolValidator
                .validate(&call, definition)
                .map_err(ToolError::invalid_argument)?;
        }

        let tool = call
            .require_string("cli_tool_name")
            .map_err(ToolError::invalid_argument)
            .and_then(|name| {
                ToolQuery::parse(name).map_err(|e| ToolError::invalid_argument(e.to_string()))
            })?;

        let request = if canonical == GET_HELP_TEXT {
            HelpRequest::help(tool, call.get_string("subcommand"))
                .with_flag(self.harvester.help_flag())
        } else {
            HelpRequest::manpage(tool)
        };
        Ok((canonical, request))
    }
}

/// Accept `command` as a synonym for `subcommand` on the help tool.
fn normalize_arguments(call: &ToolCall, canonical: &str) -> ToolCall {
    let mut call = call.clone();
    if canonical == GET_HELP_TEXT {
        if let Some(value) = call.arguments.remove(COMMAND_SYNONYM) {
            call.arguments
                .entry("subcommand".to_string())
                .or_insert(value);
        }
    }
    call
}

#[async_trait]
impl ToolExecutorPort for HarvestToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let start = Instant::now();

        let (canonical, request) = match self.prepare(call) {
            Ok(prepared) => prepared,
            Err(e) => {
                warn!("Rejected tool call '{}': {}", call.tool_name, e);
                return ToolResult::failure(&call.tool_name, e);
            }
        };

        let harvester = self.harvester.clone();
        let joined = tokio::task::spawn_blocking(move || harvester.run(&request)).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match joined {
            Ok(help) => ToolResult::from_harvest(canonical, help).with_duration(duration_ms),
            Err(e) => ToolResult::failure(
                canonical,
                ToolError::execution_failed(format!("Harvest task failed: {}", e)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explainer_domain::HelpOutcome;

    fn executor() -> HarvestToolExecutor {
        HarvestToolExecutor::new(Harvester::new())
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let call = ToolCall::new("run_command").with_arg("command", "rm -rf /");
        let result = executor().execute(&call).await;

        assert!(!result.is_success());
        let error = result.error().unwrap();
        assert_eq!(error.code, "NOT_FOUND");
        assert!(error.message.contains("get_help_text, get_man_page"));
    }

    #[tokio::test]
    async fn test_missing_required_argument() {
        let result = executor().execute(&ToolCall::new("get_man_page")).await;
        assert_eq!(result.error().unwrap().code, "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_tool_name_with_whitespace_is_rejected() {
        let call = ToolCall::new("get_help_text").with_arg("cli_tool_name", "git commit");
        let result = executor().execute(&call).await;
        assert_eq!(result.error().unwrap().code, "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_unknown_argument_is_rejected() {
        let call = ToolCall::new("get_man_page")
            .with_arg("cli_tool_name", "ls")
            .with_arg("section", "1");
        let result = executor().execute(&call).await;
        assert!(
            result
                .error()
                .unwrap()
                .message
                .contains("Unknown parameter 'section'")
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_a_successful_call() {
        let call = ToolCall::new("get_help_text").with_arg("cli_tool_name", "no-such-tool-4f2a");
        let result = executor().execute(&call).await;

        assert!(result.is_success());
        assert!(!result.harvested_cleanly());
        assert_eq!(result.metadata.harvest, Some(HelpOutcome::NotFound));
        assert!(result.output().unwrap().contains("no-such-tool-4f2a"));
        assert!(result.metadata.duration_ms.is_some());
    }

    #[test]
    fn test_command_synonym_becomes_subcommand() {
        let call = ToolCall::new("get_cli_help")
            .with_arg("cli_tool_name", "git")
            .with_arg("command", "commit");
        let normalized = normalize_arguments(&call, GET_HELP_TEXT);
        assert_eq!(normalized.get_string("subcommand"), Some("commit"));
        assert!(!normalized.arguments.contains_key("command"));
    }

    #[test]
    fn test_explicit_subcommand_wins_over_synonym() {
        let call = ToolCall::new("get_help_text")
            .with_arg("cli_tool_name", "git")
            .with_arg("subcommand", "push")
            .with_arg("command", "commit");
        let normalized = normalize_arguments(&call, GET_HELP_TEXT);
        assert_eq!(normalized.get_string("subcommand"), Some("push"));
    }

    #[test]
    fn test_alias_prepares_help_request() {
        let call = ToolCall::new("get_cli_help")
            .with_arg("cli_tool_name", "git")
            .with_arg("command", "remote add");
        let (canonical, request) = executor().prepare(&call).unwrap();
        assert_eq!(canonical, GET_HELP_TEXT);
        assert_eq!(request.argv("man"), vec!["git", "remote", "add", "-h"]);
    }

    #[test]
    fn test_man_alias_prepares_manpage_request() {
        let call = ToolCall::new("man").with_arg("cli_tool_name", "tar");
        let (canonical, request) = executor().prepare(&call).unwrap();
        assert_eq!(canonical, GET_MAN_PAGE);
        assert_eq!(request.argv("man"), vec!["man", "tar"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_executes_help_for_subcommand() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake");
        std::fs::write(&path, "#!/bin/sh\necho \"help for $1\"\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

        let call = ToolCall::new("get_help_text")
            .with_arg("cli_tool_name", path.to_str().unwrap())
            .with_arg("subcommand", "build");
        let result = executor().execute(&call).await;

        assert!(result.harvested_cleanly());
        assert_eq!(result.output(), Some("help for build\n"));
        assert_eq!(result.tool_name, GET_HELP_TEXT);
    }
}

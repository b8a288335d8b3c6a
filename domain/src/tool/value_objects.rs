//! Tool domain value objects: result and error types
//!
//! Every tool execution produces a [`ToolResult`]. A harvest always
//! succeeds from the tool's point of view: its text, error wording included,
//! is handed to the model. Only malformed calls (unknown tool, bad
//! arguments) produce a [`ToolError`].

use crate::harvest::{HelpOutcome, HelpResult};
use serde::{Deserialize, Serialize};

/// Error raised by the tool layer itself, before the harvester runs.
///
/// | Code | Description |
/// |------|-------------|
/// | `INVALID_ARGUMENT` | Missing/wrong parameters |
/// | `NOT_FOUND` | Unknown tool name |
/// | `EXECUTION_FAILED` | Runtime failure outside the harvester contract |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            "NOT_FOUND",
            format!("Resource not found: {}", resource.into()),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool execution, carrying output or error information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the tool call itself was well-formed and ran
    pub success: bool,
    /// Output content (for successful execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Metadata about the execution
    #[serde(default)]
    pub metadata: ToolResultMetadata,
}

/// Structured metadata about tool execution, used for progress display
/// and the conversation log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Number of bytes returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    /// How the underlying harvest ended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harvest: Option<HelpOutcome>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        let output = output.into();
        Self {
            tool_name: tool_name.into(),
            success: true,
            metadata: ToolResultMetadata {
                bytes: Some(output.len()),
                ..Default::default()
            },
            output: Some(output),
            error: None,
        }
    }

    /// Wrap a harvest. Always a success: the harvest text is the payload.
    pub fn from_harvest(tool_name: impl Into<String>, harvest: HelpResult) -> Self {
        let HelpResult { outcome, text } = harvest;
        let mut result = Self::success(tool_name, text);
        result.metadata.harvest = Some(outcome);
        result
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Add duration metadata
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.metadata.duration_ms = Some(duration_ms);
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// True when the call ran and the harvest captured real help text
    pub fn harvested_cleanly(&self) -> bool {
        self.success
            && self
                .metadata
                .harvest
                .as_ref()
                .is_none_or(|outcome| *outcome == HelpOutcome::Captured)
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// Text to hand back to the model: the output, or the error rendered
    /// as a sentence it can react to.
    pub fn content_for_model(&self) -> String {
        match (&self.output, &self.error) {
            (Some(output), _) => output.clone(),
            (None, Some(error)) => format!("Error: {}", error.message),
            (None, None) => String::new(),
        }
    }
}

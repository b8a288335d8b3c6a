//! Execution parameters: reasoning loop control.

use serde::{Deserialize, Serialize};

/// Controls how long [`ExplainToolUseCase`](crate::use_cases::explain::ExplainToolUseCase)
/// may keep calling tools for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum model round-trips that may request tools.
    pub max_tool_turns: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self { max_tool_turns: 10 }
    }
}

impl ExecutionParams {
    pub fn with_max_tool_turns(mut self, max: usize) -> Self {
        self.max_tool_turns = max;
        self
    }
}

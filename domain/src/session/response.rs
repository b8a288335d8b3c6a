//! Structured model responses.
//!
//! A chat completion comes back as an ordered list of content blocks: text,
//! tool-use requests, or both. The reasoning loop keeps resending while a
//! response carries tool-use blocks.

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single block of content within a model response.
///
/// ```
/// use explainer_domain::session::response::ContentBlock;
///
/// let block = ContentBlock::ToolUse {
///     id: "call_0".to_string(),
///     name: "get_help_text".to_string(),
///     input: [("cli_tool_name".to_string(), serde_json::json!("tar"))]
///         .into_iter().collect(),
/// };
/// assert!(block.as_tool_use().is_some());
/// assert!(block.as_text().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },

    /// A request to invoke one of the advertised capabilities.
    ToolUse {
        /// Backend-assigned id, echoed back with the tool result
        id: String,
        name: String,
        input: HashMap<String, serde_json::Value>,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn as_tool_use(&self) -> Option<(&str, &str, &HashMap<String, serde_json::Value>)> {
        match self {
            ContentBlock::ToolUse { id, name, input } => Some((id, name, input)),
            _ => None,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    ToolUse,
    /// Hit the token limit; the text may be cut short.
    MaxTokens,
    Other(String),
}

impl StopReason {
    /// Map an OpenAI-style `finish_reason`.
    pub fn from_finish_reason(reason: &str) -> Self {
        match reason {
            "stop" => StopReason::EndTurn,
            "tool_calls" | "function_call" => StopReason::ToolUse,
            "length" => StopReason::MaxTokens,
            other => StopReason::Other(other.to_string()),
        }
    }
}

/// A structured response from the model
#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<StopReason>,
    /// Model identifier echoed by the backend, if any
    pub model: Option<String>,
}

impl LlmResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }
    }

    /// All text blocks joined together.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Tool-use blocks as [`ToolCall`]s with `native_id` set.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(|b| {
                b.as_tool_use()
                    .map(|(id, name, input)| ToolCall::from_native(id, name, input.clone()))
            })
            .collect()
    }

    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_is_final() {
        let response = LlmResponse::from_text("tar -xzf archive.tar.gz");
        assert_eq!(response.text_content(), "tar -xzf archive.tar.gz");
        assert!(!response.has_tool_calls());
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
    }

    #[test]
    fn tool_calls_keep_order_and_ids() {
        let response = LlmResponse {
            content: vec![
                ContentBlock::text("Checking the help. "),
                ContentBlock::ToolUse {
                    id: "call_a".to_string(),
                    name: "get_help_text".to_string(),
                    input: [("cli_tool_name".to_string(), serde_json::json!("git"))]
                        .into_iter()
                        .collect(),
                },
                ContentBlock::ToolUse {
                    id: "call_b".to_string(),
                    name: "get_man_page".to_string(),
                    input: [("cli_tool_name".to_string(), serde_json::json!("git"))]
                        .into_iter()
                        .collect(),
                },
            ],
            stop_reason: Some(StopReason::ToolUse),
            model: Some("llama3.2".to_string()),
        };

        let calls = response.tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].native_id.as_deref(), Some("call_a"));
        assert_eq!(calls[1].tool_name, "get_man_page");
        assert_eq!(response.text_content(), "Checking the help. ");
    }

    #[test]
    fn finish_reason_mapping() {
        assert_eq!(StopReason::from_finish_reason("stop"), StopReason::EndTurn);
        assert_eq!(
            StopReason::from_finish_reason("tool_calls"),
            StopReason::ToolUse
        );
        assert_eq!(
            StopReason::from_finish_reason("length"),
            StopReason::MaxTokens
        );
        assert_eq!(
            StopReason::from_finish_reason("content_filter"),
            StopReason::Other("content_filter".to_string())
        );
    }
}

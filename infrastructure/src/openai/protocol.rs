//! Chat completions wire types.
//!
//! Only the fields the explainer sends or reads are modelled; unknown
//! response fields are ignored.

use super::error::{OpenAiError, Result};
use explainer_domain::{ContentBlock, LlmResponse, Message, Role, StopReason};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Value>,
    pub stream: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    /// `null` is allowed for assistant messages that only carry tool calls
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<WireToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireToolCall {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub kind: String,
    pub function: WireFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunction {
    pub name: String,
    /// A JSON-encoded string per the OpenAI API; some backends send an
    /// object instead.
    #[serde(default)]
    pub arguments: Value,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: WireMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ModelsResponse {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ModelEntry {
    pub id: String,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        let tool_calls: Vec<WireToolCall> = message
            .tool_calls
            .iter()
            .map(|call| WireToolCall {
                id: call.native_id.clone().unwrap_or_default(),
                kind: function_type(),
                function: WireFunction {
                    name: call.tool_name.clone(),
                    arguments: Value::String(
                        serde_json::to_string(&call.arguments).unwrap_or_else(|_| "{}".into()),
                    ),
                },
            })
            .collect();

        let content = if message.content.is_empty() && !tool_calls.is_empty() {
            None
        } else {
            Some(message.content.clone())
        };

        Self {
            role: message.role,
            content,
            tool_calls,
            tool_call_id: message.tool_call_id.clone(),
        }
    }
}

/// Wrap provider-neutral tool schemas (`name`, `description`,
/// `input_schema`) in the `{"type": "function"}` envelope.
pub fn function_tools(schemas: &[Value]) -> Vec<Value> {
    schemas
        .iter()
        .map(|schema| {
            serde_json::json!({
                "type": "function",
                "function": {
                    "name": schema["name"],
                    "description": schema["description"],
                    "parameters": schema["input_schema"],
                }
            })
        })
        .collect()
}

/// Decode tool-call arguments, accepting both the string and object forms.
/// An empty string means "no arguments".
fn decode_arguments(name: &str, arguments: Value) -> Result<HashMap<String, Value>> {
    let value = match arguments {
        Value::String(raw) if raw.trim().is_empty() => return Ok(HashMap::new()),
        Value::String(raw) => {
            serde_json::from_str(&raw).map_err(|_| OpenAiError::InvalidToolArguments {
                name: name.to_string(),
                raw: raw.clone(),
            })?
        }
        Value::Null => return Ok(HashMap::new()),
        other => other,
    };

    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(OpenAiError::InvalidToolArguments {
            name: name.to_string(),
            raw: other.to_string(),
        }),
    }
}

impl ChatResponse {
    /// Convert the first choice into a domain response.
    pub fn into_llm_response(self) -> Result<LlmResponse> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or(OpenAiError::NoChoices)?;

        let mut content = Vec::new();
        if let Some(text) = choice.message.content.filter(|t| !t.is_empty()) {
            content.push(ContentBlock::text(text));
        }
        for (i, call) in choice.message.tool_calls.into_iter().enumerate() {
            let input = decode_arguments(&call.function.name, call.function.arguments)?;
            let id = if call.id.is_empty() {
                format!("call_{}", i)
            } else {
                call.id
            };
            content.push(ContentBlock::ToolUse {
                id,
                name: call.function.name,
                input,
            });
        }

        let stop_reason = choice
            .finish_reason
            .as_deref()
            .map(StopReason::from_finish_reason);

        Ok(LlmResponse {
            content,
            stop_reason,
            model: self.model,
        })
    }
}

//! LLM Gateway port
//!
//! Defines the interface for talking to the model backend.

use async_trait::async_trait;
use explainer_domain::{LlmResponse, Message, Model};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The model answered, but not in a shape the loop can use
    /// (e.g. tool-call arguments that are not a JSON object).
    #[error("Unexpected model behavior: {0}")]
    UnexpectedModelBehavior(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Timeout")]
    Timeout,
}

/// Gateway for LLM communication
///
/// The gateway is stateless: every call carries the whole transcript.
/// Implementations live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the conversation so far together with the tool schemas the
    /// model may call.
    async fn send_with_tools(
        &self,
        model: &Model,
        messages: &[Message],
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError>;

    /// Models the backend can serve
    async fn available_models(&self) -> Result<Vec<Model>, GatewayError>;
}

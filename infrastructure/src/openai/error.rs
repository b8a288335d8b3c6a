//! Error types for the OpenAI-compatible adapter

use explainer_application::ports::llm_gateway::GatewayError;
use thiserror::Error;

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, OpenAiError>;

/// Errors that can occur when talking to a chat completions endpoint
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    Parse { error: String, raw: String },

    #[error("Response contained no choices")]
    NoChoices,

    #[error("Tool call '{name}' has arguments that are not a JSON object: {raw}")]
    InvalidToolArguments { name: String, raw: String },
}

impl From<OpenAiError> for GatewayError {
    fn from(err: OpenAiError) -> Self {
        match err {
            OpenAiError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            OpenAiError::Http(e) => GatewayError::ConnectionError(e.to_string()),
            OpenAiError::Status { status: 404, body } if body.contains("model") => {
                GatewayError::ModelNotAvailable(body)
            }
            OpenAiError::Status { status, body } => GatewayError::RequestFailed {
                status,
                message: body,
            },
            e @ (OpenAiError::Parse { .. } | OpenAiError::NoChoices) => {
                GatewayError::MalformedResponse(e.to_string())
            }
            e @ OpenAiError::InvalidToolArguments { .. } => {
                GatewayError::UnexpectedModelBehavior(e.to_string())
            }
        }
    }
}

//! OpenAI-compatible chat completions adapter (Ollama, OpenAI, vLLM, ...)
//!
//! - [`gateway::OpenAiLlmGateway`]: implements the `LlmGateway` port over HTTP
//! - [`protocol`]: wire types and conversion to/from domain messages
//! - [`error::OpenAiError`]: adapter-level failures

pub mod error;
pub mod gateway;
pub mod protocol;

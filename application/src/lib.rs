//! Application layer for cli-explainer
//!
//! This crate contains the reasoning loop and the ports it talks through.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{ExplainProgressNotifier, NoProgress},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::explain::{ExplainError, ExplainInput, ExplainOutput, ExplainToolUseCase};

//! Infrastructure layer for cli-explainer
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the help-text harvester, the harvest tool
//! executor, the OpenAI-compatible gateway, conversation logging and
//! configuration file loading.

pub mod config;
pub mod harvest;
pub mod logging;
pub mod openai;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileConfig, FileHarvestConfig,
    FileLoggingConfig, FileModelConfig, FileOutputConfig, FileProviderConfig, FileReplConfig,
};
pub use harvest::Harvester;
pub use logging::JsonlConversationLogger;
pub use openai::{
    error::{OpenAiError, Result},
    gateway::{OpenAiLlmGateway, ProviderSettings},
};
pub use tools::{HarvestToolExecutor, JsonSchemaToolConverter, default_tool_spec};

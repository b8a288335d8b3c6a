//! Structured conversation logging.
//!
//! Provides [`JsonlConversationLogger`], the JSONL adapter for the
//! [`ConversationLogger`](explainer_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;

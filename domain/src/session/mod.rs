//! Conversation session domain.
//!
//! - [`entities::Transcript`]: ordered message history of one tool session
//! - [`entities::Message`]: a single message, possibly carrying tool calls
//! - [`response::LlmResponse`]: structured model reply (text + tool use)

pub mod entities;
pub mod response;

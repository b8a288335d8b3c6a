//! Domain layer for cli-explainer
//!
//! This crate contains the core types of the explainer: what a help request
//! looks like, what the harvester hands back, how the reasoning loop calls
//! tools, and how a conversation transcript is shaped.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Harvest
//!
//! A [`HelpRequest`] names a CLI tool, an optional subcommand and a
//! [`HarvestKind`] (`-h`/`--help` output or the `man` page). Executing it
//! always yields a [`HelpResult`]: either the captured text or a descriptive
//! error string. Failures never escape as errors.
//!
//! ## Capability interface
//!
//! The reasoning component sees the harvester only through named tools
//! ([`ToolDefinition`]) registered in a [`ToolSpec`] and invoked with a
//! [`ToolCall`].
//!
//! ## Transcript
//!
//! The [`Transcript`] is the ordered message history of one tool session.

pub mod core;
pub mod harvest;
pub mod prompt;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use core::{error::DomainError, model::Model, question::Question};
pub use harvest::{
    HarvestKind, HelpFlag, HelpOutcome, HelpRequest, HelpResult, ToolQuery, discover_subcommands,
};
pub use prompt::ExplainerPromptTemplate;
pub use session::{
    entities::{Message, Role, Transcript},
    response::{ContentBlock, LlmResponse, StopReason},
};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};

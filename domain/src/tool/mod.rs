//! Tool domain module
//!
//! The capability interface through which the reasoning component reaches
//! the harvester. Every capability is described by a [`ToolDefinition`]
//! (name, parameters), invoked via a [`ToolCall`], and answered with a
//! [`ToolResult`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (registry)   │    │ (invocation) │    │ (output)     │
//! └──────┬───────┘    └──────────────┘    └──────────────┘
//!        │
//!        ├─ aliases: "get_cli_help" → "get_help_text"
//!        └─ tools:   "get_help_text" → ToolDefinition
//! ```
//!
//! # Tool Name Aliases
//!
//! Small local models frequently call tools by a near-miss name. The alias
//! table in [`ToolSpec`] maps those names to the canonical tool without an
//! extra model round-trip.
//!
//! # Architecture
//!
//! - **Domain** (this module): pure definitions, no I/O
//! - **Application** (`ToolExecutorPort`): port trait for tool execution
//! - **Infrastructure** (`HarvestToolExecutor`): runs the harvester

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult, ToolResultMetadata};

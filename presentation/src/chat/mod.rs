//! Interactive chat module
//!
//! Provides the two-level conversational loop: pick a tool, then ask
//! questions about it.

mod reader;
mod repl;

pub use reader::{LineReader, ReadOutcome, ReedlineReader};
pub use repl::{ExplainerRepl, ReplState};

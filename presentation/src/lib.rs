//! Presentation layer for cli-explainer
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive explainer REPL.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ExplainerRepl, LineReader, ReadOutcome, ReedlineReader, ReplState};
pub use cli::commands::{Cli, Command};
pub use config::ReplConfig;
pub use output::console::{ConsoleFormatter, configure_color};
pub use progress::reporter::{ProgressReporter, SimpleProgress};

//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Tool name cannot be empty")]
    EmptyToolName,

    #[error("Invalid tool name '{0}': must be a single word without whitespace")]
    InvalidToolName(String),

    #[error("Invalid tool name '{0}': cannot start with '-'")]
    OptionLikeToolName(String),

    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Invalid help flag: {0} (expected \"-h\" or \"--help\")")]
    InvalidHelpFlag(String),
}

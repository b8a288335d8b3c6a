//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the language model answering questions
//! - [`question::Question`]: a validated question about a CLI tool
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod question;

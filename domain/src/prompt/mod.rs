//! Prompt domain
//!
//! System prompts handed to the reasoning loop.

mod explainer;

pub use explainer::ExplainerPromptTemplate;

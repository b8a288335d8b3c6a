//! Use cases (application services)

pub mod explain;
mod tool_helpers;

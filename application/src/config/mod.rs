//! Application-level configuration.
//!
//! - [`ExecutionParams`]: reasoning loop control (tool turn limit)

pub mod execution_params;

pub use execution_params::ExecutionParams;

//! Configuration file loading for cli-explainer
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CLI_EXPLAINER_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./cli-explainer.toml` or `./.cli-explainer.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/cli-explainer/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileConfig, FileHarvestConfig, FileLoggingConfig,
    FileModelConfig, FileOutputConfig, FileProviderConfig, FileReplConfig,
};
pub use loader::ConfigLoader;

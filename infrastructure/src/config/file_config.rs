//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into runtime types by the
//! helpers at the bottom of this file.

use crate::harvest::{DEFAULT_MAX_OUTPUT_BYTES, DEFAULT_TIMEOUT_SECS, Harvester};
use crate::openai::gateway::ProviderSettings;
use explainer_application::ExecutionParams;
use explainer_domain::{HelpFlag, Model};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("harvest.help_flag must be \"-h\" or \"--help\", got \"{0}\"")]
    InvalidHelpFlag(String),

    #[error("agent.max_tool_turns cannot be 0")]
    ZeroToolTurns,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("provider.request_timeout_seconds cannot be 0")]
    InvalidRequestTimeout,

    #[error("harvest.max_output_bytes cannot be 0")]
    ZeroOutputCap,
}

/// Raw provider configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the chat completions backend; wins over `base_url_env`
    pub base_url: Option<String>,
    /// Environment variable consulted when `base_url` is unset
    pub base_url_env: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Literal API key (prefer `api_key_env`)
    pub api_key: Option<String>,
    pub request_timeout_seconds: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            base_url_env: "OLLAMA_API_BASE".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            request_timeout_seconds: 600,
        }
    }
}

/// Raw model configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    pub name: Model,
}

/// Raw harvester configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHarvestConfig {
    /// `-h` or `--help`
    pub help_flag: String,
    /// Per-call timeout; `0` disables it
    pub timeout_seconds: Option<u64>,
    pub max_output_bytes: usize,
    pub man_command: String,
}

impl Default for FileHarvestConfig {
    fn default() -> Self {
        Self {
            help_flag: HelpFlag::default().to_string(),
            timeout_seconds: Some(DEFAULT_TIMEOUT_SECS),
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            man_command: "man".to_string(),
        }
    }
}

/// Raw agent configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Maximum model round-trips that may request tools
    pub max_tool_turns: usize,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            max_tool_turns: ExecutionParams::default().max_tool_turns,
        }
    }
}

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL conversation log; disabled when unset
    pub conversation_log: Option<String>,
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub provider: FileProviderConfig,
    pub model: FileModelConfig,
    pub harvest: FileHarvestConfig,
    pub agent: FileAgentConfig,
    pub repl: FileReplConfig,
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Collect every problem with the configuration.
    ///
    /// Problems are reported rather than fatal; the conversion helpers fall
    /// back to defaults for the offending values.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.harvest.help_flag.parse::<HelpFlag>().is_err() {
            issues.push(ConfigValidationError::InvalidHelpFlag(
                self.harvest.help_flag.clone(),
            ));
        }
        if self.agent.max_tool_turns == 0 {
            issues.push(ConfigValidationError::ZeroToolTurns);
        }
        if self.model.name.as_str().trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName);
        }
        if self.provider.request_timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidRequestTimeout);
        }
        if self.harvest.max_output_bytes == 0 {
            issues.push(ConfigValidationError::ZeroOutputCap);
        }

        issues
    }

    /// Configured model, or the default when the name is blank
    pub fn model(&self) -> Model {
        if self.model.name.as_str().trim().is_empty() {
            Model::default()
        } else {
            self.model.name.clone()
        }
    }

    pub fn harvester(&self) -> Harvester {
        let help_flag = self.harvest.help_flag.parse().unwrap_or_default();
        let timeout = self
            .harvest
            .timeout_seconds
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs);
        let max_output_bytes = match self.harvest.max_output_bytes {
            0 => DEFAULT_MAX_OUTPUT_BYTES,
            n => n,
        };

        Harvester::new()
            .with_help_flag(help_flag)
            .with_timeout(timeout)
            .with_max_output_bytes(max_output_bytes)
            .with_man_command(self.harvest.man_command.clone())
    }

    pub fn execution_params(&self) -> ExecutionParams {
        let turns = match self.agent.max_tool_turns {
            0 => ExecutionParams::default().max_tool_turns,
            n => n,
        };
        ExecutionParams::default().with_max_tool_turns(turns)
    }

    /// Resolve provider settings, reading the environment variables named in
    /// `[provider]`. `base_url_override` (the `--base-url` flag) wins.
    pub fn provider_settings(&self, base_url_override: Option<&str>) -> ProviderSettings {
        let provider = &self.provider;
        let explicit = base_url_override.or(provider.base_url.as_deref());
        let api_key = provider
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| {
                std::env::var(&provider.api_key_env)
                    .ok()
                    .filter(|k| !k.is_empty())
            });
        let timeout_secs = match provider.request_timeout_seconds {
            0 => ProviderSettings::default().request_timeout.as_secs(),
            n => n,
        };

        ProviderSettings {
            base_url: ProviderSettings::resolve_base_url(explicit, &provider.base_url_env),
            api_key,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Conversation log path with a leading `~/` expanded
    pub fn conversation_log_path(&self) -> Option<PathBuf> {
        self.logging.conversation_log.as_deref().map(expand_home)
    }

    /// History file path with a leading `~/` expanded
    pub fn history_path(&self) -> Option<PathBuf> {
        self.repl.history_file.as_deref().map(expand_home)
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
base_url = "http://gpu-box:11434"
api_key_env = "MY_KEY"
request_timeout_seconds = 120

[model]
name = "qwen2.5-coder"

[harvest]
help_flag = "--help"
timeout_seconds = 5
max_output_bytes = 1024
man_command = "/usr/bin/man"

[agent]
max_tool_turns = 4

[repl]
show_progress = false
history_file = "~/.local/share/cli-explainer/history.txt"

[output]
color = false

[logging]
conversation_log = "/tmp/conversation.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.base_url.as_deref(), Some("http://gpu-box:11434"));
        assert_eq!(config.provider.api_key_env, "MY_KEY");
        assert_eq!(config.provider.base_url_env, "OLLAMA_API_BASE");
        assert_eq!(config.model.name.as_str(), "qwen2.5-coder");
        assert_eq!(config.harvest.help_flag, "--help");
        assert_eq!(config.agent.max_tool_turns, 4);
        assert!(!config.repl.show_progress);
        assert!(!config.output.color);
        assert_eq!(
            config.conversation_log_path(),
            Some(PathBuf::from("/tmp/conversation.jsonl"))
        );
        assert!(config.validate().is_empty());

        let harvester = config.harvester();
        assert_eq!(harvester.help_flag(), HelpFlag::Long);
        assert_eq!(config.execution_params().max_tool_turns, 4);

        let settings = config.provider_settings(None);
        assert_eq!(settings.base_url, "http://gpu-box:11434");
        assert_eq!(settings.request_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[agent]\nmax_tool_turns = 2\n").unwrap();
        assert_eq!(config.agent.max_tool_turns, 2);
        assert_eq!(config.model(), Model::default());
        assert_eq!(config.harvest.help_flag, "-h");
        assert_eq!(config.harvest.timeout_seconds, Some(30));
        assert!(config.repl.show_progress);
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn test_zero_harvest_timeout_disables_it() {
        let config: FileConfig = toml::from_str("[harvest]\ntimeout_seconds = 0\n").unwrap();
        assert_eq!(config.harvester().timeout(), None);

        let config: FileConfig = toml::from_str("[harvest]\nhelp_flag = \"-h\"\n").unwrap();
        assert_eq!(config.harvester().timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_collects_every_issue() {
        let mut config = FileConfig::default();
        config.harvest.help_flag = "/?".to_string();
        config.agent.max_tool_turns = 0;
        config.model.name = Model::from("  ");

        let issues = config.validate();
        assert_eq!(
            issues,
            vec![
                ConfigValidationError::InvalidHelpFlag("/?".to_string()),
                ConfigValidationError::ZeroToolTurns,
                ConfigValidationError::EmptyModelName,
            ]
        );

        // Conversions fall back to defaults for invalid values
        assert_eq!(config.harvester().help_flag(), HelpFlag::Short);
        assert_eq!(config.execution_params().max_tool_turns, 10);
        assert_eq!(config.model(), Model::default());
    }

    #[test]
    fn test_base_url_flag_overrides_file() {
        let mut config = FileConfig::default();
        config.provider.base_url = Some("http://from-file:11434".to_string());
        let settings = config.provider_settings(Some("http://from-flag:8000/v1"));
        assert_eq!(settings.base_url, "http://from-flag:8000/v1");
    }

    #[test]
    fn test_literal_api_key() {
        let mut config = FileConfig::default();
        config.provider.api_key = Some("sk-test".to_string());
        config.provider.api_key_env = "CLI_EXPLAINER_TEST_UNSET_KEY".to_string();
        assert_eq!(
            config.provider_settings(None).api_key.as_deref(),
            Some("sk-test")
        );
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/var/log/x"), PathBuf::from("/var/log/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/h.txt"), home.join("h.txt"));
        }
    }
}

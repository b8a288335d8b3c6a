//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for cli-explainer
#[derive(Parser, Debug)]
#[command(name = "cli-explainer")]
#[command(author, version, about = "Explains command-line tools by reading their own help text")]
#[command(long_about = r#"
cli-explainer answers questions about command-line tools. A language model
reads the tool's `-h` output or man page on demand and explains it.

Interactive mode first asks for a tool name, then answers questions about
that tool until you type 'switch' (pick another tool) or 'quit'.

Configuration files are loaded from (in priority order):
1. CLI_EXPLAINER_* environment variables
2. --config <path>               Explicit config file
3. ./cli-explainer.toml          Project-level config
4. ~/.config/cli-explainer/config.toml   Global config

The model backend is any OpenAI-compatible server; OLLAMA_API_BASE
selects it (default http://localhost:11434/v1).

Example:
  cli-explainer
  cli-explainer --tool tar
  cli-explainer "How do I undo the last git commit?"
  cli-explainer harvest git --subcommand commit
  cli-explainer -m qwen2.5 --base-url http://gpu-box:11434
"#)]
pub struct Cli {
    /// Question answered before the interactive session starts; the model
    /// infers which tool it is about
    pub question: Option<String>,

    /// Start the session with this tool already selected
    #[arg(short, long, value_name = "NAME")]
    pub tool: Option<String>,

    /// Model to use (default: llama3.2)
    #[arg(short, long, value_name = "MODEL", global = true)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible backend
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands that do not start a conversation
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print a tool's raw help text or man page without contacting a model
    Harvest {
        /// Tool to harvest
        tool: String,

        /// Subcommand whose help to print (e.g. "commit" or "remote add")
        #[arg(short, long)]
        subcommand: Option<String>,

        /// Print the man page instead of the help output
        #[arg(long, conflicts_with_all = ["subcommand", "recursive"])]
        man: bool,

        /// Also harvest every subcommand listed in the help output
        #[arg(short, long)]
        recursive: bool,

        /// Ask for help with `--help` instead of `-h`
        #[arg(long)]
        long_flag: bool,
    },

    /// List the models the backend serves
    Models,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_question_and_tool() {
        let cli = Cli::try_parse_from([
            "cli-explainer",
            "--tool",
            "tar",
            "-vv",
            "how do I extract a .tgz?",
        ])
        .unwrap();
        assert_eq!(cli.tool.as_deref(), Some("tar"));
        assert_eq!(cli.question.as_deref(), Some("how do I extract a .tgz?"));
        assert_eq!(cli.verbose, 2);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_harvest_subcommand() {
        let cli = Cli::try_parse_from([
            "cli-explainer",
            "harvest",
            "git",
            "--subcommand",
            "remote add",
            "--long-flag",
        ])
        .unwrap();
        assert!(cli.question.is_none());
        assert_eq!(
            cli.command,
            Some(Command::Harvest {
                tool: "git".to_string(),
                subcommand: Some("remote add".to_string()),
                man: false,
                recursive: false,
                long_flag: true,
            })
        );
    }

    #[test]
    fn test_man_conflicts_with_recursive() {
        assert!(Cli::try_parse_from(["cli-explainer", "harvest", "tar", "--man", "-r"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["cli-explainer", "models", "--base-url", "http://box:8000"])
                .unwrap();
        assert_eq!(cli.command, Some(Command::Models));
        assert_eq!(cli.base_url.as_deref(), Some("http://box:8000"));
    }
}

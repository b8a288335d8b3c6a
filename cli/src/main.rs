//! CLI entrypoint for cli-explainer
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use explainer_application::{ExplainToolUseCase, LlmGateway};
use explainer_domain::{HelpFlag, Model, ToolQuery, discover_subcommands};
use explainer_infrastructure::{
    ConfigLoader, FileConfig, HarvestToolExecutor, JsonSchemaToolConverter,
    JsonlConversationLogger, OpenAiLlmGateway,
};
use explainer_presentation::{
    Cli, Command, ConsoleFormatter, ExplainerRepl, ReedlineReader, ReplConfig, configure_color,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    for issue in config.validate() {
        eprintln!("{}", ConsoleFormatter::warning(issue));
    }
    configure_color(config.output.color);

    info!("Starting cli-explainer");

    match cli.command.clone() {
        Some(Command::Harvest {
            tool,
            subcommand,
            man,
            recursive,
            long_flag,
        }) => run_harvest(&config, &tool, subcommand.as_deref(), man, recursive, long_flag),
        Some(Command::Models) => run_models(&cli, &config).await,
        None => run_chat(cli, config).await,
    }
}

fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn run_harvest(
    config: &FileConfig,
    tool: &str,
    subcommand: Option<&str>,
    man: bool,
    recursive: bool,
    long_flag: bool,
) -> Result<()> {
    let tool = ToolQuery::parse(tool)?;
    let mut harvester = config.harvester();
    if long_flag {
        harvester = harvester.with_help_flag(HelpFlag::Long);
    }

    if man {
        println!("{}", harvester.fetch_manpage(&tool).text());
        return Ok(());
    }

    let top = harvester.fetch_help(&tool, subcommand);
    println!("{}", top.text());

    if recursive {
        let subcommands = discover_subcommands(top.text());
        info!("Found {} subcommands of {}", subcommands.len(), tool);
        if subcommands.is_empty() {
            eprintln!("{}", ConsoleFormatter::warning("no subcommands found in help output"));
        }
        for sub in subcommands {
            let words = match subcommand {
                Some(parent) => format!("{} {}", parent, sub),
                None => sub,
            };
            println!(
                "{}",
                ConsoleFormatter::harvest_heading(&format!("{} {}", tool, words))
            );
            println!("{}", harvester.fetch_help(&tool, Some(&words)).text());
        }
    }

    Ok(())
}

fn selected_model(cli: &Cli, config: &FileConfig) -> Model {
    cli.model
        .as_deref()
        .map(Model::from)
        .unwrap_or_else(|| config.model())
}

async fn run_models(cli: &Cli, config: &FileConfig) -> Result<()> {
    let settings = config.provider_settings(cli.base_url.as_deref());
    let gateway = OpenAiLlmGateway::new(settings)?;

    let models = gateway
        .available_models()
        .await
        .with_context(|| format!("Failed to list models from {}", gateway.base_url()))?;
    println!("{}", ConsoleFormatter::models(&models, &selected_model(cli, config)));
    Ok(())
}

async fn run_chat(cli: Cli, config: FileConfig) -> Result<()> {
    let initial_tool = cli.tool.as_deref().map(ToolQuery::parse).transpose()?;
    let model = selected_model(&cli, &config);

    // === Dependency Injection ===
    let settings = config.provider_settings(cli.base_url.as_deref());
    info!("Using backend {} with model {}", settings.base_url, model);
    let gateway = Arc::new(OpenAiLlmGateway::new(settings)?);
    let tool_executor = Arc::new(HarvestToolExecutor::new(config.harvester()));
    let tool_schema = Arc::new(JsonSchemaToolConverter);

    let mut use_case = ExplainToolUseCase::new(gateway, tool_executor, tool_schema);
    if let Some(path) = config.conversation_log_path() {
        match JsonlConversationLogger::new(&path) {
            Some(logger) => {
                info!("Logging conversation to {}", logger.path().display());
                use_case = use_case.with_conversation_logger(Arc::new(logger));
            }
            None => warn!("Conversation logging disabled"),
        }
    }

    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress && !cli.quiet,
        history_file: config.history_path(),
    };
    let repl = ExplainerRepl::new(use_case, model)
        .with_execution(config.execution_params())
        .with_progress(repl_config.show_progress);

    if let Some(question) = cli.question.as_deref() {
        repl.answer_once(question, initial_tool.as_ref()).await;
    }

    let mut reader = ReedlineReader::new(repl_config.history_path());
    repl.run(&mut reader, initial_tool).await;
    Ok(())
}

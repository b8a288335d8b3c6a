//! Harvest tool definitions: get_help_text, get_man_page

use explainer_domain::tool::entities::{ToolDefinition, ToolParameter};

pub const GET_HELP_TEXT: &str = "get_help_text";
pub const GET_MAN_PAGE: &str = "get_man_page";

/// Near-miss names models use for the harvest tools
pub const ALIASES: &[(&str, &str)] = &[
    ("get_cli_help", GET_HELP_TEXT),
    ("help", GET_HELP_TEXT),
    ("get_manpage", GET_MAN_PAGE),
    ("man", GET_MAN_PAGE),
];

/// Argument name older prompts used instead of `subcommand`
pub const COMMAND_SYNONYM: &str = "command";

pub fn get_help_text_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_HELP_TEXT,
        "Gets help text for a tool or subcommand using the '-h' flag. \
         Takes the tool name and an optional subcommand.",
    )
    .with_parameter(ToolParameter::new(
        "cli_tool_name",
        "The name of the CLI tool.",
        true,
    ))
    .with_parameter(ToolParameter::new(
        "subcommand",
        "The subcommand to get help for (optional). Nested subcommands may be \
         separated by spaces, e.g. \"remote add\".",
        false,
    ))
}

pub fn get_man_page_definition() -> ToolDefinition {
    ToolDefinition::new(GET_MAN_PAGE, "Gets the man page for a tool.").with_parameter(
        ToolParameter::new("cli_tool_name", "The name of the CLI tool.", true),
    )
}

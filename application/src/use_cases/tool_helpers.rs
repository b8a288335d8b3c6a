//! Shared helpers for tool use cases.

use explainer_domain::tool::entities::ToolCall;

/// Short human-readable form of a harvest call's arguments, e.g.
/// `git commit`.
pub(crate) fn tool_args_preview(call: &ToolCall) -> String {
    let tool = call.get_string("cli_tool_name").unwrap_or_default();
    let subcommand = call
        .get_string("subcommand")
        .or_else(|| call.get_string("command"))
        .unwrap_or_default();
    let preview = format!("{} {}", tool, subcommand);
    truncate_preview(preview.trim(), 50)
}

fn truncate_preview(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

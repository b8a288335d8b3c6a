//! Console output formatting for explanations and harvested text

use colored::Colorize;
use explainer_domain::Model;
use std::io::IsTerminal;

const PANEL_WIDTH: usize = 60;

/// Enable colors only when requested and stdout is a terminal
pub fn configure_color(enabled: bool) {
    colored::control::set_override(enabled && std::io::stdout().is_terminal());
}

/// Formats explainer output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The model's answer inside a titled "Explanation" panel
    pub fn explanation(answer: &str) -> String {
        let title = " Explanation ";
        let top_rule = "─".repeat(PANEL_WIDTH.saturating_sub(title.len() + 2));

        let mut output = format!(
            "{}{}{}\n",
            "╭─".cyan(),
            title.cyan().bold(),
            top_rule.cyan()
        );
        for line in answer.trim_end().lines() {
            output.push_str(&format!("{} {}\n", "│".cyan(), line));
        }
        output.push_str(&format!("{}", format!("╰{}", "─".repeat(PANEL_WIDTH - 1)).cyan()));
        output
    }

    pub fn error(message: impl std::fmt::Display) -> String {
        format!("{} {}", "Error:".red().bold(), message.to_string().red())
    }

    pub fn warning(message: impl std::fmt::Display) -> String {
        format!("{} {}", "Warning:".yellow().bold(), message)
    }

    /// Heading printed before each subcommand in a recursive harvest
    pub fn harvest_heading(title: &str) -> String {
        format!("\n{}\n{}", format!("== {} ==", title).cyan().bold(), "-".repeat(40))
    }

    pub fn models(models: &[Model], current: &Model) -> String {
        if models.is_empty() {
            return "The backend reported no models.".dimmed().to_string();
        }
        models
            .iter()
            .map(|m| {
                if m == current {
                    format!("  * {} {}", m.to_string().bold(), "(selected)".dimmed())
                } else {
                    format!("    {}", m)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn welcome(model: &Model) -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str("╭─────────────────────────────────────────────╮\n");
        output.push_str("│            CLI Explainer - Chat             │\n");
        output.push_str("╰─────────────────────────────────────────────╯\n");
        output.push_str(&format!("{} {}\n\n", "Model:".cyan().bold(), model));
        output.push_str("Commands:\n");
        output.push_str("  switch          - Pick another tool\n");
        output.push_str("  quit, exit, q   - Exit\n");
        output
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

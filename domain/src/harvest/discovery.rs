//! Subcommand discovery in help text.
//!
//! Help output usually lists subcommands under a heading such as
//! `Commands:`, `Subcommands:` or `Available Commands:`, one per indented
//! line:
//!
//! ```text
//! Usage: todo <COMMAND>
//!
//! Commands:
//!   add     Add an item
//!   remove  Remove an item
//!
//! Options:
//!   -h, --help  Print help
//! ```
//!
//! [`discover_subcommands`] reads those sections and returns the first word
//! of each entry. It is a heuristic: anything that does not look like a
//! command word is skipped rather than guessed at.

/// Extract subcommand names from help text, in order of appearance, without
/// duplicates.
pub fn discover_subcommands(help_text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut in_section = false;

    for line in help_text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let indented = line.starts_with(char::is_whitespace);
        if !indented {
            in_section = is_command_heading(line);
            continue;
        }

        if !in_section {
            continue;
        }

        if let Some(name) = command_word(line) {
            if !found.iter().any(|f| f == name) {
                found.push(name.to_string());
            }
        }
    }

    found
}

fn is_command_heading(line: &str) -> bool {
    let heading = line.trim().to_lowercase();
    heading.ends_with(':') && heading.contains("command")
}

/// First word of an entry line, if it looks like a command name.
///
/// `build, b    Compile` yields `build`; option lines (`-v, --verbose`) and
/// prose are rejected.
fn command_word(line: &str) -> Option<&str> {
    let word = line.split_whitespace().next()?.trim_end_matches(',');
    let mut chars = word.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphanumeric() {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')) {
        Some(word)
    } else {
        None
    }
}

//! Harvest result value object

use serde::{Deserialize, Serialize};

/// How a harvest ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HelpOutcome {
    /// The process exited successfully; the text is its stdout
    Captured,
    /// The process exited with a failure status (`None` when killed by a signal)
    NonZeroExit { code: Option<i32> },
    /// The requested program is not on the search path
    NotFound,
    /// `man` itself is not installed
    ManUnavailable,
    /// The process was killed after running too long
    TimedOut { seconds: u64 },
    /// The process could not be started for another reason
    SpawnFailed,
}

/// Result of a harvest: always text, never an error.
///
/// The text is what the reasoning component sees. The [`HelpOutcome`] only
/// feeds logging and progress display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpResult {
    pub outcome: HelpOutcome,
    pub text: String,
}

impl HelpResult {
    /// Successful capture of standard output
    pub fn captured(stdout: impl Into<String>) -> Self {
        Self {
            outcome: HelpOutcome::Captured,
            text: stdout.into(),
        }
    }

    /// Help invocation exited non-zero.
    ///
    /// Many tools print usage on stdout and still fail on `-h` (git exits
    /// 129), so any stdout is kept after the error line.
    pub fn help_failed(code: Option<i32>, stderr: &str, stdout: &str) -> Self {
        let mut text = Self::error_line("Error", code, stderr);
        if !stdout.trim().is_empty() {
            text.push_str("\n\n");
            text.push_str(stdout);
        }
        Self {
            outcome: HelpOutcome::NonZeroExit { code },
            text,
        }
    }

    /// `man` exited non-zero (typically "No manual entry for ...")
    pub fn manpage_failed(code: Option<i32>, stderr: &str) -> Self {
        Self {
            outcome: HelpOutcome::NonZeroExit { code },
            text: Self::error_line("Error getting man page", code, stderr),
        }
    }

    pub fn not_found(tool: &str) -> Self {
        Self {
            outcome: HelpOutcome::NotFound,
            text: format!("Error: Command '{}' not found.", tool),
        }
    }

    pub fn man_unavailable() -> Self {
        Self {
            outcome: HelpOutcome::ManUnavailable,
            text: "Error: 'man' command not found.  Is it installed?".to_string(),
        }
    }

    pub fn timed_out(command_line: &str, seconds: u64) -> Self {
        Self {
            outcome: HelpOutcome::TimedOut { seconds },
            text: format!(
                "Error: Command '{}' timed out after {} seconds",
                command_line, seconds
            ),
        }
    }

    pub fn spawn_failed(program: &str, error: impl std::fmt::Display) -> Self {
        Self {
            outcome: HelpOutcome::SpawnFailed,
            text: format!("Error: failed to run '{}': {}", program, error),
        }
    }

    /// True only when the process exited successfully
    pub fn is_success(&self) -> bool {
        self.outcome == HelpOutcome::Captured
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    fn error_line(prefix: &str, code: Option<i32>, stderr: &str) -> String {
        let stderr = stderr.trim_end();
        if !stderr.is_empty() {
            return format!("{}: {}", prefix, stderr);
        }
        match code {
            Some(code) => format!("{}: exited with status {}", prefix, code),
            None => format!("{}: terminated by signal", prefix),
        }
    }
}

impl std::fmt::Display for HelpResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

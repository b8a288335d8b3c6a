//! Progress reporting for the reasoning loop

use colored::Colorize;
use explainer_application::ExplainProgressNotifier;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner that shows which harvest call is running.
///
/// Created once per question; the spinner appears on the first model
/// request and is cleared when the question finishes.
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        let Ok(mut guard) = self.spinner.lock() else {
            return;
        };
        let spinner = guard.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        f(spinner);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplainProgressNotifier for ProgressReporter {
    fn on_model_request(&self, turn: usize) {
        self.with_spinner(|pb| {
            if turn == 0 {
                pb.set_message("Thinking...");
            } else {
                pb.set_message(format!("Thinking... (turn {})", turn + 1));
            }
        });
    }

    fn on_tool_call(&self, tool_name: &str, args_preview: &str) {
        self.with_spinner(|pb| {
            pb.set_message(format!("Running {} {}", tool_name.cyan(), args_preview.dimmed()));
        });
    }

    fn on_tool_result(&self, tool_name: &str, clean: bool, duration_ms: u64) {
        self.with_spinner(|pb| {
            let mark = if clean { "v".green() } else { "x".red() };
            pb.println(format!("  {} {} ({}ms)", mark, tool_name, duration_ms));
        });
    }

    fn on_turn_limit(&self, max_turns: usize) {
        self.with_spinner(|pb| {
            pb.println(format!(
                "  {} stopped after {} tool turns",
                "!".yellow(),
                max_turns
            ));
        });
    }

    fn on_finished(&self) {
        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

/// Plain-line progress for non-interactive output (no spinner)
pub struct SimpleProgress;

impl ExplainProgressNotifier for SimpleProgress {
    fn on_tool_call(&self, tool_name: &str, args_preview: &str) {
        eprintln!("{} {} {}", "->".cyan(), tool_name.bold(), args_preview);
    }

    fn on_tool_result(&self, tool_name: &str, clean: bool, duration_ms: u64) {
        if clean {
            eprintln!("  {} {} ({}ms)", "v".green(), tool_name, duration_ms);
        } else {
            eprintln!("  {} {} (error, {}ms)", "x".red(), tool_name, duration_ms);
        }
    }

    fn on_turn_limit(&self, max_turns: usize) {
        eprintln!("  {} stopped after {} tool turns", "!".yellow(), max_turns);
    }
}

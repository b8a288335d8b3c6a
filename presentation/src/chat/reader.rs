//! Line input for the REPL

use reedline::{
    DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal,
};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const HISTORY_CAPACITY: usize = 1000;

/// Result of reading one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D or closed input
    Eof,
}

/// Source of user input lines
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> ReadOutcome;
}

/// Line editor backed by reedline with a persistent history file
pub struct ReedlineReader {
    editor: Reedline,
}

impl ReedlineReader {
    /// Create an editor; history is kept in memory only when `history_path`
    /// is `None` or cannot be opened.
    pub fn new(history_path: Option<PathBuf>) -> Self {
        let mut editor = Reedline::create();

        if let Some(path) = history_path {
            ensure_parent_dir(&path);
            match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
                Ok(history) => {
                    debug!("Using history file {}", path.display());
                    editor = editor.with_history(Box::new(history));
                }
                Err(e) => warn!("Could not open history file {}: {}", path.display(), e),
            }
        }

        Self { editor }
    }
}

/// Create the directory holding `path`; failures are logged and reported as `false`.
fn ensure_parent_dir(path: &Path) -> bool {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return true;
    };
    match std::fs::create_dir_all(parent) {
        Ok(()) => true,
        Err(e) => {
            warn!(
                "Could not create history directory {}: {}",
                parent.display(),
                e
            );
            false
        }
    }
}

impl LineReader for ReedlineReader {
    fn read_line(&mut self, prompt: &str) -> ReadOutcome {
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(prompt.to_string()),
            DefaultPromptSegment::Empty,
        );

        match self.editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => ReadOutcome::Line(line),
            Ok(Signal::CtrlC) => ReadOutcome::Interrupted,
            Ok(_) => ReadOutcome::Eof,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                ReadOutcome::Eof
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state/history.txt");
        assert!(ensure_parent_dir(&path));
        assert!(dir.path().join("nested/state").is_dir());
    }

    #[test]
    fn test_history_directory_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, "not a directory").unwrap();
        assert!(!ensure_parent_dir(&file.join("history.txt")));
    }

    #[test]
    fn test_bare_file_name_needs_no_directory() {
        assert!(ensure_parent_dir(Path::new("history.txt")));
    }
}

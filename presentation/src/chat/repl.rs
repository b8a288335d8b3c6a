//! REPL (Read-Eval-Print Loop) for interactive explanations

use super::reader::{LineReader, ReadOutcome};
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::{ProgressReporter, SimpleProgress};
use explainer_application::{
    ExecutionParams, ExplainInput, ExplainProgressNotifier, ExplainToolUseCase, NoProgress,
};
use explainer_domain::{Model, Question, ToolQuery, Transcript};
use std::io::IsTerminal;
use tracing::{debug, info};

/// Prompt shown while no tool is selected
pub const TOOL_PROMPT: &str = "Enter the CLI tool name (or 'quit' to exit)";

fn question_prompt(tool: &ToolQuery) -> String {
    format!("Ask about {} ('switch' for another tool, 'quit' to exit)", tool)
}

fn is_quit(line: &str) -> bool {
    ["quit", "exit", "q"]
        .iter()
        .any(|word| line.eq_ignore_ascii_case(word))
}

fn is_switch(line: &str) -> bool {
    line.eq_ignore_ascii_case("switch")
}

/// Where the conversation is
#[derive(Debug)]
pub enum ReplState {
    AwaitingTool,
    /// The transcript belongs to this tool and is dropped on switch
    AwaitingQuestion {
        tool: ToolQuery,
        transcript: Transcript,
    },
}

impl ReplState {
    pub fn for_tool(tool: ToolQuery) -> Self {
        ReplState::AwaitingQuestion {
            tool,
            transcript: Transcript::new(),
        }
    }
}

/// Interactive explainer REPL
pub struct ExplainerRepl {
    use_case: ExplainToolUseCase,
    model: Model,
    execution: ExecutionParams,
    show_progress: bool,
}

impl ExplainerRepl {
    pub fn new(use_case: ExplainToolUseCase, model: Model) -> Self {
        Self {
            use_case,
            model,
            execution: ExecutionParams::default(),
            show_progress: true,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }

    /// Run the loop until the user quits or input ends.
    ///
    /// Starts with `initial_tool` selected when given.
    pub async fn run(&self, reader: &mut dyn LineReader, initial_tool: Option<ToolQuery>) {
        println!("{}", ConsoleFormatter::welcome(&self.model));

        let mut state = match initial_tool {
            Some(tool) => ReplState::for_tool(tool),
            None => ReplState::AwaitingTool,
        };

        while let Some(next) = self.step(state, reader).await {
            state = next;
        }
        println!("Bye!");
    }

    /// Answer a single question.
    ///
    /// Without `tool` the model infers which tool is meant.
    pub async fn answer_once(&self, question: &str, tool: Option<&ToolQuery>) {
        let mut transcript = Transcript::new();
        self.ask(question, tool, &mut transcript).await;
    }

    /// Read one line and move to the next state; `None` ends the session.
    pub async fn step(&self, state: ReplState, reader: &mut dyn LineReader) -> Option<ReplState> {
        match state {
            ReplState::AwaitingTool => {
                let line = match reader.read_line(TOOL_PROMPT) {
                    ReadOutcome::Line(line) => line,
                    ReadOutcome::Interrupted | ReadOutcome::Eof => return None,
                };
                let line = line.trim();

                if line.is_empty() {
                    return Some(ReplState::AwaitingTool);
                }
                if is_quit(line) {
                    return None;
                }

                match ToolQuery::parse(line) {
                    Ok(tool) => {
                        info!("Selected tool: {}", tool);
                        println!("Now explaining '{}'.", tool);
                        Some(ReplState::for_tool(tool))
                    }
                    Err(e) => {
                        eprintln!("{}", ConsoleFormatter::error(e));
                        Some(ReplState::AwaitingTool)
                    }
                }
            }
            ReplState::AwaitingQuestion {
                tool,
                mut transcript,
            } => {
                let line = match reader.read_line(&question_prompt(&tool)) {
                    ReadOutcome::Line(line) => line,
                    ReadOutcome::Interrupted => {
                        debug!("Interrupted; leaving '{}'", tool);
                        return Some(ReplState::AwaitingTool);
                    }
                    ReadOutcome::Eof => return None,
                };
                let line = line.trim();

                if line.is_empty() {
                    return Some(ReplState::AwaitingQuestion { tool, transcript });
                }
                if is_quit(line) {
                    return None;
                }
                if is_switch(line) {
                    return Some(ReplState::AwaitingTool);
                }

                self.ask(line, Some(&tool), &mut transcript).await;
                Some(ReplState::AwaitingQuestion { tool, transcript })
            }
        }
    }

    async fn ask(&self, question: &str, tool: Option<&ToolQuery>, transcript: &mut Transcript) {
        let question = match Question::try_new(question) {
            Ok(q) => q,
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::error(e));
                return;
            }
        };

        let input = ExplainInput::new(question, tool.cloned(), self.model.clone())
            .with_execution(self.execution.clone());

        let progress: Box<dyn ExplainProgressNotifier> = match self.show_progress {
            true if std::io::stderr().is_terminal() => Box::new(ProgressReporter::new()),
            true => Box::new(SimpleProgress),
            false => Box::new(NoProgress),
        };

        match self
            .use_case
            .execute(input, transcript, progress.as_ref())
            .await
        {
            Ok(output) => {
                println!("{}", ConsoleFormatter::explanation(&output.answer));
                println!();
            }
            Err(e) => eprintln!("{}", ConsoleFormatter::error(e)),
        }
    }
}

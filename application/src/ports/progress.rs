//! Progress notification port
//!
//! Lets the presentation layer show what the reasoning loop is doing while
//! the user waits.

/// Callbacks fired by [`ExplainToolUseCase`](crate::use_cases::explain::ExplainToolUseCase).
///
/// All methods default to no-ops.
pub trait ExplainProgressNotifier: Send + Sync {
    /// A request to the model is about to be sent (`turn` starts at 0)
    fn on_model_request(&self, _turn: usize) {}

    /// A harvest call is about to run
    fn on_tool_call(&self, _tool_name: &str, _args_preview: &str) {}

    /// A harvest call finished. `clean` is false when the tool call was
    /// rejected or the harvest returned an error string.
    fn on_tool_result(&self, _tool_name: &str, _clean: bool, _duration_ms: u64) {}

    /// The loop stopped because `max_tool_turns` was reached
    fn on_turn_limit(&self, _max_turns: usize) {}

    /// The question is answered or has failed
    fn on_finished(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ExplainProgressNotifier for NoProgress {}

//! Explain Tool use case.
//!
//! Answers one question about a CLI tool. The model sees the transcript so
//! far plus the harvest tools, calls them as often as it likes (bounded by
//! `max_tool_turns`), and finishes with a plain-text answer.

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::ExplainProgressNotifier;
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::tool_helpers::tool_args_preview;
use explainer_domain::util::truncate_str;
use explainer_domain::{
    ExplainerPromptTemplate, Message, Model, Question, ToolCall, ToolQuery, Transcript,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while answering a question.
#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error("No response from model")]
    EmptyResponse,
}

/// Input for the [`ExplainToolUseCase`].
#[derive(Debug, Clone)]
pub struct ExplainInput {
    pub question: Question,
    /// Tool under discussion; `None` lets the model infer it from the question.
    pub tool: Option<ToolQuery>,
    pub model: Model,
    pub execution: ExecutionParams,
}

impl ExplainInput {
    pub fn new(question: Question, tool: Option<ToolQuery>, model: Model) -> Self {
        Self {
            question,
            tool,
            model,
            execution: ExecutionParams::default(),
        }
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }
}

/// Outcome of a successful question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainOutput {
    pub answer: String,
    /// Model round-trips that requested tools
    pub tool_turns: usize,
    /// Harvest calls executed
    pub tool_calls: usize,
}

/// Use case for answering a question about a CLI tool.
///
/// 1. Seed an empty transcript with the system prompt
/// 2. Append the question and send it with the harvest tool schemas
/// 3. Execute requested tool calls one at a time and resend the results
/// 4. Stop at the first response without tool calls, or at `max_tool_turns`
///
/// The transcript is only extended when the question succeeds; on error it
/// is restored to its previous length.
pub struct ExplainToolUseCase {
    gateway: Arc<dyn LlmGateway>,
    tool_executor: Arc<dyn ToolExecutorPort>,
    tool_schema: Arc<dyn ToolSchemaPort>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for ExplainToolUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            tool_executor: self.tool_executor.clone(),
            tool_schema: self.tool_schema.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl ExplainToolUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        tool_executor: Arc<dyn ToolExecutorPort>,
        tool_schema: Arc<dyn ToolSchemaPort>,
    ) -> Self {
        Self {
            gateway,
            tool_executor,
            tool_schema,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Answer `input.question`, continuing the conversation in `transcript`.
    pub async fn execute(
        &self,
        input: ExplainInput,
        transcript: &mut Transcript,
        progress: &dyn ExplainProgressNotifier,
    ) -> Result<ExplainOutput, ExplainError> {
        let checkpoint = transcript.len();
        let result = self.run(&input, transcript, progress).await;
        progress.on_finished();

        match result {
            Ok(output) => {
                self.conversation_logger.log(ConversationEvent::new(
                    "answer",
                    serde_json::json!({
                        "model": input.model.to_string(),
                        "tool_turns": output.tool_turns,
                        "tool_calls": output.tool_calls,
                        "bytes": output.answer.len(),
                        "text": output.answer,
                    }),
                ));
                Ok(output)
            }
            Err(e) => {
                warn!("Question failed, discarding partial exchange: {}", e);
                transcript.truncate(checkpoint);
                self.conversation_logger.log(ConversationEvent::new(
                    "error",
                    serde_json::json!({ "message": e.to_string() }),
                ));
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        input: &ExplainInput,
        transcript: &mut Transcript,
        progress: &dyn ExplainProgressNotifier,
    ) -> Result<ExplainOutput, ExplainError> {
        info!(
            "Explaining {}: {}",
            input.tool.as_ref().map(|t| t.as_str()).unwrap_or("(any tool)"),
            truncate_str(input.question.content(), 100)
        );

        if transcript.is_empty() {
            let system = match &input.tool {
                Some(tool) => ExplainerPromptTemplate::tool_system(tool.as_str()),
                None => ExplainerPromptTemplate::general_system().to_string(),
            };
            transcript.push(Message::system(system));
        }
        transcript.push(Message::user(input.question.content()));

        self.conversation_logger.log(ConversationEvent::new(
            "question",
            serde_json::json!({
                "tool": input.tool.as_ref().map(|t| t.to_string()),
                "text": input.question.content(),
                "exchange": transcript.exchanges(),
            }),
        ));

        let tools = self
            .tool_schema
            .all_tools_schema(self.tool_executor.tool_spec());
        let max_turns = input.execution.max_tool_turns;

        debug!(
            "Using model {}, {} tools available, max {} tool turns",
            input.model,
            tools.len(),
            max_turns
        );

        let mut turn_count = 0;
        let mut call_count = 0;
        let mut last_text = String::new();

        loop {
            progress.on_model_request(turn_count);
            let response = self
                .gateway
                .send_with_tools(&input.model, transcript.messages(), &tools)
                .await?;

            let text = response.text_content();
            if !text.trim().is_empty() {
                last_text = text;
            }

            let mut tool_calls = response.tool_calls();
            if tool_calls.is_empty() {
                break;
            }

            if turn_count >= max_turns {
                warn!(
                    "Tool loop exceeded max_tool_turns ({}); dropping {} pending calls",
                    max_turns,
                    tool_calls.len()
                );
                progress.on_turn_limit(max_turns);
                break;
            }
            turn_count += 1;

            for (i, call) in tool_calls.iter_mut().enumerate() {
                if call.native_id.as_deref().is_none_or(str::is_empty) {
                    call.native_id = Some(format!("call_{}_{}", turn_count, i));
                }
            }

            let assistant_text = response.text_content();
            transcript.push(Message::assistant_with_tools(
                assistant_text,
                tool_calls.clone(),
            ));

            for call in &tool_calls {
                let output = self.run_tool(call, progress).await;
                call_count += 1;
                let id = call.native_id.clone().unwrap_or_default();
                transcript.push(Message::tool_result(id, output));
            }

            debug!(
                "Tool turn {}/{}: sent {} tool results",
                turn_count,
                max_turns,
                tool_calls.len()
            );
        }

        // Intermediate narration ("Let me check the help...") is replaced by
        // whatever the model said last.
        let answer = last_text.trim().to_string();
        if answer.is_empty() {
            return Err(ExplainError::EmptyResponse);
        }
        transcript.push(Message::assistant(answer.clone()));

        info!(
            "Answered in {} tool turns ({} harvest calls)",
            turn_count, call_count
        );

        Ok(ExplainOutput {
            answer,
            tool_turns: turn_count,
            tool_calls: call_count,
        })
    }

    async fn run_tool(&self, call: &ToolCall, progress: &dyn ExplainProgressNotifier) -> String {
        let preview = tool_args_preview(call);
        progress.on_tool_call(&call.tool_name, &preview);

        let result = self.tool_executor.execute(call).await;
        let content = result.content_for_model();

        progress.on_tool_result(
            &call.tool_name,
            result.harvested_cleanly(),
            result.metadata.duration_ms.unwrap_or(0),
        );
        if !result.is_success() {
            warn!("Tool call '{}' rejected: {}", call.tool_name, content);
        }

        self.conversation_logger.log(ConversationEvent::new(
            "tool_call",
            serde_json::json!({
                "tool": call.tool_name,
                "arguments": call.arguments,
                "success": result.is_success(),
                "harvest": result.metadata.harvest,
                "duration_ms": result.metadata.duration_ms,
                "bytes": content.len(),
            }),
        ));

        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use async_trait::async_trait;
    use explainer_domain::session::response::{ContentBlock, LlmResponse, StopReason};
    use explainer_domain::{Role, ToolDefinition, ToolParameter, ToolResult, ToolSpec};
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct MockGateway {
        responses: Mutex<VecDeque<Result<LlmResponse, GatewayError>>>,
        seen: Mutex<Vec<Vec<Message>>>,
    }

    impl MockGateway {
        fn new(responses: Vec<Result<LlmResponse, GatewayError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<Vec<Message>> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        async fn send_with_tools(
            &self,
            _model: &Model,
            messages: &[Message],
            _tools: &[serde_json::Value],
        ) -> Result<LlmResponse, GatewayError> {
            self.seen.lock().unwrap().push(messages.to_vec());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::ConnectionError("no more responses".into())))
        }

        async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
            Ok(vec![Model::default()])
        }
    }

    struct MockExecutor {
        spec: ToolSpec,
        calls: Mutex<Vec<ToolCall>>,
    }

    impl MockExecutor {
        fn new() -> Self {
            Self {
                spec: ToolSpec::new().register(
                    ToolDefinition::new("get_help_text", "Help text")
                        .with_parameter(ToolParameter::new("cli_tool_name", "Tool", true))
                        .with_parameter(ToolParameter::new("subcommand", "Sub", false)),
                ),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ToolExecutorPort for MockExecutor {
        fn tool_spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn execute(&self, call: &ToolCall) -> ToolResult {
            self.calls.lock().unwrap().push(call.clone());
            let tool = call.get_string("cli_tool_name").unwrap_or("?");
            ToolResult::success(&call.tool_name, format!("usage: {} [options]", tool))
                .with_duration(1)
        }
    }

    struct MockSchema;

    impl ToolSchemaPort for MockSchema {
        fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
            serde_json::json!({ "name": tool.name })
        }

        fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
            spec.names()
                .into_iter()
                .map(|n| serde_json::json!({ "name": n }))
                .collect()
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl ExplainProgressNotifier for RecordingProgress {
        fn on_tool_call(&self, tool_name: &str, args_preview: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("call {} {}", tool_name, args_preview));
        }

        fn on_turn_limit(&self, max_turns: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("limit {}", max_turns));
        }

        fn on_finished(&self) {
            self.events.lock().unwrap().push("finished".to_string());
        }
    }

    fn tool_use(id: Option<&str>, tool: &str, subcommand: Option<&str>) -> LlmResponse {
        let mut input: HashMap<String, serde_json::Value> = HashMap::new();
        input.insert("cli_tool_name".into(), serde_json::json!(tool));
        if let Some(sub) = subcommand {
            input.insert("subcommand".into(), serde_json::json!(sub));
        }
        LlmResponse {
            content: vec![ContentBlock::ToolUse {
                // Some local backends omit call ids entirely
                id: id.unwrap_or_default().to_string(),
                name: "get_help_text".to_string(),
                input,
            }],
            stop_reason: Some(StopReason::ToolUse),
            model: None,
        }
    }

    fn use_case(gateway: Arc<MockGateway>, executor: Arc<MockExecutor>) -> ExplainToolUseCase {
        ExplainToolUseCase::new(gateway, executor, Arc::new(MockSchema))
    }

    fn input(question: &str, tool: Option<&str>) -> ExplainInput {
        ExplainInput::new(
            Question::try_new(question).unwrap(),
            tool.map(|t| ToolQuery::parse(t).unwrap()),
            Model::default(),
        )
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_direct_answer() {
        let gateway = Arc::new(MockGateway::new(vec![Ok(LlmResponse::from_text(
            "Use tar -xzf.",
        ))]));
        let executor = Arc::new(MockExecutor::new());
        let mut transcript = Transcript::new();

        let output = use_case(gateway.clone(), executor)
            .execute(
                input("how do I extract?", Some("tar")),
                &mut transcript,
                &NoProgress,
            )
            .await
            .unwrap();

        assert_eq!(output.answer, "Use tar -xzf.");
        assert_eq!(output.tool_turns, 0);
        let roles: Vec<Role> = transcript.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert!(transcript.messages()[0].content.contains("Tool: tar"));
        assert_eq!(transcript.exchanges(), 1);
    }

    #[tokio::test]
    async fn test_tool_call_then_answer() {
        let gateway = Arc::new(MockGateway::new(vec![
            Ok(tool_use(Some("call_a"), "git", Some("commit"))),
            Ok(LlmResponse::from_text("Use git commit -m.")),
        ]));
        let executor = Arc::new(MockExecutor::new());
        let progress = RecordingProgress::default();
        let mut transcript = Transcript::new();

        let output = use_case(gateway.clone(), executor.clone())
            .execute(
                input("how do I commit?", Some("git")),
                &mut transcript,
                &progress,
            )
            .await
            .unwrap();

        assert_eq!(output.answer, "Use git commit -m.");
        assert_eq!(output.tool_turns, 1);
        assert_eq!(output.tool_calls, 1);

        let calls = executor.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].get_string("subcommand"), Some("commit"));

        let requests = gateway.requests();
        assert_eq!(requests.len(), 2);
        let tool_msg = requests[1].last().unwrap();
        assert_eq!(tool_msg.role, Role::Tool);
        assert_eq!(tool_msg.tool_call_id.as_deref(), Some("call_a"));
        assert_eq!(tool_msg.content, "usage: git [options]");

        assert!(transcript.is_well_formed());
        assert_eq!(transcript.len(), 5);
        assert_eq!(
            *progress.events.lock().unwrap(),
            vec!["call get_help_text git commit", "finished"]
        );
    }

    #[tokio::test]
    async fn test_follow_up_reuses_transcript() {
        let gateway = Arc::new(MockGateway::new(vec![
            Ok(LlmResponse::from_text("first")),
            Ok(LlmResponse::from_text("second")),
        ]));
        let uc = use_case(gateway.clone(), Arc::new(MockExecutor::new()));
        let mut transcript = Transcript::new();

        uc.execute(input("q1", Some("ls")), &mut transcript, &NoProgress)
            .await
            .unwrap();
        uc.execute(input("q2", Some("ls")), &mut transcript, &NoProgress)
            .await
            .unwrap();

        let requests = gateway.requests();
        // system, q1, a1, q2
        assert_eq!(requests[1].len(), 4);
        assert_eq!(requests[1][2].content, "first");
        let system_count = transcript
            .messages()
            .iter()
            .filter(|m| m.role == Role::System)
            .count();
        assert_eq!(system_count, 1);
        assert_eq!(transcript.exchanges(), 2);
    }

    #[tokio::test]
    async fn test_gateway_failure_rolls_back() {
        let gateway = Arc::new(MockGateway::new(vec![
            Ok(LlmResponse::from_text("first")),
            Ok(tool_use(Some("c1"), "ls", None)),
            Err(GatewayError::ConnectionError("refused".into())),
        ]));
        let uc = use_case(gateway, Arc::new(MockExecutor::new()));
        let mut transcript = Transcript::new();

        uc.execute(input("q1", Some("ls")), &mut transcript, &NoProgress)
            .await
            .unwrap();
        let before = transcript.clone();

        let err = uc
            .execute(input("q2", Some("ls")), &mut transcript, &NoProgress)
            .await
            .unwrap_err();

        assert!(matches!(err, ExplainError::GatewayError(_)));
        assert_eq!(transcript, before);
    }

    #[tokio::test]
    async fn test_turn_limit_keeps_transcript_well_formed() {
        let mut narrated = tool_use(Some("c2"), "git", Some("push"));
        narrated
            .content
            .insert(0, ContentBlock::text("Partial answer from help."));
        let gateway = Arc::new(MockGateway::new(vec![
            Ok(tool_use(Some("c1"), "git", None)),
            Ok(narrated),
        ]));
        let executor = Arc::new(MockExecutor::new());
        let progress = RecordingProgress::default();
        let mut transcript = Transcript::new();

        let output = use_case(gateway, executor.clone())
            .execute(
                input("push?", Some("git"))
                    .with_execution(ExecutionParams::default().with_max_tool_turns(1)),
                &mut transcript,
                &progress,
            )
            .await
            .unwrap();

        assert_eq!(output.answer, "Partial answer from help.");
        assert_eq!(executor.calls.lock().unwrap().len(), 1);
        assert!(transcript.is_well_formed());
        assert!(!transcript.messages().last().unwrap().has_tool_calls());
        assert!(progress.events.lock().unwrap().contains(&"limit 1".to_string()));
    }

    #[tokio::test]
    async fn test_empty_answer_is_error() {
        let gateway = Arc::new(MockGateway::new(vec![Ok(LlmResponse::from_text("  "))]));
        let mut transcript = Transcript::new();

        let err = use_case(gateway, Arc::new(MockExecutor::new()))
            .execute(input("q", Some("ls")), &mut transcript, &NoProgress)
            .await
            .unwrap_err();

        assert!(matches!(err, ExplainError::EmptyResponse));
        assert!(transcript.is_empty());
    }

    #[tokio::test]
    async fn test_missing_call_id_is_synthesized() {
        let gateway = Arc::new(MockGateway::new(vec![
            Ok(tool_use(None, "ls", None)),
            Ok(LlmResponse::from_text("done")),
        ]));
        let mut transcript = Transcript::new();

        use_case(gateway, Arc::new(MockExecutor::new()))
            .execute(input("q", Some("ls")), &mut transcript, &NoProgress)
            .await
            .unwrap();

        assert!(transcript.is_well_formed());
        let tool_msg = &transcript.messages()[3];
        assert_eq!(tool_msg.tool_call_id.as_deref(), Some("call_1_0"));
    }

    #[tokio::test]
    async fn test_general_mode_prompt() {
        let gateway = Arc::new(MockGateway::new(vec![Ok(LlmResponse::from_text("ok"))]));
        let mut transcript = Transcript::new();

        use_case(gateway, Arc::new(MockExecutor::new()))
            .execute(input("what does ls -la do?", None), &mut transcript, &NoProgress)
            .await
            .unwrap();

        assert_eq!(
            transcript.messages()[0].content,
            ExplainerPromptTemplate::general_system()
        );
    }
}

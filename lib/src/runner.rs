//! The agent run loop.
//!
//! A run starts at one agent and repeatedly asks the model for the next
//! step. Tool calls are executed locally and fed back; a call to a
//! `transfer_to_*` tool switches the active agent. The run ends when the
//! model answers without calling any tool.

use crate::agent::Agent;
use crate::error::{AgentError, Result, ToolError};
use crate::id::{SessionId, ToolCallId};
use crate::llm::{CompletionRequest, LlmProvider, TokenUsage};
use crate::message::{ContentBlock, Message, Role};
use crate::tool::ToolContext;
use serde_json::Value;
use std::sync::Arc;

/// Model calls allowed per run unless configured otherwise
pub const DEFAULT_MAX_TURNS: usize = 10;

/// Settings shared by every run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Model for agents that do not pin one; falls back to the provider default
    pub model: Option<String>,
    /// Maximum number of model calls in a single run
    pub max_turns: usize,
    /// Maximum tokens per model call
    pub max_tokens: Option<usize>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Session the run belongs to, passed through to tools
    pub session_id: Option<SessionId>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            model: None,
            max_turns: DEFAULT_MAX_TURNS,
            max_tokens: None,
            temperature: None,
            session_id: None,
        }
    }
}

impl RunConfig {
    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the turn limit
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Tag runs with a session
    pub fn with_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }
}

/// Input to a run
#[derive(Debug, Clone)]
pub enum RunInput {
    /// A single user message
    Text(String),
    /// A prepared conversation
    Messages(Vec<Message>),
}

impl RunInput {
    fn into_messages(self) -> Vec<Message> {
        match self {
            RunInput::Text(text) => vec![Message::user(text)],
            RunInput::Messages(messages) => messages,
        }
    }
}

impl From<&str> for RunInput {
    fn from(text: &str) -> Self {
        RunInput::Text(text.to_string())
    }
}

impl From<String> for RunInput {
    fn from(text: String) -> Self {
        RunInput::Text(text)
    }
}

impl From<Vec<Message>> for RunInput {
    fn from(messages: Vec<Message>) -> Self {
        RunInput::Messages(messages)
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Text of the final answer (may be empty if the model said nothing)
    pub final_output: String,
    /// Name of the agent that produced the final answer
    pub last_agent: String,
    /// Messages produced during the run, in order
    pub new_messages: Vec<Message>,
    /// Number of model calls made
    pub turns: usize,
    /// Token usage summed over all model calls
    pub usage: TokenUsage,
}

/// Drives agents against a model provider
#[derive(Clone)]
pub struct Runner {
    provider: Arc<dyn LlmProvider>,
    config: RunConfig,
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Runner {
    /// Create a runner with default settings
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            config: RunConfig::default(),
        }
    }

    /// Replace the run settings
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Current run settings
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run `starting_agent` on `input` until it produces a final answer.
    pub async fn run(
        &self,
        starting_agent: &Arc<Agent>,
        input: impl Into<RunInput>,
    ) -> Result<RunResult> {
        let mut agent = Arc::clone(starting_agent);
        let mut transcript = input.into().into_messages();
        let input_len = transcript.len();
        let mut usage = TokenUsage::default();

        for turn in 1..=self.config.max_turns {
            let request = self.build_request(&agent, &transcript);
            tracing::debug!(agent = agent.name(), turn, "requesting model turn");

            let response = self.provider.complete(request).await?;
            usage += response.usage;
            let message = response.message;

            if !message.has_tool_use() {
                let final_output = message.text_content();
                transcript.push(message);
                tracing::debug!(agent = agent.name(), turns = turn, "run finished");
                return Ok(RunResult {
                    final_output,
                    last_agent: agent.name().to_string(),
                    new_messages: transcript.split_off(input_len),
                    turns: turn,
                    usage,
                });
            }

            let calls: Vec<(ToolCallId, String, Value)> = message
                .tool_uses()
                .into_iter()
                .map(|(id, name, input)| (id.clone(), name.to_string(), input.clone()))
                .collect();
            transcript.push(message);

            let context = self.tool_context(&agent);
            let mut next_agent: Option<Arc<Agent>> = None;
            let mut results = Vec::with_capacity(calls.len());

            for (id, name, input) in calls {
                if let Some(target) = agent.find_handoff(&name) {
                    if next_agent.is_some() {
                        results.push(ContentBlock::tool_result(
                            id,
                            "Multiple handoffs detected, ignoring this one.",
                            true,
                        ));
                        continue;
                    }
                    tracing::info!(from = agent.name(), to = target.name(), "handoff");
                    let output = serde_json::json!({ "assistant": target.name() }).to_string();
                    results.push(ContentBlock::tool_result(id, output, false));
                    next_agent = Some(Arc::clone(target));
                    continue;
                }

                let (content, is_error) = match agent.tools().get(&name) {
                    Some(tool) => {
                        tracing::debug!(agent = agent.name(), tool = %name, "executing tool");
                        match tool.execute(input, &context).await {
                            Ok(output) => {
                                let is_error = output.is_error();
                                (output.content, is_error)
                            }
                            Err(e) => {
                                tracing::warn!(tool = %name, error = %e, "tool failed");
                                (format!("Error: {}", e), true)
                            }
                        }
                    }
                    None => {
                        let err = ToolError::NotFound {
                            name: name.clone(),
                            agent: agent.name().to_string(),
                        };
                        tracing::warn!(error = %err, "model called an unknown tool");
                        (err.to_string(), true)
                    }
                };
                results.push(ContentBlock::tool_result(id, content, is_error));
            }

            transcript.push(Message::new(Role::Tool, results));
            if let Some(target) = next_agent {
                agent = target;
            }
        }

        tracing::warn!(max = self.config.max_turns, "run exceeded its turn limit");
        Err(AgentError::MaxTurnsExceeded {
            max: self.config.max_turns,
        }
        .into())
    }

    fn build_request(&self, agent: &Agent, transcript: &[Message]) -> CompletionRequest {
        let model = agent
            .model()
            .or(self.config.model.as_deref())
            .unwrap_or_else(|| self.provider.default_model());

        let mut request = CompletionRequest::new(model)
            .with_messages(transcript.to_vec())
            .with_tools(agent.tool_definitions());
        if !agent.instructions().is_empty() {
            request = request.with_system(agent.instructions());
        }
        if let Some(max) = self.config.max_tokens {
            request = request.with_max_tokens(max);
        }
        if let Some(temp) = self.config.temperature {
            request = request.with_temperature(temp);
        }
        request
    }

    fn tool_context(&self, agent: &Agent) -> ToolContext {
        let context = ToolContext::new().with_agent(agent.name());
        match self.config.session_id {
            Some(session_id) => context.with_session(session_id),
            None => context,
        }
    }
}

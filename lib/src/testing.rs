//! Testing utilities.
//!
//! [`ScriptedProvider`] stands in for a hosted model: it replays queued
//! responses in order and records every request it receives, so runs can be
//! tested deterministically without network access.

use crate::error::LlmError;
use crate::id::ToolCallId;
use crate::llm::{CompletionRequest, CompletionResponse, LlmProvider, StopReason, TokenUsage};
use crate::message::{ContentBlock, Message, Role};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A provider that returns scripted responses.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<CompletionResponse, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    /// Create a provider with nothing queued
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a plain text reply
    pub fn then_text(self, text: impl Into<String>) -> Self {
        self.then_message(Message::assistant(text))
    }

    /// Queue a reply asking for one tool call
    pub fn then_tool_call(self, name: impl Into<String>, input: Value) -> Self {
        self.then_tool_calls(vec![(name.into(), input)])
    }

    /// Queue a reply asking for several tool calls at once
    pub fn then_tool_calls(self, calls: Vec<(String, Value)>) -> Self {
        let content = calls
            .into_iter()
            .map(|(name, input)| ContentBlock::tool_use(ToolCallId::generate(), name, input))
            .collect();
        self.then_message(Message::new(Role::Assistant, content))
    }

    /// Queue a failure
    pub fn then_error(self, error: LlmError) -> Self {
        self.queue(Err(error));
        self
    }

    /// Queue an arbitrary assistant message
    pub fn then_message(self, message: Message) -> Self {
        let stop_reason = if message.has_tool_use() {
            StopReason::ToolUse
        } else {
            StopReason::EndTurn
        };
        self.queue(Ok(CompletionResponse {
            id: format!("scripted-{}", message.id),
            model: "scripted".to_string(),
            message,
            stop_reason,
            usage: TokenUsage {
                input_tokens: 10,
                output_tokens: 5,
            },
        }));
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of queued responses not yet consumed
    pub fn remaining(&self) -> usize {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn queue(&self, response: Result<CompletionResponse, LlmError>) {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(response);
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::Api {
                    status: 500,
                    message: "scripted provider has no more responses".to_string(),
                })
            })
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    fn is_ready(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let provider = ScriptedProvider::new()
            .then_tool_call("roll_dice", serde_json::json!({"sides": 20}))
            .then_text("done");

        let first = provider.complete(CompletionRequest::new("a")).await.unwrap();
        assert_eq!(first.stop_reason, StopReason::ToolUse);

        let second = provider.complete(CompletionRequest::new("b")).await.unwrap();
        assert_eq!(second.message.text_content(), "done");

        assert!(provider.complete(CompletionRequest::new("c")).await.is_err());

        let models: Vec<_> = provider.requests().into_iter().map(|r| r.model).collect();
        assert_eq!(models, vec!["a", "b", "c"]);
        assert_eq!(provider.remaining(), 0);
    }
}

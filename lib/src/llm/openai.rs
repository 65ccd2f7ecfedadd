//! OpenAI-compatible chat completions provider.
//!
//! Speaks the `/chat/completions` wire format, which Google exposes for
//! Gemini models under its `v1beta/openai` base URL. Any other endpoint that
//! implements the same format works with [`OpenAiCompatProvider::with_base_url`].

use super::{CompletionRequest, CompletionResponse, LlmProvider, StopReason, TokenUsage, ToolChoice};
use crate::error::LlmError;
use crate::id::ToolCallId;
use crate::message::{ContentBlock, Message, Role};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Gemini's OpenAI-compatible base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Model used when neither the request nor the provider names one
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// OpenAI-compatible provider
pub struct OpenAiCompatProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl OpenAiCompatProvider {
    /// Create a new provider pointed at the Gemini endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create from environment variable GEMINI_API_KEY
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::Configuration(format!("{} is not set", API_KEY_ENV)))?;
        Ok(Self::new(api_key))
    }

    /// Point the provider at a different OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the default model
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Build headers for API requests
    fn build_headers(&self) -> Result<HeaderMap, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| LlmError::Configuration(format!("Invalid API key: {}", e)))?,
        );
        Ok(headers)
    }

    /// Convert our request format to the chat completions format
    fn to_api_request(&self, request: &CompletionRequest) -> ApiRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            messages.push(ApiMessage::text("system", system.clone()));
        }
        for message in &request.messages {
            push_api_messages(&mut messages, message);
        }

        let tools = request.tools.as_ref().map(|tools| {
            tools
                .iter()
                .map(|t| ApiTool {
                    r#type: "function",
                    function: ApiFunction {
                        name: t.name.clone(),
                        description: t.description.clone(),
                        parameters: t.input_schema.clone(),
                    },
                })
                .collect()
        });

        let model = if request.model.is_empty() {
            self.default_model.clone()
        } else {
            request.model.clone()
        };

        ApiRequest {
            model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            tools,
            tool_choice: request.tool_choice.as_ref().map(|tc| match tc {
                ToolChoice::Auto => Value::from("auto"),
                ToolChoice::Required => Value::from("required"),
                ToolChoice::None => Value::from("none"),
                ToolChoice::Tool { name } => serde_json::json!({
                    "type": "function",
                    "function": { "name": name }
                }),
            }),
        }
    }

    /// Parse API response to our format
    fn parse_response(&self, api_response: ApiResponse) -> Result<CompletionResponse, LlmError> {
        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Parse("response contained no choices".to_string()))?;

        let mut content = Vec::new();
        if let Some(text) = choice.message.content.filter(|t| !t.is_empty()) {
            content.push(ContentBlock::Text { text });
        }
        for call in choice.message.tool_calls.unwrap_or_default() {
            let input = parse_arguments(&call.function.name, &call.function.arguments)?;
            let id = if call.id.is_empty() {
                ToolCallId::generate()
            } else {
                ToolCallId::from_string(call.id)
            };
            content.push(ContentBlock::ToolUse {
                id,
                name: call.function.name,
                input,
            });
        }

        let has_tool_use = content.iter().any(|c| c.is_tool_use());
        let stop_reason = match choice.finish_reason.as_deref() {
            Some("tool_calls") | Some("function_call") => StopReason::ToolUse,
            Some("length") => StopReason::MaxTokens,
            Some("content_filter") => StopReason::ContentFilter,
            _ if has_tool_use => StopReason::ToolUse,
            _ => StopReason::EndTurn,
        };

        let usage = api_response
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: api_response.id.unwrap_or_default(),
            model: api_response.model.unwrap_or_else(|| self.default_model.clone()),
            message: Message::new(Role::Assistant, content),
            stop_reason,
            usage,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let headers = self.build_headers()?;
        let api_request = self.to_api_request(&request);

        tracing::debug!(
            model = %api_request.model,
            messages = api_request.messages.len(),
            tools = api_request.tools.as_ref().map_or(0, Vec::len),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .headers(headers)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "chat completion request failed");
            return Err(status_error(status, retry_after, &error_body));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        self.parse_response(api_response)
    }

    fn name(&self) -> &str {
        "openai-compatible"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn is_ready(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Append the wire messages for one of our messages.
///
/// Tool results become one `tool` message each; everything else maps 1:1.
fn push_api_messages(out: &mut Vec<ApiMessage>, message: &Message) {
    let text = message.text_content();
    match message.role {
        Role::System => out.push(ApiMessage::text("system", text)),
        Role::Assistant => {
            let tool_calls: Vec<ApiToolCall> = message
                .tool_uses()
                .into_iter()
                .map(|(id, name, input)| ApiToolCall {
                    id: id.to_string(),
                    r#type: "function".to_string(),
                    function: ApiFunctionCall {
                        name: name.to_string(),
                        arguments: input.to_string(),
                    },
                })
                .collect();
            out.push(ApiMessage {
                role: "assistant",
                content: if text.is_empty() && !tool_calls.is_empty() {
                    None
                } else {
                    Some(text)
                },
                tool_calls: if tool_calls.is_empty() {
                    None
                } else {
                    Some(tool_calls)
                },
                tool_call_id: None,
            });
        }
        Role::User | Role::Tool => {
            for block in &message.content {
                if let ContentBlock::ToolResult {
                    tool_use_id,
                    content,
                    ..
                } = block
                {
                    out.push(ApiMessage {
                        role: "tool",
                        content: Some(content.clone()),
                        tool_calls: None,
                        tool_call_id: Some(tool_use_id.to_string()),
                    });
                }
            }
            if !text.is_empty() {
                out.push(ApiMessage::text("user", text));
            }
        }
    }
}

fn parse_arguments(tool: &str, arguments: &str) -> Result<Value, LlmError> {
    if arguments.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(arguments)
        .map_err(|e| LlmError::Parse(format!("invalid arguments for {}: {}", tool, e)))
}

fn status_error(status: StatusCode, retry_after: Option<Duration>, body: &str) -> LlmError {
    let message = error_message(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::AuthenticationFailed { reason: message }
        }
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited { retry_after },
        _ => LlmError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pull `error.message` out of an error body.
///
/// Gemini wraps errors in a one-element array; OpenAI uses a bare object.
fn error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| match v {
        Value::Array(items) => items.first().and_then(|i| i.get("error")),
        other => other.get("error"),
    });
    error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}

// API request/response types

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ApiTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ApiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl ApiMessage {
    fn text(role: &'static str, content: String) -> Self {
        Self {
            role,
            content: Some(content),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolCall {
    #[serde(default)]
    id: String,
    #[serde(default = "function_type")]
    r#type: String,
    function: ApiFunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Serialize)]
struct ApiTool {
    r#type: &'static str,
    function: ApiFunction,
}

#[derive(Debug, Serialize)]
struct ApiFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    model: Option<String>,
    choices: Vec<ApiChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ApiToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::ToolDefinition;
    use serde_json::json;

    fn provider() -> OpenAiCompatProvider {
        OpenAiCompatProvider::new("test-key")
    }

    #[test]
    fn test_provider_creation() {
        let provider = provider();
        assert_eq!(provider.name(), "openai-compatible");
        assert_eq!(provider.default_model(), DEFAULT_MODEL);
        assert_eq!(provider.base_url(), DEFAULT_BASE_URL);
        assert!(provider.is_ready());
        assert!(!OpenAiCompatProvider::new("").is_ready());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = provider().with_base_url("http://localhost:1234/v1/");
        assert_eq!(provider.endpoint(), "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn test_request_mapping() {
        let call_id = ToolCallId::from_string("call_1");
        let request = CompletionRequest::new("gemini-2.0-flash")
            .with_system("route things")
            .with_messages(vec![
                Message::user("flights to dubai"),
                Message::new(
                    Role::Assistant,
                    vec![ContentBlock::tool_use(
                        call_id.clone(),
                        "get_flights",
                        json!({"destination": "dubai"}),
                    )],
                ),
                Message::tool_result(call_id, "[]", false),
            ])
            .with_tools(vec![ToolDefinition {
                name: "get_flights".to_string(),
                description: "Flights".to_string(),
                input_schema: json!({"type": "object"}),
            }])
            .with_tool_choice(ToolChoice::Auto);

        let wire = serde_json::to_value(provider().to_api_request(&request)).unwrap();

        assert_eq!(wire["model"], "gemini-2.0-flash");
        assert_eq!(wire["messages"][0], json!({"role": "system", "content": "route things"}));
        assert_eq!(wire["messages"][1], json!({"role": "user", "content": "flights to dubai"}));
        assert_eq!(
            wire["messages"][2],
            json!({
                "role": "assistant",
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "get_flights", "arguments": "{\"destination\":\"dubai\"}"}
                }]
            })
        );
        assert_eq!(
            wire["messages"][3],
            json!({"role": "tool", "content": "[]", "tool_call_id": "call_1"})
        );
        assert_eq!(wire["tools"][0]["type"], "function");
        assert_eq!(wire["tools"][0]["function"]["name"], "get_flights");
        assert_eq!(wire["tool_choice"], "auto");
        assert!(wire.get("max_tokens").is_none());
    }

    #[test]
    fn test_empty_model_uses_default() {
        let wire = provider().to_api_request(&CompletionRequest::new(""));
        assert_eq!(wire.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_parse_text_response() {
        let api: ApiResponse = serde_json::from_value(json!({
            "id": "resp-1",
            "model": "gemini-2.0-flash",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello there"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }))
        .unwrap();

        let response = provider().parse_response(api).unwrap();
        assert_eq!(response.id, "resp-1");
        assert_eq!(response.message.text_content(), "Hello there");
        assert_eq!(response.stop_reason, StopReason::EndTurn);
        assert_eq!(response.usage.total(), 15);
    }

    #[test]
    fn test_parse_tool_call_response() {
        let api: ApiResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [
                        {"id": "", "type": "function", "function": {"name": "transfer_to_booking_agent", "arguments": "{}"}},
                        {"id": "call_9", "type": "function", "function": {"name": "roll_dice", "arguments": "{\"sides\":20}"}}
                    ]
                },
                "finish_reason": "stop"
            }]
        }))
        .unwrap();

        let response = provider().parse_response(api).unwrap();
        assert_eq!(response.stop_reason, StopReason::ToolUse);
        assert_eq!(response.model, DEFAULT_MODEL);

        let uses = response.message.tool_uses();
        assert_eq!(uses.len(), 2);
        assert_eq!(uses[0].1, "transfer_to_booking_agent");
        assert!(uses[0].0.as_str().starts_with("call_"));
        assert_eq!(uses[1].0.as_str(), "call_9");
        assert_eq!(uses[1].2, &json!({"sides": 20}));
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        let api: ApiResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "tool_calls": [{"id": "x", "function": {"name": "roll_dice", "arguments": "{sides"}}]
                }
            }]
        }))
        .unwrap();
        assert!(matches!(provider().parse_response(api), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_empty_choices() {
        let api: ApiResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(provider().parse_response(api), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_status_errors() {
        let gemini_body = r#"[{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}]"#;
        match status_error(StatusCode::BAD_REQUEST, None, gemini_body) {
            LlmError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let openai_body = r#"{"error": {"message": "bad key"}}"#;
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, None, openai_body),
            LlmError::AuthenticationFailed { ref reason } if reason == "bad key"
        ));

        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, Some(Duration::from_secs(7)), ""),
            LlmError::RateLimited { retry_after: Some(d) } if d == Duration::from_secs(7)
        ));

        assert_eq!(error_message("plain failure"), "plain failure");
    }
}

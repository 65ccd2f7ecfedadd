//! Tool trait and tool-related types.
//!
//! Tools are executable functions that agents can invoke to interact with
//! external systems, perform computations, or gather information.

use crate::error::ToolError;
use crate::id::SessionId;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Core tool trait - defines an executable function for agents
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's unique name
    fn name(&self) -> &str;

    /// Get a human-readable description of what the tool does
    fn description(&self) -> &str;

    /// Get the JSON Schema for input parameters
    fn input_schema(&self) -> &Value;

    /// Execute the tool with the given parameters
    async fn execute(&self, params: Value, context: &ToolContext) -> Result<ToolOutput, ToolError>;

    /// Definition handed to the model
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema().clone(),
        }
    }
}

/// Deserialize tool arguments into a typed parameter struct.
pub fn parse_params<T: DeserializeOwned>(tool: &str, params: Value) -> Result<T, ToolError> {
    serde_json::from_value(params).map_err(|e| ToolError::InvalidParameters {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

/// Context provided to tools during execution
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    /// Session/conversation ID
    pub session_id: Option<SessionId>,
    /// Name of the agent that issued the call
    pub agent_name: Option<String>,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the session
    pub fn with_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Attach the calling agent
    pub fn with_agent(mut self, name: impl Into<String>) -> Self {
        self.agent_name = Some(name.into());
        self
    }
}

/// Output from tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The main content output
    pub content: String,
    /// Structured output (if applicable)
    pub structured: Option<Value>,
    /// Whether this represents an error
    #[serde(default)]
    pub is_error: bool,
}

impl ToolOutput {
    /// Create a text output
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            structured: None,
            is_error: false,
        }
    }

    /// Create a structured output
    pub fn structured(content: impl Into<String>, data: Value) -> Self {
        Self {
            content: content.into(),
            structured: Some(data),
            is_error: false,
        }
    }

    /// Create a structured output whose content is the compact JSON of `data`
    pub fn json<T: Serialize>(data: &T) -> Result<Self, ToolError> {
        let value = serde_json::to_value(data).map_err(|e| ToolError::ExecutionFailed {
            tool: "serialize".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::structured(value.to_string(), value))
    }

    /// Create an error output
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            structured: None,
            is_error: true,
        }
    }

    /// Check if this is an error output
    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}

/// Tool registry for managing available tools
///
/// Ordered by name so that the definitions sent to the model are stable
/// from one request to the next.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tool_count", &self.tools.len())
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> &mut Self {
        self.tools.insert(tool.name().to_string(), Arc::new(tool));
        self
    }

    /// Register a tool with Arc
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) -> &mut Self {
        self.tools.insert(tool.name().to_string(), tool);
        self
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get all tool names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Generate tool definitions for LLM
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }
}

/// Tool definition for LLM consumption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// Input parameter schema
    pub input_schema: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes its input"
        }

        fn input_schema(&self) -> &Value {
            static SCHEMA: once_cell::sync::Lazy<Value> = once_cell::sync::Lazy::new(|| {
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "input": { "type": "string" }
                    }
                })
            });
            &SCHEMA
        }

        async fn execute(&self, params: Value, _context: &ToolContext) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::text(format!("Executed with: {}", params)))
        }
    }

    #[derive(Debug, Deserialize)]
    struct Params {
        destination: String,
    }

    #[test]
    fn test_tool_registry() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        assert!(registry.contains("echo"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["echo"]);

        let defs = registry.tool_definitions();
        assert_eq!(defs[0].name, "echo");
        assert_eq!(defs[0].description, "Echoes its input");
    }

    #[test]
    fn test_tool_output() {
        let output = ToolOutput::text("Hello");
        assert!(!output.is_error());

        let error = ToolOutput::error("Something went wrong");
        assert!(error.is_error());

        let json = ToolOutput::json(&serde_json::json!({"a": 1})).unwrap();
        assert_eq!(json.content, r#"{"a":1}"#);
        assert!(json.structured.is_some());
    }

    #[test]
    fn test_parse_params() {
        let params: Params =
            parse_params("get_flights", serde_json::json!({"destination": "Dubai"})).unwrap();
        assert_eq!(params.destination, "Dubai");

        let err = parse_params::<Params>("get_flights", serde_json::json!({})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters { ref tool, .. } if tool == "get_flights"));
    }

    #[tokio::test]
    async fn test_execute_through_registry() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let tool = registry.get("echo").unwrap();
        let out = tool
            .execute(serde_json::json!({"input": "hi"}), &ToolContext::new().with_agent("tester"))
            .await
            .unwrap();
        assert_eq!(out.content, r#"Executed with: {"input":"hi"}"#);
    }
}

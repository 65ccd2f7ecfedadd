//! Error types for the agentic framework.
//!
//! Uses thiserror for ergonomic error definition.

/// Main error type for the agentic framework
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Agent-related error
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    /// Tool-related error
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Agent-specific errors
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Agent initialization failed
    #[error("Agent initialization failed: {reason}")]
    InitializationFailed { reason: String },

    /// The run loop called the model more times than allowed
    #[error("Max turns ({max}) exceeded")]
    MaxTurnsExceeded { max: usize },
}

/// Tool-specific errors
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The active agent has no tool with this name
    #[error("Tool {name} not found in agent {agent}")]
    NotFound { name: String, agent: String },

    /// Invalid tool parameters
    #[error("Invalid parameters for tool {tool}: {reason}")]
    InvalidParameters { tool: String, reason: String },

    /// Tool execution failed
    #[error("Tool {tool} failed: {reason}")]
    ExecutionFailed { tool: String, reason: String },
}

/// LLM provider errors
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// API error from provider
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network/connection error
    #[error("Network error: {0}")]
    Network(String),

    /// Response parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Rate limited
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        retry_after: Option<std::time::Duration>,
    },

    /// Authentication failed
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for agent operations
pub type AgentResult<T> = std::result::Result<T, AgentError>;

/// Result type for tool operations
pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// Result type for LLM operations
pub type LlmResult<T> = std::result::Result<T, LlmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("GEMINI_API_KEY is not set".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: GEMINI_API_KEY is not set"
        );

        let err: Error = AgentError::MaxTurnsExceeded { max: 10 }.into();
        assert_eq!(err.to_string(), "Agent error: Max turns (10) exceeded");
    }

    #[test]
    fn test_error_conversion() {
        let tool_err = ToolError::NotFound {
            name: "unknown".to_string(),
            agent: "triage_agent".to_string(),
        };
        assert_eq!(tool_err.to_string(), "Tool unknown not found in agent triage_agent");
        let err: Error = tool_err.into();
        assert!(matches!(err, Error::Tool(_)));

        let llm_err = LlmError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        let err: Error = llm_err.into();
        assert_eq!(err.to_string(), "LLM error: API error (500): boom");
    }
}

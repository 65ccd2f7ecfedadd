//! Errors raised by the demo chatbots.

use agentic::error::AgentError;
use thiserror::Error;

/// Errors from setting up or running a chatbot.
#[derive(Debug, Error)]
pub enum Error {
    /// A required environment variable is missing or empty
    #[error("{0} is not set.")]
    MissingApiKey(&'static str),

    /// A setting has an unusable value
    #[error("Invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    /// Building the agent graph failed
    #[error("Agent setup failed: {0}")]
    Setup(#[from] AgentError),

    /// A run against the model failed
    #[error(transparent)]
    Run(#[from] agentic::error::Error),

    /// Console I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for chatbot operations.
pub type Result<T> = std::result::Result<T, Error>;

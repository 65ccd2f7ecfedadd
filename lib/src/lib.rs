//! # Agentic
//!
//! A small Rust framework for building chat agents that call local tools and
//! hand conversations off to one another.
//!
//! ## Core Concepts
//!
//! - **Agent**: Instructions plus the tools and handoff targets the model may use
//! - **Tool**: Executable functions that agents can invoke
//! - **Runner**: The loop that asks the model for the next step, runs tools and follows handoffs
//! - **LlmProvider**: The seam to a hosted model (OpenAI-compatible endpoints, Gemini by default)
//!
//! ## Example
//!
//! ```rust,ignore
//! use agentic::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Arc::new(OpenAiCompatProvider::from_env()?);
//!     let agent = Arc::new(
//!         Agent::builder("assistant")
//!             .instructions("Be concise but friendly.")
//!             .build()?,
//!     );
//!
//!     let result = Runner::new(provider).run(&agent, "Hello!").await?;
//!     println!("{}", result.final_output);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod id;
pub mod message;
pub mod error;
pub mod agent;
pub mod tool;
pub mod llm;
pub mod runner;
pub mod testing;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::id::*;
    pub use crate::message::*;
    pub use crate::error::*;
    pub use crate::agent::{Agent, AgentBuilder, AgentMetadata};
    pub use crate::tool::{parse_params, Tool, ToolContext, ToolDefinition, ToolOutput, ToolRegistry};
    pub use crate::llm::openai::OpenAiCompatProvider;
    pub use crate::llm::{CompletionRequest, CompletionResponse, LlmProvider};
    pub use crate::runner::{RunConfig, RunInput, RunResult, Runner};
}

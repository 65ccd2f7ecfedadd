//! Agent definitions and handoffs.
//!
//! An [`Agent`] is a named set of instructions plus the tools and handoff
//! targets the model may use while that agent is active. Agents do not run
//! themselves; the [`Runner`](crate::runner::Runner) drives them.

use crate::error::AgentError;
use crate::tool::{Tool, ToolDefinition, ToolRegistry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Prefix of the tool names that represent handoffs
pub const HANDOFF_PREFIX: &str = "transfer_to_";

/// Metadata describing an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMetadata {
    /// Human-readable name
    pub name: String,
    /// Short description used when another agent may hand off to this one
    pub handoff_description: Option<String>,
}

impl AgentMetadata {
    /// Create new agent metadata
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handoff_description: None,
        }
    }

    /// Set the handoff description
    pub fn with_handoff_description(mut self, description: impl Into<String>) -> Self {
        self.handoff_description = Some(description.into());
        self
    }
}

/// A configured agent
#[derive(Debug)]
pub struct Agent {
    metadata: AgentMetadata,
    instructions: String,
    tools: ToolRegistry,
    handoffs: Vec<Arc<Agent>>,
    model: Option<String>,
}

impl Agent {
    /// Start building an agent
    pub fn builder(name: impl Into<String>) -> AgentBuilder {
        AgentBuilder::new(name)
    }

    /// The agent's name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// The agent's metadata
    pub fn metadata(&self) -> &AgentMetadata {
        &self.metadata
    }

    /// System instructions sent while this agent is active
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Model override, if any
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Tools available to this agent
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Agents this one may hand off to
    pub fn handoffs(&self) -> &[Arc<Agent>] {
        &self.handoffs
    }

    /// Name of the tool that hands control to this agent
    pub fn handoff_tool_name(&self) -> String {
        format!("{}{}", HANDOFF_PREFIX, tool_style(self.name()))
    }

    /// Definition of the tool that hands control to this agent
    pub fn handoff_definition(&self) -> ToolDefinition {
        let mut description = format!(
            "Handoff to the {} agent to handle the request.",
            self.name()
        );
        if let Some(extra) = &self.metadata.handoff_description {
            description.push(' ');
            description.push_str(extra);
        }
        ToolDefinition {
            name: self.handoff_tool_name(),
            description,
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    /// Find the handoff target addressed by a tool name
    pub fn find_handoff(&self, tool_name: &str) -> Option<&Arc<Agent>> {
        self.handoffs
            .iter()
            .find(|agent| agent.handoff_tool_name() == tool_name)
    }

    /// All tool definitions offered to the model: own tools, then handoffs
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        let mut defs = self.tools.tool_definitions();
        defs.extend(self.handoffs.iter().map(|agent| agent.handoff_definition()));
        defs
    }
}

/// Lowercase, with every character outside `[a-z0-9]` mapped to `_`.
fn tool_style(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Builder for [`Agent`]
#[derive(Debug)]
pub struct AgentBuilder {
    metadata: AgentMetadata,
    instructions: String,
    tools: ToolRegistry,
    handoffs: Vec<Arc<Agent>>,
    model: Option<String>,
}

impl AgentBuilder {
    /// Create a builder for an agent with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            metadata: AgentMetadata::new(name),
            instructions: String::new(),
            tools: ToolRegistry::new(),
            handoffs: Vec::new(),
            model: None,
        }
    }

    /// Set the system instructions
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Set the description other agents see when handing off
    pub fn handoff_description(mut self, description: impl Into<String>) -> Self {
        self.metadata = self.metadata.with_handoff_description(description);
        self
    }

    /// Add a tool
    pub fn tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.register(tool);
        self
    }

    /// Add a shared tool
    pub fn tool_arc(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.register_arc(tool);
        self
    }

    /// Add a handoff target
    pub fn handoff(mut self, agent: Arc<Agent>) -> Self {
        self.handoffs.push(agent);
        self
    }

    /// Pin a model for this agent
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Build the agent
    pub fn build(self) -> Result<Agent, AgentError> {
        if self.metadata.name.trim().is_empty() {
            return Err(AgentError::InitializationFailed {
                reason: "agent name must not be empty".to_string(),
            });
        }

        let mut seen = Vec::new();
        for target in &self.handoffs {
            let tool_name = target.handoff_tool_name();
            if self.tools.contains(&tool_name) || seen.contains(&tool_name) {
                return Err(AgentError::InitializationFailed {
                    reason: format!(
                        "agent {} has two tools named {}",
                        self.metadata.name, tool_name
                    ),
                });
            }
            seen.push(tool_name);
        }

        Ok(Agent {
            metadata: self.metadata,
            instructions: self.instructions,
            tools: self.tools,
            handoffs: self.handoffs,
            model: self.model,
        })
    }
}

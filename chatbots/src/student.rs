//! Smart Student assistant: a single agent answering one question.

use crate::error::Result;
use agentic::agent::Agent;
use agentic::runner::Runner;
use std::sync::Arc;

/// Asked when no question is given on the command line
pub const DEFAULT_QUESTION: &str = "who is the founder of Pakistan?";

const INSTRUCTIONS: &str = " You are a helpful student assistant. You help users by:
- Explaining academic topics in a simple way
- Giving useful study tips
- Summarizing short text passages

Always be friendly, clear, and student-focused.
";

pub fn build_agent() -> Result<Arc<Agent>> {
    let agent = Agent::builder("Smart Student Agent Assistant")
        .instructions(INSTRUCTIONS)
        .build()?;
    Ok(Arc::new(agent))
}

/// Ask the assistant one question and return its answer.
pub async fn ask(runner: &Runner, question: &str) -> Result<String> {
    let agent = build_agent()?;
    let result = runner.run(&agent, question).await?;
    Ok(result.final_output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentic::error::LlmError;
    use agentic::testing::ScriptedProvider;

    #[tokio::test]
    async fn test_ask_returns_final_output() {
        let provider = Arc::new(ScriptedProvider::new().then_text("Muhammad Ali Jinnah."));
        let runner = Runner::new(provider.clone());

        let answer = ask(&runner, DEFAULT_QUESTION).await.unwrap();
        assert_eq!(answer, "Muhammad Ali Jinnah.");

        let request = &provider.requests()[0];
        assert!(request.system.as_deref().unwrap().contains("student assistant"));
        assert!(request.tools.is_none());
    }

    #[tokio::test]
    async fn test_ask_propagates_failures() {
        let provider = Arc::new(ScriptedProvider::new().then_error(LlmError::Network("offline".into())));
        let err = ask(&Runner::new(provider), "what is osmosis?").await.unwrap_err();
        assert!(matches!(err, crate::Error::Run(_)));
    }
}

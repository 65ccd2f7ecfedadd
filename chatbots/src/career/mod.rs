//! Career Mentor: routes questions about tech careers, skills and jobs to
//! one of three specialists.

pub mod agents;
pub mod roadmaps;

use crate::chat::{ChatHandler, session_runner};
use crate::error::Result;
use crate::history::ChatHistory;
use agentic::agent::Agent;
use agentic::runner::Runner;
use async_trait::async_trait;
use std::sync::Arc;

pub const WELCOME: &str = "Welcome to Career Mentor! Ask about tech jobs, skills, or earning online.";

/// Career Mentor session
#[derive(Debug)]
pub struct CareerMentor {
    runner: Runner,
    triage: Arc<Agent>,
    history: ChatHistory,
}

impl CareerMentor {
    pub fn new(runner: Runner) -> Result<Self> {
        Ok(Self {
            runner: session_runner(runner),
            triage: agents::build_triage()?,
            history: ChatHistory::new(),
        })
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }
}

#[async_trait]
impl ChatHandler for CareerMentor {
    fn on_chat_start(&mut self) -> String {
        self.history = ChatHistory::new();
        WELCOME.to_string()
    }

    fn placeholder(&self) -> Option<&str> {
        Some("Thinking...")
    }

    async fn on_message(&mut self, text: &str) -> String {
        self.history.push_user(text);

        match self.runner.run(&self.triage, self.history.to_messages()).await {
            Ok(result) => {
                tracing::debug!(agent = %result.last_agent, turns = result.turns, "career reply");
                self.history.push_assistant(result.final_output.clone());
                result.final_output
            }
            Err(e) => {
                tracing::warn!(error = %e, "career run failed");
                format!("Oops, something went wrong: {}", e)
            }
        }
    }
}

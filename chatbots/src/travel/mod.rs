//! AI Travel Designer: destination ideas, mock bookings and local alerts for
//! travellers from Pakistan.
//!
//! Besides the chat history, a session remembers the last budget and the
//! last known destination the user mentioned. Both are passed to every run
//! as a system note so the agents can personalise without the user
//! repeating themselves.

pub mod agents;
pub mod data;
pub mod tools;

use crate::chat::{ChatHandler, session_runner};
use crate::error::Result;
use crate::history::ChatHistory;
use agentic::agent::Agent;
use agentic::message::Message;
use agentic::runner::Runner;
use async_trait::async_trait;
use std::sync::Arc;

pub const WELCOME: &str = "Welcome to the AI Travel Designer! Where would you like to go?";

/// Budget following the word `budget`, e.g. `budget ₹50,000` gives `50000.0`.
pub fn extract_budget(text: &str) -> Option<f64> {
    let (_, rest) = text.split_once("budget")?;
    let rest = rest.split("budget").next()?;
    let word = rest.split_whitespace().next()?;
    word.replace(['\u{20b9}', ','], "").parse().ok()
}

/// Travel Designer session
#[derive(Debug)]
pub struct TravelDesigner {
    runner: Runner,
    triage: Arc<Agent>,
    history: ChatHistory,
    budget: Option<f64>,
    destination: Option<&'static str>,
}

impl TravelDesigner {
    pub fn new(runner: Runner) -> Result<Self> {
        Ok(Self {
            runner: session_runner(runner),
            triage: agents::build_triage()?,
            history: ChatHistory::new(),
            budget: None,
            destination: None,
        })
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn budget(&self) -> Option<f64> {
        self.budget
    }

    pub fn destination(&self) -> Option<&'static str> {
        self.destination
    }

    fn session_note(&self) -> Option<String> {
        let mut facts = Vec::new();
        if let Some(destination) = self.destination {
            facts.push(format!("destination: {}", destination));
        }
        if let Some(budget) = self.budget {
            facts.push(format!("budget: \u{20b9}{} PKR", tools::format_pkr(budget)));
        }
        if facts.is_empty() {
            return None;
        }
        Some(format!("Session data ({})", facts.join(", ")))
    }

    fn run_input(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        if let Some(note) = self.session_note() {
            messages.push(Message::system(note));
        }
        messages.extend(self.history.to_messages());
        messages
    }
}

#[async_trait]
impl ChatHandler for TravelDesigner {
    fn on_chat_start(&mut self) -> String {
        self.history = ChatHistory::new();
        self.budget = None;
        self.destination = None;
        WELCOME.to_string()
    }

    fn placeholder(&self) -> Option<&str> {
        Some("Let me think about that...")
    }

    async fn on_message(&mut self, text: &str) -> String {
        let input = text.to_lowercase();

        if input.contains("budget") {
            match extract_budget(&input) {
                Some(budget) => self.budget = Some(budget),
                None => tracing::debug!("budget mentioned but not readable"),
            }
        }
        if let Some(destination) = data::detect_destination(&input) {
            self.destination = Some(destination);
        }

        self.history.push_user(input);

        match self.runner.run(&self.triage, self.run_input()).await {
            Ok(result) => {
                tracing::debug!(agent = %result.last_agent, turns = result.turns, "travel reply");
                self.history.push_assistant(result.final_output.clone());
                result.final_output
            }
            Err(e) => {
                tracing::warn!(error = %e, "travel run failed");
                format!("Oops, something went wrong: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentic::message::Role;
    use agentic::testing::ScriptedProvider;

    #[test]
    fn test_extract_budget() {
        assert_eq!(extract_budget("my budget \u{20b9}50,000 for hunza"), Some(50000.0));
        assert_eq!(extract_budget("budget 75000"), Some(75000.0));
        assert_eq!(extract_budget("budget is tight"), None);
        assert_eq!(extract_budget("over budget"), None);
        assert_eq!(extract_budget("no money"), None);
        // Only the text up to the next "budget" counts.
        assert_eq!(extract_budget("budget 5000budget"), Some(5000.0));
        assert_eq!(extract_budget("budget budget 5000"), None);
    }

    #[tokio::test]
    async fn test_session_data_reaches_the_model_but_not_history() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .then_text("Hunza is lovely in spring.")
                .then_text("Still Hunza."),
        );
        let mut designer = TravelDesigner::new(Runner::new(provider.clone())).unwrap();
        assert_eq!(designer.on_chat_start(), WELCOME);

        designer.on_message("Trip to HUNZA, budget \u{20b9}60,000").await;
        assert_eq!(designer.budget(), Some(60000.0));
        assert_eq!(designer.destination(), Some("hunza"));

        // Unreadable budget keeps the previous one.
        designer.on_message("budget is flexible").await;
        assert_eq!(designer.budget(), Some(60000.0));

        let entries = designer.history().entries();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].content, "trip to hunza, budget \u{20b9}60,000");

        let request = &provider.requests()[0];
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(
            request.messages[0].text_content(),
            "Session data (destination: hunza, budget: \u{20b9}60,000.0 PKR)"
        );
        assert_eq!(request.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_no_note_without_session_data() {
        let provider = Arc::new(ScriptedProvider::new().then_text("Try the mountains."));
        let mut designer = TravelDesigner::new(Runner::new(provider.clone())).unwrap();

        designer.on_message("I want nature").await;

        let request = &provider.requests()[0];
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_failure_keeps_user_entry() {
        let provider = Arc::new(ScriptedProvider::new());
        let mut designer = TravelDesigner::new(Runner::new(provider)).unwrap();

        let reply = designer.on_message("book dubai").await;
        assert!(reply.starts_with("Oops, something went wrong: "));
        assert_eq!(designer.history().len(), 1);
    }
}

//! Per-session chat history.

use agentic::message::{Message, Role};
use serde::Serialize;

/// One entry of the history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

/// Append-only record of what the user said and what the bot answered.
///
/// Lives as long as the session and is never persisted.
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    entries: Vec<HistoryEntry>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Role::User, content.into());
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Role::Assistant, content.into());
    }

    fn push(&mut self, role: Role, content: String) {
        self.entries.push(HistoryEntry { role, content });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The history as model input, oldest first
    pub fn to_messages(&self) -> Vec<Message> {
        self.entries
            .iter()
            .map(|entry| match entry.role {
                Role::Assistant => Message::assistant(entry.content.clone()),
                _ => Message::user(entry.content.clone()),
            })
            .collect()
    }
}

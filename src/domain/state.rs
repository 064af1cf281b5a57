//! Conversation state
//!
//! One `ConversationState` lives for exactly one pipeline run. The orchestrator
//! owns it and lends it mutably to each stage in turn.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Day, Destination, Preferences};

/// Who said a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single turn in the chat history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatTurn {
    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

/// Mutable record threaded through every pipeline stage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationState {
    /// Structured preferences; keys are added or overwritten, never removed
    pub preferences: Preferences,

    /// Catalog entries matching the preferences, in catalog order
    pub suggested_destinations: Vec<Destination>,

    /// Day-by-day plan, chronological; empty until synthesized
    pub itinerary: Vec<Day>,

    /// Append-only chat history
    pub chat_history: Vec<ChatTurn>,

    /// Whether the latest user turn revises an earlier request
    pub is_followup: bool,

    /// The single user-facing message, set by the renderer
    pub final_response: Option<String>,
}

impl ConversationState {
    /// Create a state seeded with one user message
    pub fn from_message(text: impl Into<String>) -> Self {
        let mut state = Self::default();
        state.push_user(text);
        state
    }

    /// Append a user turn
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.chat_history.push(ChatTurn::user(text));
    }

    /// Append an assistant turn
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.chat_history.push(ChatTurn::assistant(text));
    }

    /// Text of the most recent user turn, or "" when there is none
    pub fn last_user_message(&self) -> &str {
        let last = self
            .chat_history
            .iter()
            .rev()
            .find(|turn| turn.speaker == Speaker::User)
            .map(|turn| turn.text.as_str())
            .unwrap_or("");
        debug!(len = last.len(), "last_user_message: called");
        last
    }

    /// The headline destination (first suggestion), if any
    pub fn headline_destination(&self) -> Option<&Destination> {
        self.suggested_destinations.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_user_message_empty_history() {
        let state = ConversationState::default();
        assert_eq!(state.last_user_message(), "");
    }

    #[test]
    fn test_last_user_message_skips_assistant_turns() {
        let mut state = ConversationState::from_message("first request");
        state.push_assistant("here are some options");
        state.push_user("something cheaper");
        state.push_assistant("sure");

        assert_eq!(state.last_user_message(), "something cheaper");
    }

    #[test]
    fn test_speaker_serializes_lowercase() {
        let turn = ChatTurn::user("hi");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["speaker"], "user");
        assert_eq!(Speaker::Assistant.to_string(), "assistant");
    }
}

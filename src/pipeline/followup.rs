//! Follow-up detection

use async_trait::async_trait;
use tracing::info;

use super::Stage;
use crate::domain::ConversationState;

/// Words that signal the user is revising an earlier request
pub const FOLLOWUP_KEYWORDS: [&str; 8] = [
    "change",
    "another",
    "cheaper",
    "instead",
    "more",
    "different",
    "else",
    "alternative",
];

/// True when the message contains any revision keyword (case-insensitive)
pub fn is_followup(message: &str) -> bool {
    let lowered = message.to_lowercase();
    FOLLOWUP_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// Stage that classifies the latest user turn
#[derive(Debug, Clone, Copy, Default)]
pub struct FollowupDetector;

#[async_trait]
impl Stage for FollowupDetector {
    fn name(&self) -> &'static str {
        "check_followup"
    }

    async fn apply(&self, state: &mut ConversationState) {
        state.is_followup = is_followup(state.last_user_message());
        info!(is_followup = state.is_followup, "Follow-up check");
    }
}

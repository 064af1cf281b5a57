//! Preference extraction
//!
//! Keyword matching over the latest user message. Each trigger phrase maps to
//! exactly one preference key and a fixed value.

use async_trait::async_trait;
use tracing::{debug, info};

use super::Stage;
use crate::domain::{ConversationState, PreferenceKey, Preferences};

/// Trigger phrase -> (key, value), checked in order
///
/// Triggers are independent. When two triggers present in the same message
/// map to the same key, the one listed later wins.
pub const TRIGGERS: &[(&str, PreferenceKey, &str)] = &[
    ("beach", PreferenceKey::Interest, "beach"),
    ("mountain", PreferenceKey::Interest, "mountain"),
    ("city break", PreferenceKey::Interest, "city"),
    ("europe", PreferenceKey::Region, "europe"),
    ("asia", PreferenceKey::Region, "asia"),
    ("america", PreferenceKey::Region, "america"),
    ("africa", PreferenceKey::Region, "africa"),
    ("oceania", PreferenceKey::Region, "oceania"),
    ("low budget", PreferenceKey::Budget, "low"),
    ("mid-range", PreferenceKey::Budget, "medium"),
    ("luxury", PreferenceKey::Budget, "high"),
    ("solo", PreferenceKey::TravelType, "solo"),
    ("couple", PreferenceKey::TravelType, "couple"),
    ("family", PreferenceKey::TravelType, "family"),
    ("friends", PreferenceKey::TravelType, "friends"),
    ("adventure", PreferenceKey::TravelStyle, "adventure"),
    ("relax", PreferenceKey::TravelStyle, "relaxation"),
    ("culture", PreferenceKey::TravelStyle, "culture"),
    ("summer", PreferenceKey::Season, "summer"),
    ("winter", PreferenceKey::Season, "winter"),
    ("weekend", PreferenceKey::Duration, "2 days"),
    ("7 days", PreferenceKey::Duration, "7 days"),
    ("two weeks", PreferenceKey::Duration, "14 days"),
];

/// Derive preferences from a single message
pub fn extract_preferences(message: &str) -> Preferences {
    let lowered = message.to_lowercase();
    let mut preferences = Preferences::default();

    for (trigger, key, value) in TRIGGERS {
        if lowered.contains(trigger) {
            debug!(%trigger, %key, %value, "extract_preferences: trigger matched");
            preferences.set(*key, *value);
        }
    }

    preferences
}

/// Stage that merges extracted preferences into the state
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferenceExtractor;

#[async_trait]
impl Stage for PreferenceExtractor {
    fn name(&self) -> &'static str {
        "extract_preferences"
    }

    async fn apply(&self, state: &mut ConversationState) {
        let extracted = extract_preferences(state.last_user_message());
        info!(preferences = ?extracted, "Extracted preferences");
        state.preferences.merge(extracted);
    }
}

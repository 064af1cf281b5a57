//! Response rendering

use async_trait::async_trait;
use tracing::{debug, info};

use super::Stage;
use crate::domain::ConversationState;

pub const NO_MATCHES_MESSAGE: &str =
    "Sorry, I couldn't find any destinations matching your preferences. Could you give me more details?";

pub const FOLLOWUP_HEADER: &str = "Here are some new options based on your updated preferences:";

pub const SUGGESTION_HEADER: &str = "Based on your preferences, I suggest the following destinations:";

/// Build the single user-facing message for a state
///
/// Branches in order: no suggestions, itinerary, suggestion list.
pub fn render_response(state: &ConversationState) -> String {
    let Some(headline) = state.headline_destination() else {
        debug!("render_response: no suggestions");
        return NO_MATCHES_MESSAGE.to_string();
    };

    let mut lines = Vec::new();
    if !state.itinerary.is_empty() {
        debug!(days = state.itinerary.len(), "render_response: itinerary branch");
        lines.push(match &headline.region {
            Some(region) => format!("Here's a travel plan for your trip to {} in {}:", headline.name, region),
            None => format!("Here's a travel plan for your trip to {}:", headline.name),
        });
        for (index, day) in state.itinerary.iter().enumerate() {
            let label = format!("Day {}", index + 1);
            // Placeholder days already lead with "Day N: "
            let activities = day
                .activities
                .strip_prefix(&label)
                .and_then(|rest| rest.strip_prefix(": "))
                .unwrap_or(&day.activities);
            lines.push(format!("{} ({}): {}", label, day.date_label(), activities));
        }
    } else {
        debug!(is_followup = state.is_followup, "render_response: suggestion branch");
        lines.push(if state.is_followup { FOLLOWUP_HEADER } else { SUGGESTION_HEADER }.to_string());
        for dest in &state.suggested_destinations {
            lines.push(format!("- {}", dest.label()));
        }
    }

    lines.join("\n")
}

/// Stage that writes `final_response`
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseRenderer;

#[async_trait]
impl Stage for ResponseRenderer {
    fn name(&self) -> &'static str {
        "generate_response"
    }

    async fn apply(&self, state: &mut ConversationState) {
        let response = render_response(state);
        info!(len = response.len(), "Rendered response");
        state.final_response = Some(response);
    }
}

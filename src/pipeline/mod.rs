//! Travel planning pipeline
//!
//! A fixed, ordered list of stages threads one `ConversationState` through
//! preference extraction, destination filtering, follow-up detection,
//! itinerary synthesis and response rendering. Stages never fail; the run
//! always ends with a non-empty `final_response`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::domain::ConversationState;
use crate::llm::TextGenerator;
use crate::prompts::PromptLoader;

mod extractor;
mod filter;
mod followup;
mod renderer;
mod synthesizer;

pub use extractor::{PreferenceExtractor, TRIGGERS, extract_preferences};
pub use filter::{DestinationFilter, filter_destinations, matches};
pub use followup::{FOLLOWUP_KEYWORDS, FollowupDetector, is_followup};
pub use renderer::{FOLLOWUP_HEADER, NO_MATCHES_MESSAGE, ResponseRenderer, SUGGESTION_HEADER, render_response};
pub use synthesizer::{
    DEFAULT_GENERATION_TIMEOUT, ItinerarySynthesizer, ParsedItinerary, SkipReason, SynthesisOutcome,
    fallback_activity, fallback_itinerary, parse_itinerary,
};

/// One step of the pipeline
///
/// A stage reads and mutates the shared state. It has no error path: missing
/// inputs and failed collaborators resolve to well-defined results.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Stable stage name used in logs
    fn name(&self) -> &'static str;

    /// Apply the stage to the state
    async fn apply(&self, state: &mut ConversationState);
}

/// Ordered stage runner
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// extract_preferences -> find_destinations -> check_followup -> create_itinerary -> generate_response
    pub fn standard(
        catalog: Catalog,
        generator: Arc<dyn TextGenerator>,
        prompts: PromptLoader,
        generation_timeout: Duration,
    ) -> Self {
        debug!(catalog_size = catalog.len(), ?generation_timeout, "Pipeline::standard: called");
        Self::new(vec![
            Box::new(PreferenceExtractor),
            Box::new(DestinationFilter::new(catalog)),
            Box::new(FollowupDetector),
            Box::new(ItinerarySynthesizer::new(generator, prompts).with_timeout(generation_timeout)),
            Box::new(ResponseRenderer),
        ])
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run every stage in order over `state`
    pub async fn run(&self, mut state: ConversationState) -> ConversationState {
        let run_id = Uuid::now_v7();
        let span = info_span!("pipeline", %run_id);

        async move {
            info!(turns = state.chat_history.len(), "Pipeline run started");
            for stage in &self.stages {
                debug!(stage = stage.name(), "run: applying stage");
                stage.apply(&mut state).await;
            }

            if state.final_response.as_deref().is_none_or(|r| r.trim().is_empty()) {
                debug!("run: no stage produced a response, rendering one");
                state.final_response = Some(render_response(&state));
            }
            info!(
                destinations = state.suggested_destinations.len(),
                itinerary_days = state.itinerary.len(),
                is_followup = state.is_followup,
                "Pipeline run finished"
            );
            state
        }
        .instrument(span)
        .await
    }

    /// Add a user message to an existing conversation and run again
    ///
    /// Preferences and suggestions from earlier turns carry over. The previous
    /// response moves into the history as an assistant turn.
    pub async fn respond(&self, mut state: ConversationState, message: impl Into<String>) -> ConversationState {
        if let Some(previous) = state.final_response.take() {
            state.push_assistant(previous);
        }
        state.push_user(message);
        self.run(state).await
    }
}

//! Offline generator
//!
//! Stands in for a real provider when none can be configured (e.g. no API
//! key). Every call fails, which sends the itinerary stage down its fallback.

use async_trait::async_trait;
use tracing::debug;

use super::{LlmError, TextGenerator};

/// Generator that is never available
#[derive(Debug, Clone)]
pub struct OfflineGenerator {
    reason: String,
}

impl OfflineGenerator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        debug!(reason = %self.reason, "OfflineGenerator::generate: called");
        Err(LlmError::Unavailable(self.reason.clone()))
    }
}

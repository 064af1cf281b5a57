//! Text generation for the travel agent
//!
//! The pipeline only sees the narrow `TextGenerator` capability. Provider
//! clients live behind it so tests can substitute deterministic stubs.

use std::sync::Arc;

use tracing::debug;

mod anthropic;
pub mod client;
mod error;
mod offline;
mod openai;
mod types;

pub use anthropic::AnthropicClient;
pub use client::TextGenerator;
pub use error::LlmError;
pub use offline::OfflineGenerator;
pub use openai::OpenAIClient;
pub use types::{Completion, StopReason, TokenUsage};

use crate::config::LlmConfig;

/// Create a text generator based on the provider specified in config
///
/// Supports "anthropic" and "openai" providers.
pub fn create_generator(config: &LlmConfig, max_tokens: u32) -> Result<Arc<dyn TextGenerator>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_generator: called");
    match config.provider.as_str() {
        "anthropic" => {
            debug!("create_generator: creating Anthropic client");
            Ok(Arc::new(AnthropicClient::from_config(config, max_tokens)?))
        }
        "openai" => {
            debug!("create_generator: creating OpenAI client");
            Ok(Arc::new(OpenAIClient::from_config(config, max_tokens)?))
        }
        other => {
            debug!(provider = %other, "create_generator: unknown provider");
            Err(LlmError::Unavailable(format!(
                "Unknown LLM provider: '{}'. Supported: anthropic, openai",
                other
            )))
        }
    }
}

/// Create a generator, degrading to `OfflineGenerator` when none can be built
pub fn create_generator_or_offline(config: &LlmConfig, max_tokens: u32) -> Arc<dyn TextGenerator> {
    match create_generator(config, max_tokens) {
        Ok(generator) => generator,
        Err(e) => {
            tracing::warn!(error = %e, "Text generation unavailable; itineraries will use the fallback plan");
            Arc::new(OfflineGenerator::new(e.to_string()))
        }
    }
}

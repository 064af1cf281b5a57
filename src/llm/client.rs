//! TextGenerator trait definition

use async_trait::async_trait;

use super::LlmError;

/// Opaque text-generation capability: prompt in, text out
///
/// Each call is independent; no conversation state is kept between calls.
/// Implementations make exactly one provider request per call.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a single prompt
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

//! Provider-agnostic response metadata

use tracing::debug;

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
}

impl StopReason {
    /// Parse from Anthropic API stop_reason string
    pub fn from_anthropic(s: &str) -> Self {
        debug!(%s, "StopReason::from_anthropic: called");
        match s {
            "max_tokens" => StopReason::MaxTokens,
            "stop_sequence" => StopReason::StopSequence,
            _ => StopReason::EndTurn,
        }
    }

    /// Parse from OpenAI API finish_reason string
    pub fn from_openai(s: Option<&str>) -> Self {
        debug!(?s, "StopReason::from_openai: called");
        match s {
            Some("length") => StopReason::MaxTokens,
            _ => StopReason::EndTurn,
        }
    }
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Text returned by a provider, before the trait boundary strips metadata
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: Option<String>,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
}

impl Completion {
    /// Reduce to the generated text, rejecting empty output
    pub fn into_text(self) -> Result<String, super::LlmError> {
        debug!(stop_reason = ?self.stop_reason, usage = ?self.usage, "Completion::into_text: called");
        if self.stop_reason == StopReason::MaxTokens {
            tracing::warn!("Completion hit max tokens; output may be truncated");
        }
        match self.text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(super::LlmError::InvalidResponse("empty completion".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_reason_from_anthropic() {
        assert_eq!(StopReason::from_anthropic("end_turn"), StopReason::EndTurn);
        assert_eq!(StopReason::from_anthropic("max_tokens"), StopReason::MaxTokens);
        assert_eq!(StopReason::from_anthropic("stop_sequence"), StopReason::StopSequence);
        assert_eq!(StopReason::from_anthropic("something_new"), StopReason::EndTurn);
    }

    #[test]
    fn test_stop_reason_from_openai() {
        assert_eq!(StopReason::from_openai(Some("stop")), StopReason::EndTurn);
        assert_eq!(StopReason::from_openai(Some("length")), StopReason::MaxTokens);
        assert_eq!(StopReason::from_openai(None), StopReason::EndTurn);
    }

    #[test]
    fn test_into_text_rejects_blank() {
        let completion = Completion {
            text: Some("   \n".to_string()),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        };
        assert!(completion.into_text().is_err());

        let completion = Completion {
            text: None,
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        };
        assert!(completion.into_text().is_err());
    }

    #[test]
    fn test_into_text_keeps_truncated_output() {
        let completion = Completion {
            text: Some("**Day 1**".to_string()),
            stop_reason: StopReason::MaxTokens,
            usage: TokenUsage::default(),
        };
        assert_eq!(completion.into_text().unwrap(), "**Day 1**");
    }
}

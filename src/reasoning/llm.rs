use crate::pipeline::{Context, ImagingFeatures};

use super::client::LlmClient;
use super::parser::parse_assessment;
use super::prompt::{build_reasoning_prompt, SYSTEM_PROMPT};
use super::{Assessment, Reasoner, ReasoningError};

/// Reasoner backed by a chat-completions model.
pub struct LlmReasoner<C: LlmClient> {
    client: C,
}

impl<C: LlmClient> LlmReasoner<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: LlmClient> Reasoner for LlmReasoner<C> {
    fn reason(
        &self,
        imaging: &ImagingFeatures,
        clinical_text: &str,
        context: &Context,
    ) -> Assessment {
        let prompt = build_reasoning_prompt(imaging, clinical_text, context);
        tracing::debug!(prompt_len = prompt.len(), "Calling LLM for reasoning");

        match self.client.complete(SYSTEM_PROMPT, &prompt) {
            Ok(reply) => parse_assessment(&reply),
            Err(e) => {
                tracing::warn!(error = %e, "LLM reasoning failed");
                error_assessment(&e)
            }
        }
    }
}

/// Assessment standing in for a failed model call.
pub fn error_assessment(error: &ReasoningError) -> Assessment {
    match error {
        ReasoningError::Timeout(_) => Assessment::new(
            "Unknown",
            0.0,
            "Request timeout - API took too long to respond",
            "Timeout Error",
            "Retry request",
        ),
        ReasoningError::Api { status, body } => Assessment::new(
            "Unknown",
            0.0,
            &format!("API Error: {status} - {body}"),
            "Error",
            "System error - retry request",
        ),
        other => Assessment::new(
            "Unknown",
            0.0,
            &format!("Exception occurred: {other}"),
            "System Error",
            "Check logs and retry",
        ),
    }
}

//! Turns a knowledge-graph context into a final diagnostic assessment.
//!
//! Two reasoners exist: `LlmReasoner`, which asks a chat-completions model,
//! and `RuleBasedReasoner`, which reads the top differential directly.
//! Reasoners never fail; errors become an assessment that says so.

pub mod client;
pub mod fallback;
pub mod llm;
pub mod orchestrator;
pub mod parser;
pub mod prompt;

pub use client::{LlmClient, MockLlmClient, OpenRouterClient};
pub use fallback::{fallback_assessment, RuleBasedReasoner};
pub use llm::LlmReasoner;
pub use orchestrator::{DiagnosisReport, DiagnosisService, KgOnlyReport};
pub use parser::parse_assessment;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::{Context, ImagingFeatures};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReasoningError {
    #[error("LLM endpoint unreachable: {0}")]
    Connection(String),

    #[error("LLM request timed out after {0}s")]
    Timeout(u64),

    #[error("LLM returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("No API key configured")]
    MissingApiKey,
}

/// Final diagnostic assessment, as returned by a reasoner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub diagnosis: String,
    pub confidence: f64,
    pub reasoning_text: String,
    pub primary_concern: String,
    pub recommended_action: String,
}

impl Assessment {
    pub fn new(
        diagnosis: &str,
        confidence: f64,
        reasoning_text: &str,
        primary_concern: &str,
        recommended_action: &str,
    ) -> Self {
        Self {
            diagnosis: diagnosis.into(),
            confidence,
            reasoning_text: reasoning_text.into(),
            primary_concern: primary_concern.into(),
            recommended_action: recommended_action.into(),
        }
    }
}

/// Produces an assessment from raw inputs plus graph evidence.
pub trait Reasoner {
    fn reason(
        &self,
        imaging: &ImagingFeatures,
        clinical_text: &str,
        context: &Context,
    ) -> Assessment;
}

impl<R: Reasoner + ?Sized> Reasoner for Box<R> {
    fn reason(
        &self,
        imaging: &ImagingFeatures,
        clinical_text: &str,
        context: &Context,
    ) -> Assessment {
        (**self).reason(imaging, clinical_text, context)
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

use serde::{Deserialize, Serialize};

use crate::pipeline::{Context, DiagnosisRequest, DifferentialEngine};

use super::fallback::{fallback_assessment, score_confidence};
use super::{round2, Assessment, Reasoner};

/// Confidence used when the reasoner gives none and the graph matched nothing.
const NO_MATCH_CONFIDENCE: f64 = 0.5;

/// Full answer to a diagnosis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisReport {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub kg_context_used: Context,
    pub input_used: DiagnosisRequest,
}

/// Graph-only answer: the context plus the rule-based assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KgOnlyReport {
    pub kg_context: Context,
    pub fallback_diagnosis: Assessment,
}

/// Runs the differential engine, then a reasoner over its output.
pub struct DiagnosisService<R: Reasoner> {
    engine: DifferentialEngine,
    reasoner: R,
}

impl<R: Reasoner> DiagnosisService<R> {
    pub fn new(engine: DifferentialEngine, reasoner: R) -> Self {
        Self { engine, reasoner }
    }

    pub fn engine(&self) -> &DifferentialEngine {
        &self.engine
    }

    pub fn diagnose(&self, request: &DiagnosisRequest) -> DiagnosisReport {
        let context = self
            .engine
            .differential_context(&request.imaging_result, &request.clinical_text);

        let mut assessment =
            self.reasoner
                .reason(&request.imaging_result, &request.clinical_text, &context);

        if assessment.confidence == 0.0 {
            assessment.confidence = context
                .top_candidate()
                .map(|c| score_confidence(c.total_score))
                .unwrap_or(NO_MATCH_CONFIDENCE);
        }
        assessment.confidence = round2(assessment.confidence);

        tracing::info!(
            diagnosis = %assessment.diagnosis,
            confidence = assessment.confidence,
            "Reasoning complete"
        );

        DiagnosisReport {
            assessment,
            kg_context_used: context,
            input_used: request.clone(),
        }
    }

    pub fn kg_only(&self, request: &DiagnosisRequest) -> KgOnlyReport {
        let kg_context = self
            .engine
            .differential_context(&request.imaging_result, &request.clinical_text);
        let fallback_diagnosis = fallback_assessment(&kg_context);
        KgOnlyReport {
            kg_context,
            fallback_diagnosis,
        }
    }
}

use std::sync::Arc;

use crate::graph::GraphStore;

use super::context::{assemble, Context};
use super::extraction::{extract_all, ImagingFeatures};
use super::scoring::score;

/// Query entry point over a shared, immutable knowledge graph.
///
/// Cheap to clone; any number of threads may query the same graph.
#[derive(Debug, Clone)]
pub struct DifferentialEngine {
    graph: Arc<GraphStore>,
}

impl DifferentialEngine {
    pub fn new(graph: Arc<GraphStore>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &Arc<GraphStore> {
        &self.graph
    }

    /// Extract features, score candidate diseases and package the evidence.
    pub fn differential_context(&self, imaging: &ImagingFeatures, clinical_text: &str) -> Context {
        let features = extract_all(imaging, clinical_text);
        let ranked = score(
            &self.graph,
            &features.findings,
            &features.symptoms,
            &features.risk_factors,
        );
        let context = assemble(
            &self.graph,
            &features.findings,
            &features.symptoms,
            &features.risk_factors,
            ranked,
        );

        tracing::info!(
            findings = context.identified_findings.len(),
            symptoms = context.identified_symptoms.len(),
            risk_factors = context.identified_risk_factors.len(),
            differentials = context.differential_diagnoses.len(),
            top = context.top_candidate().map(|c| c.disease_id.as_str()).unwrap_or("none"),
            "Differential context assembled"
        );

        context
    }
}

use crate::models::Malignancy;
use crate::pipeline::{Context, ImagingFeatures};

use super::{round2, Assessment, Reasoner};

/// Top score that maps to full fallback confidence.
pub const SCORE_NORMALIZER: f64 = 20.0;
/// Fallback confidence never exceeds this.
pub const MAX_FALLBACK_CONFIDENCE: f64 = 0.95;

/// Reasoner that reads the top differential without calling a model.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedReasoner;

impl Reasoner for RuleBasedReasoner {
    fn reason(
        &self,
        _imaging: &ImagingFeatures,
        _clinical_text: &str,
        context: &Context,
    ) -> Assessment {
        fallback_assessment(context)
    }
}

/// Confidence implied by a KG score, before rounding.
pub fn score_confidence(total_score: f64) -> f64 {
    (total_score / SCORE_NORMALIZER).min(MAX_FALLBACK_CONFIDENCE)
}

pub fn fallback_assessment(context: &Context) -> Assessment {
    let Some(top) = context.top_candidate() else {
        return Assessment::new(
            "Uncertain",
            0.5,
            "No Knowledge Graph matches found. Unable to provide diagnosis.",
            "Unknown",
            "Requires manual review",
        );
    };

    let (diagnosis, action) = match top.malignancy {
        Malignancy::Malignant => ("Likely malignant", "Urgent: Biopsy recommended"),
        Malignancy::PreMalignant => (
            "Pre-malignant lesion detected",
            "Biopsy recommended for confirmation",
        ),
        Malignancy::Benign => ("Likely benign", "Follow-up imaging in 6 months"),
    };

    let reasoning = format!(
        "Based on Knowledge Graph analysis: {} is the top match. Evidence: {}.",
        top.disease_name,
        top.matched_findings.join(", ")
    );

    Assessment::new(
        diagnosis,
        round2(score_confidence(top.total_score)),
        &reasoning,
        &top.disease_name,
        action,
    )
}

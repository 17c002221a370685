use serde::{Deserialize, Serialize};

use crate::graph::GraphStore;

use super::extraction::FeatureSet;
use super::scoring::DiagnosisCandidate;

/// Knowledge-graph evidence handed to the reasoning stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub differential_diagnoses: Vec<DiagnosisCandidate>,
    pub identified_findings: Vec<String>,
    pub identified_symptoms: Vec<String>,
    pub identified_risk_factors: Vec<String>,
}

/// Package extracted features and ranked differentials.
/// Ids the graph does not know are skipped.
pub fn assemble(
    graph: &GraphStore,
    findings: &FeatureSet,
    symptoms: &FeatureSet,
    risk_factors: &FeatureSet,
    candidates: Vec<DiagnosisCandidate>,
) -> Context {
    Context {
        differential_diagnoses: candidates,
        identified_findings: resolve_names(graph, findings),
        identified_symptoms: resolve_names(graph, symptoms),
        identified_risk_factors: resolve_names(graph, risk_factors),
    }
}

fn resolve_names(graph: &GraphStore, ids: &FeatureSet) -> Vec<String> {
    ids.iter()
        .filter_map(|id| graph.name_of(id))
        .map(str::to_string)
        .collect()
}

impl Context {
    pub fn top_candidate(&self) -> Option<&DiagnosisCandidate> {
        self.differential_diagnoses.first()
    }

    /// Render the context as the evidence block of an LLM prompt.
    pub fn render_for_prompt(&self) -> String {
        if self.differential_diagnoses.is_empty() {
            return "No relevant knowledge graph matches found.".to_string();
        }

        let mut text = String::from("KNOWLEDGE GRAPH ANALYSIS:\n\n");

        if !self.identified_findings.is_empty() {
            text.push_str(&format!(
                "Imaging Findings Detected: {}\n",
                self.identified_findings.join(", ")
            ));
        }
        if !self.identified_symptoms.is_empty() {
            text.push_str(&format!(
                "Clinical Symptoms: {}\n",
                self.identified_symptoms.join(", ")
            ));
        }
        if !self.identified_risk_factors.is_empty() {
            text.push_str(&format!(
                "Risk Factors: {}\n",
                self.identified_risk_factors.join(", ")
            ));
        }

        text.push_str("\nDIFFERENTIAL DIAGNOSES (from Knowledge Graph):\n\n");
        for (i, candidate) in self.differential_diagnoses.iter().enumerate() {
            text.push_str(&format_candidate(i + 1, candidate));
            text.push('\n');
        }
        text
    }
}

fn format_candidate(rank: usize, c: &DiagnosisCandidate) -> String {
    let mut text = format!(
        "{rank}. {} ({})\n",
        c.disease_name,
        c.malignancy.as_str().to_uppercase()
    );
    text.push_str(&format!("   - KG Confidence Score: {:.2}\n", c.total_score));
    text.push_str(&format!(
        "   - Matched Findings: {}\n",
        c.matched_findings.join(", ")
    ));
    if !c.symptom_match.matched_symptoms.is_empty() {
        text.push_str(&format!(
            "   - Matched Symptoms: {}\n",
            c.symptom_match.matched_symptoms.join(", ")
        ));
    }
    if !c.risk_factors.matched_risk_factors.is_empty() {
        text.push_str(&format!(
            "   - Risk Factors: {} (multiplier: {:.1}x)\n",
            c.risk_factors.matched_risk_factors.join(", "),
            c.risk_factors.risk_multiplier
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::breast_imaging_graph;
    use crate::graph::catalog::*;
    use crate::pipeline::scoring::score;

    fn set(ids: &[&str]) -> FeatureSet {
        ids.iter().copied().collect()
    }

    #[test]
    fn names_resolved_and_unknown_ids_skipped() {
        let g = breast_imaging_graph().unwrap();
        let ctx = assemble(
            &g,
            &set(&[MICROCALC, "GHOST"]),
            &set(&[PALPABLE_LUMP]),
            &set(&["UNKNOWN_RISK", AGE_OVER_50]),
            Vec::new(),
        );
        assert_eq!(ctx.identified_findings, vec!["Microcalcifications"]);
        assert_eq!(ctx.identified_symptoms, vec!["Palpable Lump"]);
        assert_eq!(ctx.identified_risk_factors, vec!["Age Over 50"]);
        assert!(ctx.top_candidate().is_none());
    }

    #[test]
    fn empty_context_renders_no_match_notice() {
        let ctx = Context::default();
        assert_eq!(
            ctx.render_for_prompt(),
            "No relevant knowledge graph matches found."
        );
    }

    #[test]
    fn rendered_context_lists_ranked_evidence() {
        let g = breast_imaging_graph().unwrap();
        let findings = set(&[MASS_IRREGULAR, HIGH_DENSITY]);
        let symptoms = set(&[PALPABLE_LUMP]);
        let risks = set(&[FAMILY_HISTORY]);
        let ranked = score(&g, &findings, &symptoms, &risks);
        let ctx = assemble(&g, &findings, &symptoms, &risks, ranked);

        let text = ctx.render_for_prompt();
        assert!(text.contains("Imaging Findings Detected: Irregular Mass, High Density Mass"));
        assert!(text.contains("Clinical Symptoms: Palpable Lump"));
        assert!(text.contains("1. Invasive Ductal Carcinoma (MALIGNANT)"));
        assert!(text.contains("KG Confidence Score: 38.00"));
        assert!(text.contains("Risk Factors: Family History (multiplier: 2.0x)"));

        let idc = text.find("Invasive Ductal Carcinoma").unwrap();
        let ilc = text.find("Invasive Lobular Carcinoma").unwrap();
        assert!(idc < ilc);
    }
}

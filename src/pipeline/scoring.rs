use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::GraphStore;
use crate::models::{Malignancy, NodeKind, Relation};

use super::extraction::FeatureSet;

/// Points per unit of SHOWS_FINDING confidence.
pub const FINDING_WEIGHT: f64 = 10.0;
/// Points per unit of HAS_SYMPTOM confidence.
pub const SYMPTOM_WEIGHT: f64 = 5.0;
/// Differentials kept after ranking.
pub const MAX_DIFFERENTIALS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomMatch {
    pub matched_symptoms: Vec<String>,
    pub symptom_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactorMatch {
    pub matched_risk_factors: Vec<String>,
    pub risk_multiplier: f64,
}

/// One ranked disease explanation, created fresh for each query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisCandidate {
    pub disease_id: String,
    pub disease_name: String,
    pub malignancy: Malignancy,
    pub finding_score: f64,
    pub matched_findings: Vec<String>,
    pub symptom_match: SymptomMatch,
    pub risk_factors: RiskFactorMatch,
    pub total_score: f64,
}

impl DiagnosisCandidate {
    fn new(disease_id: &str, disease_name: &str, malignancy: Malignancy) -> Self {
        Self {
            disease_id: disease_id.to_string(),
            disease_name: disease_name.to_string(),
            malignancy,
            finding_score: 0.0,
            matched_findings: Vec::new(),
            symptom_match: SymptomMatch {
                matched_symptoms: Vec::new(),
                symptom_score: 0.0,
            },
            risk_factors: RiskFactorMatch {
                matched_risk_factors: Vec::new(),
                risk_multiplier: 1.0,
            },
            total_score: 0.0,
        }
    }

    fn recompute_total(&mut self) {
        self.total_score = (self.finding_score + self.symptom_match.symptom_score)
            * self.risk_factors.risk_multiplier;
    }
}

/// Rank candidate diseases for the given evidence.
///
/// Only diseases showing at least one queried finding become candidates;
/// symptoms and risk factors adjust their score but never add a disease.
/// Ties keep discovery order.
pub fn score(
    graph: &GraphStore,
    findings: &FeatureSet,
    symptoms: &FeatureSet,
    risk_factors: &FeatureSet,
) -> Vec<DiagnosisCandidate> {
    let mut candidates = discover_candidates(graph, findings);

    for candidate in &mut candidates {
        enrich_symptoms(graph, candidate, symptoms);
        enrich_risk_factors(graph, candidate, risk_factors);
        candidate.recompute_total();
    }

    // Stable: equal scores stay in discovery order
    candidates.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(MAX_DIFFERENTIALS);

    tracing::debug!(
        findings = findings.len(),
        symptoms = symptoms.len(),
        risk_factors = risk_factors.len(),
        candidates = candidates.len(),
        "Differential scoring complete"
    );

    candidates
}

fn discover_candidates(graph: &GraphStore, findings: &FeatureSet) -> Vec<DiagnosisCandidate> {
    let diseases = graph.nodes_by_kind(NodeKind::Disease);
    let mut candidates: Vec<DiagnosisCandidate> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for finding_id in findings.iter() {
        let Some(finding_name) = graph.name_of(finding_id) else {
            continue;
        };

        for disease in &diseases {
            let Some(edge) = graph.edge_between(&disease.id, finding_id, Relation::ShowsFinding)
            else {
                continue;
            };
            let Some(malignancy) = disease.malignancy() else {
                continue;
            };
            let confidence = edge.attrs.confidence().unwrap_or_default();

            let i = *slot.entry(disease.id.as_str()).or_insert_with(|| {
                candidates.push(DiagnosisCandidate::new(&disease.id, &disease.name, malignancy));
                candidates.len() - 1
            });
            let candidate = &mut candidates[i];
            candidate.finding_score += confidence * FINDING_WEIGHT;
            candidate.matched_findings.push(finding_name.to_string());
        }
    }

    candidates
}

fn enrich_symptoms(graph: &GraphStore, candidate: &mut DiagnosisCandidate, symptoms: &FeatureSet) {
    for symptom_id in symptoms.iter() {
        let Some(edge) =
            graph.edge_between(&candidate.disease_id, symptom_id, Relation::HasSymptom)
        else {
            continue;
        };
        let Some(name) = graph.name_of(symptom_id) else {
            continue;
        };
        let confidence = edge.attrs.confidence().unwrap_or_default();
        candidate.symptom_match.symptom_score += confidence * SYMPTOM_WEIGHT;
        candidate.symptom_match.matched_symptoms.push(name.to_string());
    }
}

fn enrich_risk_factors(
    graph: &GraphStore,
    candidate: &mut DiagnosisCandidate,
    risk_factors: &FeatureSet,
) {
    for risk_id in risk_factors.iter() {
        let Some(edge) =
            graph.edge_between(risk_id, &candidate.disease_id, Relation::IncreasesRisk)
        else {
            continue;
        };
        let Some(name) = graph.name_of(risk_id) else {
            continue;
        };
        let relative_risk = edge.attrs.relative_risk().unwrap_or(1.0);
        candidate.risk_factors.risk_multiplier *= relative_risk;
        candidate.risk_factors.matched_risk_factors.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::breast_imaging_graph;
    use crate::graph::catalog::*;
    use crate::models::{Edge, Node, Suspicion};

    fn set(ids: &[&str]) -> FeatureSet {
        ids.iter().copied().collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn malignant_scenario_ranks_idc_first() {
        let g = breast_imaging_graph().unwrap();
        let ranked = score(
            &g,
            &set(&[MICROCALC, HIGH_DENSITY, MASS_IRREGULAR]),
            &set(&[PALPABLE_LUMP]),
            &set(&[FAMILY_HISTORY]),
        );

        let order: Vec<&str> = ranked.iter().map(|c| c.disease_id.as_str()).collect();
        assert_eq!(order, vec![IDC, ILC, DCIS]);

        let idc = &ranked[0];
        assert!(approx(idc.finding_score, 21.5));
        assert_eq!(
            idc.matched_findings,
            vec!["Microcalcifications", "High Density Mass", "Irregular Mass"]
        );
        assert!(approx(idc.symptom_match.symptom_score, 3.5));
        assert_eq!(idc.risk_factors.risk_multiplier, 2.0);
        assert_eq!(idc.risk_factors.matched_risk_factors, vec!["Family History"]);
        assert!(approx(idc.total_score, 50.0));

        assert!(approx(ranked[1].total_score, 10.25));
        assert!(approx(ranked[2].total_score, 9.0));
        assert_eq!(ranked[2].malignancy, Malignancy::PreMalignant);
    }

    #[test]
    fn benign_scenario_prefers_fibroadenoma() {
        let g = breast_imaging_graph().unwrap();
        let ranked = score(
            &g,
            &set(&[LOW_DENSITY, MASS_ROUND]),
            &set(&[PALPABLE_LUMP, BREAST_PAIN]),
            &set(&[FAMILY_HISTORY]),
        );

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].disease_id, FIBROADENOMA);
        assert_eq!(ranked[0].malignancy, Malignancy::Benign);
        assert_eq!(ranked[0].risk_factors.risk_multiplier, 1.0);
        assert!(ranked[0].risk_factors.matched_risk_factors.is_empty());
        assert!(approx(ranked[0].total_score, 18.5));
        assert_eq!(ranked[1].disease_id, CYST);
        assert!(approx(ranked[1].total_score, 18.0));
    }

    #[test]
    fn no_findings_means_no_candidates() {
        let g = breast_imaging_graph().unwrap();
        let ranked = score(
            &g,
            &FeatureSet::new(),
            &set(&[PALPABLE_LUMP, SKIN_CHANGES]),
            &set(&[BRCA_MUTATION]),
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn unknown_finding_ids_are_skipped() {
        let g = breast_imaging_graph().unwrap();
        let ranked = score(&g, &set(&["NOT_A_FINDING", MACROCALC]), &set(&[]), &set(&[]));
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].disease_id, CYST);
        assert!(approx(ranked[0].total_score, 4.0));
    }

    #[test]
    fn output_is_capped_and_sorted() {
        let g = breast_imaging_graph().unwrap();
        let ranked = score(
            &g,
            &set(&[MICROCALC, MACROCALC, HIGH_DENSITY, LOW_DENSITY, MASS_IRREGULAR, MASS_ROUND]),
            &set(&[]),
            &set(&[]),
        );
        assert_eq!(ranked.len(), MAX_DIFFERENTIALS);
        for pair in ranked.windows(2) {
            assert!(pair[0].total_score >= pair[1].total_score);
        }
    }

    #[test]
    fn ties_keep_discovery_order() {
        let g = GraphStore::from_parts(
            vec![
                Node::disease("B", "Second", Malignancy::Benign, 0.1, "2"),
                Node::disease("A", "First", Malignancy::Benign, 0.1, "2"),
                Node::finding("F", "Finding", Suspicion::Low, "2"),
            ],
            vec![
                Edge::shows_finding("A", "F", 0.5, 0.5),
                Edge::shows_finding("B", "F", 0.5, 0.5),
            ],
        )
        .unwrap();
        let ranked = score(&g, &set(&["F"]), &set(&[]), &set(&[]));
        // Diseases are visited in node insertion order
        let order: Vec<&str> = ranked.iter().map(|c| c.disease_id.as_str()).collect();
        assert_eq!(order, vec!["B", "A"]);
    }

    #[test]
    fn matched_symptom_strictly_increases_total() {
        let g = breast_imaging_graph().unwrap();
        let findings = set(&[MASS_IRREGULAR]);
        let risks = set(&[BRCA_MUTATION]);

        let without = score(&g, &findings, &set(&[]), &risks);
        let with = score(&g, &findings, &set(&[SKIN_CHANGES]), &risks);

        let idc_without = without.iter().find(|c| c.disease_id == IDC).unwrap();
        let idc_with = with.iter().find(|c| c.disease_id == IDC).unwrap();
        assert_eq!(
            idc_without.risk_factors.risk_multiplier,
            idc_with.risk_factors.risk_multiplier
        );
        assert!(idc_with.total_score > idc_without.total_score);
    }

    #[test]
    fn risk_factors_multiply() {
        let g = breast_imaging_graph().unwrap();
        let ranked = score(
            &g,
            &set(&[HIGH_DENSITY]),
            &set(&[]),
            &set(&[FAMILY_HISTORY, BRCA_MUTATION]),
        );
        assert_eq!(ranked.len(), 1);
        assert!(approx(ranked[0].risk_factors.risk_multiplier, 10.0));
        assert!(approx(ranked[0].total_score, 70.0));
    }
}

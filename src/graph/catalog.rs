//! Built-in breast imaging knowledge base.
//!
//! Node ids are exported as constants so the feature extractor's rule tables
//! and the graph can never drift apart silently.

use crate::models::{Edge, Malignancy, Node, Suspicion};

use super::{GraphError, GraphStore};

// Diseases
pub const IDC: &str = "IDC";
pub const DCIS: &str = "DCIS";
pub const ILC: &str = "ILC";
pub const FIBROADENOMA: &str = "FIBROADENOMA";
pub const CYST: &str = "CYST";

// Imaging findings
pub const MASS_IRREGULAR: &str = "MASS_IRREGULAR";
pub const MASS_ROUND: &str = "MASS_ROUND";
pub const MICROCALC: &str = "MICROCALC";
pub const MACROCALC: &str = "MACROCALC";
pub const ARCHITECTURAL_DISTORTION: &str = "ARCHITECTURAL_DISTORTION";
pub const HIGH_DENSITY: &str = "HIGH_DENSITY";
pub const LOW_DENSITY: &str = "LOW_DENSITY";

// Symptoms
pub const PALPABLE_LUMP: &str = "PALPABLE_LUMP";
pub const BREAST_PAIN: &str = "BREAST_PAIN";
pub const NIPPLE_DISCHARGE: &str = "NIPPLE_DISCHARGE";
pub const SKIN_CHANGES: &str = "SKIN_CHANGES";

// Risk factors
pub const FAMILY_HISTORY: &str = "FAMILY_HISTORY";
pub const BRCA_MUTATION: &str = "BRCA_MUTATION";
pub const AGE_OVER_50: &str = "AGE_OVER_50";
pub const HORMONE_THERAPY: &str = "HORMONE_THERAPY";
pub const YOUNGER_AGE: &str = "YOUNGER_AGE";

/// Nodes in insertion order: diseases, findings, symptoms, risk factors.
pub fn catalog_nodes() -> Vec<Node> {
    vec![
        Node::disease(IDC, "Invasive Ductal Carcinoma", Malignancy::Malignant, 0.80, "5"),
        Node::disease(DCIS, "Ductal Carcinoma In Situ", Malignancy::PreMalignant, 0.15, "4"),
        Node::disease(ILC, "Invasive Lobular Carcinoma", Malignancy::Malignant, 0.10, "5"),
        Node::disease(FIBROADENOMA, "Fibroadenoma", Malignancy::Benign, 0.25, "2"),
        Node::disease(CYST, "Simple Cyst", Malignancy::Benign, 0.30, "2"),
        Node::finding(MASS_IRREGULAR, "Irregular Mass", Suspicion::High, "4-5"),
        Node::finding(MASS_ROUND, "Round/Oval Mass", Suspicion::Low, "2-3"),
        Node::finding(MICROCALC, "Microcalcifications", Suspicion::MediumHigh, "4"),
        Node::finding(MACROCALC, "Macrocalcifications", Suspicion::Low, "2"),
        Node::finding(
            ARCHITECTURAL_DISTORTION,
            "Architectural Distortion",
            Suspicion::High,
            "4-5",
        ),
        Node::finding(HIGH_DENSITY, "High Density Mass", Suspicion::Medium, "3-4"),
        Node::finding(LOW_DENSITY, "Low Density Mass", Suspicion::Low, "2"),
        Node::symptom(PALPABLE_LUMP, "Palpable Lump"),
        Node::symptom(BREAST_PAIN, "Breast Pain"),
        Node::symptom(NIPPLE_DISCHARGE, "Nipple Discharge"),
        Node::symptom(SKIN_CHANGES, "Skin Changes/Dimpling"),
        Node::risk_factor(FAMILY_HISTORY, "Family History", 2.0),
        Node::risk_factor(BRCA_MUTATION, "BRCA Gene Mutation", 5.0),
        Node::risk_factor(AGE_OVER_50, "Age Over 50", 1.8),
        Node::risk_factor(HORMONE_THERAPY, "Hormone Therapy", 1.3),
        Node::risk_factor(YOUNGER_AGE, "Younger Age (<30)", 0.5),
    ]
}

/// Edges in insertion order: findings, symptoms, risk relationships.
pub fn catalog_edges() -> Vec<Edge> {
    vec![
        // IDC
        Edge::shows_finding(IDC, MASS_IRREGULAR, 0.85, 0.70),
        Edge::shows_finding(IDC, ARCHITECTURAL_DISTORTION, 0.65, 0.75),
        Edge::shows_finding(IDC, HIGH_DENSITY, 0.70, 0.60),
        Edge::shows_finding(IDC, MICROCALC, 0.60, 0.65),
        // DCIS
        Edge::shows_finding(DCIS, MICROCALC, 0.90, 0.80),
        // ILC
        Edge::shows_finding(ILC, ARCHITECTURAL_DISTORTION, 0.80, 0.70),
        Edge::shows_finding(ILC, MASS_IRREGULAR, 0.70, 0.65),
        // Fibroadenoma
        Edge::shows_finding(FIBROADENOMA, MASS_ROUND, 0.85, 0.75),
        Edge::shows_finding(FIBROADENOMA, LOW_DENSITY, 0.70, 0.60),
        // Cyst
        Edge::shows_finding(CYST, MASS_ROUND, 0.80, 0.70),
        Edge::shows_finding(CYST, LOW_DENSITY, 0.75, 0.65),
        Edge::shows_finding(CYST, MACROCALC, 0.40, 0.50),
        Edge::has_symptom(IDC, PALPABLE_LUMP, 0.70),
        Edge::has_symptom(IDC, SKIN_CHANGES, 0.40),
        Edge::has_symptom(ILC, PALPABLE_LUMP, 0.65),
        Edge::has_symptom(FIBROADENOMA, PALPABLE_LUMP, 0.60),
        Edge::has_symptom(CYST, BREAST_PAIN, 0.50),
        Edge::increases_risk(FAMILY_HISTORY, IDC, 2.0),
        Edge::increases_risk(BRCA_MUTATION, IDC, 5.0),
        Edge::increases_risk(AGE_OVER_50, IDC, 1.8),
        Edge::increases_risk(HORMONE_THERAPY, IDC, 1.3),
        Edge::increases_risk(YOUNGER_AGE, FIBROADENOMA, 2.0),
    ]
}

/// Build the default diagnostic graph from the catalog above.
pub fn breast_imaging_graph() -> Result<GraphStore, GraphError> {
    let graph = GraphStore::from_parts(catalog_nodes(), catalog_edges())?;
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Built-in knowledge graph ready"
    );
    Ok(graph)
}

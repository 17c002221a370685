use serde::{Deserialize, Serialize};

use super::enums::Relation;

/// A directed, attributed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub attrs: EdgeAttrs,
}

/// Per-relation attribute schema. The variant is the edge's relation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "relation")]
pub enum EdgeAttrs {
    #[serde(rename = "SHOWS_FINDING")]
    ShowsFinding { confidence: f64, specificity: f64 },
    #[serde(rename = "HAS_SYMPTOM")]
    HasSymptom { confidence: f64 },
    #[serde(rename = "INCREASES_RISK")]
    IncreasesRisk { relative_risk: f64 },
}

impl EdgeAttrs {
    pub fn relation(&self) -> Relation {
        match self {
            Self::ShowsFinding { .. } => Relation::ShowsFinding,
            Self::HasSymptom { .. } => Relation::HasSymptom,
            Self::IncreasesRisk { .. } => Relation::IncreasesRisk,
        }
    }

    /// Edge confidence; `None` for INCREASES_RISK.
    pub fn confidence(&self) -> Option<f64> {
        match *self {
            Self::ShowsFinding { confidence, .. } | Self::HasSymptom { confidence } => {
                Some(confidence)
            }
            Self::IncreasesRisk { .. } => None,
        }
    }

    pub fn relative_risk(&self) -> Option<f64> {
        match *self {
            Self::IncreasesRisk { relative_risk } => Some(relative_risk),
            _ => None,
        }
    }
}

impl Edge {
    pub fn shows_finding(disease: &str, finding: &str, confidence: f64, specificity: f64) -> Self {
        Self {
            from: disease.into(),
            to: finding.into(),
            attrs: EdgeAttrs::ShowsFinding {
                confidence,
                specificity,
            },
        }
    }

    pub fn has_symptom(disease: &str, symptom: &str, confidence: f64) -> Self {
        Self {
            from: disease.into(),
            to: symptom.into(),
            attrs: EdgeAttrs::HasSymptom { confidence },
        }
    }

    pub fn increases_risk(risk_factor: &str, disease: &str, relative_risk: f64) -> Self {
        Self {
            from: risk_factor.into(),
            to: disease.into(),
            attrs: EdgeAttrs::IncreasesRisk { relative_risk },
        }
    }

    pub fn relation(&self) -> Relation {
        self.attrs.relation()
    }
}

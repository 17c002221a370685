use serde::{Deserialize, Serialize};

use super::enums::{Malignancy, NodeKind, Suspicion};

/// A vertex of the diagnostic knowledge graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub attrs: NodeAttrs,
}

/// Per-kind attribute schema. The variant is the node's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NodeAttrs {
    Disease {
        malignancy: Malignancy,
        prevalence: f64,
        birads: String,
    },
    Finding {
        suspicion: Suspicion,
        birads: String,
    },
    Symptom,
    RiskFactor {
        risk_multiplier: f64,
    },
}

impl Node {
    pub fn disease(
        id: &str,
        name: &str,
        malignancy: Malignancy,
        prevalence: f64,
        birads: &str,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attrs: NodeAttrs::Disease {
                malignancy,
                prevalence,
                birads: birads.into(),
            },
        }
    }

    pub fn finding(id: &str, name: &str, suspicion: Suspicion, birads: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attrs: NodeAttrs::Finding {
                suspicion,
                birads: birads.into(),
            },
        }
    }

    pub fn symptom(id: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attrs: NodeAttrs::Symptom,
        }
    }

    pub fn risk_factor(id: &str, name: &str, risk_multiplier: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attrs: NodeAttrs::RiskFactor { risk_multiplier },
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.attrs {
            NodeAttrs::Disease { .. } => NodeKind::Disease,
            NodeAttrs::Finding { .. } => NodeKind::Finding,
            NodeAttrs::Symptom => NodeKind::Symptom,
            NodeAttrs::RiskFactor { .. } => NodeKind::RiskFactor,
        }
    }

    /// Malignancy class, for Disease nodes only.
    pub fn malignancy(&self) -> Option<Malignancy> {
        match self.attrs {
            NodeAttrs::Disease { malignancy, .. } => Some(malignancy),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_attribute_variant() {
        let d = Node::disease("IDC", "Invasive Ductal Carcinoma", Malignancy::Malignant, 0.8, "5");
        let f = Node::finding("MICROCALC", "Microcalcifications", Suspicion::MediumHigh, "4");
        let s = Node::symptom("PALPABLE_LUMP", "Palpable Lump");
        let r = Node::risk_factor("BRCA_MUTATION", "BRCA Gene Mutation", 5.0);

        assert_eq!(d.kind(), NodeKind::Disease);
        assert_eq!(f.kind(), NodeKind::Finding);
        assert_eq!(s.kind(), NodeKind::Symptom);
        assert_eq!(r.kind(), NodeKind::RiskFactor);
        assert_eq!(d.malignancy(), Some(Malignancy::Malignant));
        assert_eq!(f.malignancy(), None);
    }

    #[test]
    fn attrs_serialize_with_kind_tag() {
        let s = Node::symptom("BREAST_PAIN", "Breast Pain");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["attrs"]["kind"], "Symptom");

        let r = Node::risk_factor("FAMILY_HISTORY", "Family History", 2.0);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["attrs"]["kind"], "RiskFactor");
        assert_eq!(json["attrs"]["risk_multiplier"], 2.0);
    }
}

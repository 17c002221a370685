//! Maps raw imaging attributes and clinical free text to graph node ids.
//!
//! Each rule table is evaluated top to bottom and every matching rule fires
//! independently. Matching is case-insensitive; nothing here can fail.

use serde::{Deserialize, Serialize};

use crate::graph::catalog::{
    AGE_OVER_50, BRCA_MUTATION, BREAST_PAIN, FAMILY_HISTORY, HIGH_DENSITY, HORMONE_THERAPY,
    LOW_DENSITY, MACROCALC, MASS_IRREGULAR, MASS_ROUND, MICROCALC, NIPPLE_DISCHARGE,
    PALPABLE_LUMP, SKIN_CHANGES,
};

/// Imaging attributes as reported by the classifier stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagingFeatures {
    #[serde(default)]
    pub mass_size: String,
    #[serde(default)]
    pub density: String,
    #[serde(default)]
    pub calcifications: String,
}

impl ImagingFeatures {
    pub fn new(mass_size: &str, density: &str, calcifications: &str) -> Self {
        Self {
            mass_size: mass_size.into(),
            density: density.into(),
            calcifications: calcifications.into(),
        }
    }

    fn field(&self, field: ImagingField) -> &str {
        match field {
            ImagingField::MassSize => &self.mass_size,
            ImagingField::Density => &self.density,
            ImagingField::Calcifications => &self.calcifications,
        }
    }
}

/// Insertion-ordered set of node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet(Vec<String>);

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` unless already present. Returns whether it was added.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.0.push(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|s| s == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = FeatureSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// All node ids recognized in one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFeatures {
    pub findings: FeatureSet,
    pub symptoms: FeatureSet,
    pub risk_factors: FeatureSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImagingField {
    MassSize,
    Density,
    Calcifications,
}

/// Emits `emits` when `field` equals one of `values` (ignoring case).
struct ImagingRule {
    field: ImagingField,
    values: &'static [&'static str],
    emits: &'static str,
}

/// Emits `emits` when any keyword occurs in the lowercased text.
struct KeywordRule {
    keywords: &'static [&'static str],
    emits: &'static str,
}

const IMAGING_RULES: &[ImagingRule] = &[
    ImagingRule {
        field: ImagingField::Calcifications,
        values: &["micro"],
        emits: MICROCALC,
    },
    ImagingRule {
        field: ImagingField::Calcifications,
        values: &["macro"],
        emits: MACROCALC,
    },
    ImagingRule {
        field: ImagingField::Density,
        values: &["high"],
        emits: HIGH_DENSITY,
    },
    ImagingRule {
        field: ImagingField::Density,
        values: &["low"],
        emits: LOW_DENSITY,
    },
    ImagingRule {
        field: ImagingField::MassSize,
        values: &["large", "medium"],
        emits: MASS_IRREGULAR,
    },
    ImagingRule {
        field: ImagingField::MassSize,
        values: &["small"],
        emits: MASS_ROUND,
    },
];

const SYMPTOM_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["lump"],
        emits: PALPABLE_LUMP,
    },
    KeywordRule {
        keywords: &["pain"],
        emits: BREAST_PAIN,
    },
    KeywordRule {
        keywords: &["discharge"],
        emits: NIPPLE_DISCHARGE,
    },
    KeywordRule {
        keywords: &["skin", "dimpl"],
        emits: SKIN_CHANGES,
    },
];

// "screening"/"routine" standing in for age > 50 is a textual proxy, not an
// age field. Kept as-is; see DESIGN.md.
const RISK_FACTOR_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["family history", "family_history"],
        emits: FAMILY_HISTORY,
    },
    KeywordRule {
        keywords: &["brca"],
        emits: BRCA_MUTATION,
    },
    KeywordRule {
        keywords: &["hormone"],
        emits: HORMONE_THERAPY,
    },
    KeywordRule {
        keywords: &["screening", "routine"],
        emits: AGE_OVER_50,
    },
];

pub fn extract_findings(imaging: &ImagingFeatures) -> FeatureSet {
    IMAGING_RULES
        .iter()
        .filter(|rule| {
            let value = imaging.field(rule.field).to_lowercase();
            rule.values.contains(&value.as_str())
        })
        .map(|rule| rule.emits)
        .collect()
}

pub fn extract_symptoms(clinical_text: &str) -> FeatureSet {
    apply_keyword_rules(SYMPTOM_RULES, clinical_text)
}

pub fn extract_risk_factors(clinical_text: &str) -> FeatureSet {
    apply_keyword_rules(RISK_FACTOR_RULES, clinical_text)
}

pub fn extract_all(imaging: &ImagingFeatures, clinical_text: &str) -> ExtractedFeatures {
    ExtractedFeatures {
        findings: extract_findings(imaging),
        symptoms: extract_symptoms(clinical_text),
        risk_factors: extract_risk_factors(clinical_text),
    }
}

fn apply_keyword_rules(rules: &[KeywordRule], text: &str) -> FeatureSet {
    let lower = text.to_lowercase();
    rules
        .iter()
        .filter(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
        .map(|rule| rule.emits)
        .collect()
}

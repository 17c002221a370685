use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form is also the serde representation.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(NodeKind {
    Disease => "Disease",
    Finding => "Finding",
    Symptom => "Symptom",
    RiskFactor => "RiskFactor",
});

str_enum!(Relation {
    ShowsFinding => "SHOWS_FINDING",
    HasSymptom => "HAS_SYMPTOM",
    IncreasesRisk => "INCREASES_RISK",
});

str_enum!(Malignancy {
    Benign => "benign",
    PreMalignant => "pre-malignant",
    Malignant => "malignant",
});

str_enum!(Suspicion {
    Low => "low",
    Medium => "medium",
    MediumHigh => "medium-high",
    High => "high",
});

impl Relation {
    /// The only (source, target) node kinds this relation may connect.
    pub fn endpoints(&self) -> (NodeKind, NodeKind) {
        match self {
            Self::ShowsFinding => (NodeKind::Disease, NodeKind::Finding),
            Self::HasSymptom => (NodeKind::Disease, NodeKind::Symptom),
            Self::IncreasesRisk => (NodeKind::RiskFactor, NodeKind::Disease),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn malignancy_round_trip() {
        for (variant, s) in [
            (Malignancy::Benign, "benign"),
            (Malignancy::PreMalignant, "pre-malignant"),
            (Malignancy::Malignant, "malignant"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Malignancy::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn relation_round_trip() {
        for (variant, s) in [
            (Relation::ShowsFinding, "SHOWS_FINDING"),
            (Relation::HasSymptom, "HAS_SYMPTOM"),
            (Relation::IncreasesRisk, "INCREASES_RISK"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Relation::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&Malignancy::PreMalignant).unwrap();
        assert_eq!(json, "\"pre-malignant\"");
        let back: Suspicion = serde_json::from_str("\"medium-high\"").unwrap();
        assert_eq!(back, Suspicion::MediumHigh);
    }

    #[test]
    fn unknown_value_rejected() {
        let err = NodeKind::from_str("Organ").unwrap_err();
        assert_eq!(err.field, "NodeKind");
        assert_eq!(err.value, "Organ");
    }

    #[test]
    fn relation_endpoints_match_edge_table() {
        assert_eq!(
            Relation::ShowsFinding.endpoints(),
            (NodeKind::Disease, NodeKind::Finding)
        );
        assert_eq!(
            Relation::IncreasesRisk.endpoints(),
            (NodeKind::RiskFactor, NodeKind::Disease)
        );
    }
}

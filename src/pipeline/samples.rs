//! Canned requests covering the main diagnostic paths, for demos and smoke runs.

use super::extraction::ImagingFeatures;
use super::request::DiagnosisRequest;
use super::InputError;

struct Sample {
    name: &'static str,
    mass_size: &'static str,
    density: &'static str,
    calcifications: &'static str,
    clinical_text: &'static str,
}

const SAMPLES: &[Sample] = &[
    Sample {
        name: "malignant_idc",
        mass_size: "large",
        density: "high",
        calcifications: "micro",
        clinical_text: "Patient noticed a lump in the left breast. \
                        Family history of breast cancer. \
                        Palpable irregular mass on examination.",
    },
    Sample {
        name: "benign_fibroadenoma",
        mass_size: "small",
        density: "low",
        calcifications: "none",
        clinical_text: "Young patient (28 years old) with mobile, painless lump. \
                        No family history.",
    },
    Sample {
        name: "dcis",
        mass_size: "small",
        density: "medium",
        calcifications: "micro",
        clinical_text: "Routine screening mammogram. Asymptomatic. Patient is 58 years old.",
    },
    Sample {
        name: "cyst",
        mass_size: "medium",
        density: "low",
        calcifications: "macro",
        clinical_text: "Patient reports breast pain. Round, well-circumscribed mass on imaging.",
    },
    Sample {
        name: "high_risk",
        mass_size: "large",
        density: "high",
        calcifications: "micro",
        clinical_text: "Patient on hormone therapy for 10 years. \
                        Strong family history of breast cancer. \
                        Sister diagnosed with BRCA1 mutation. \
                        Noticed skin changes and palpable lump.",
    },
    Sample {
        name: "uncertain",
        mass_size: "medium",
        density: "medium",
        calcifications: "none",
        clinical_text: "Screening mammogram. \
                        Dense breast tissue makes assessment difficult. No symptoms.",
    },
];

pub fn sample_names() -> impl Iterator<Item = &'static str> {
    SAMPLES.iter().map(|s| s.name)
}

pub fn sample_request(name: &str) -> Result<DiagnosisRequest, InputError> {
    SAMPLES
        .iter()
        .find(|s| s.name == name)
        .map(|s| {
            DiagnosisRequest::new(
                ImagingFeatures::new(s.mass_size, s.density, s.calcifications),
                s.clinical_text,
            )
        })
        .ok_or_else(|| InputError::UnknownSample(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_sample_resolves() {
        let names: Vec<_> = sample_names().collect();
        assert_eq!(names.len(), 6);
        for name in names {
            assert!(sample_request(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn unknown_sample_is_an_input_error() {
        assert_eq!(
            sample_request("nope").unwrap_err(),
            InputError::UnknownSample("nope".into())
        );
    }

    #[test]
    fn line_continuations_keep_single_spaces() {
        let req = sample_request("malignant_idc").unwrap();
        assert!(req
            .clinical_text
            .contains("breast. Family history of breast cancer. Palpable"));
    }
}

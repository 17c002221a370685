pub mod context;
pub mod engine;
pub mod extraction;
pub mod request;
pub mod samples;
pub mod scoring;

pub use context::Context;
pub use engine::DifferentialEngine;
pub use extraction::{ExtractedFeatures, FeatureSet, ImagingFeatures};
pub use request::DiagnosisRequest;
pub use scoring::DiagnosisCandidate;

use thiserror::Error;

/// A request whose JSON shape cannot be turned into a query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} must be a JSON object, got {1}")]
    NotAnObject(&'static str, &'static str),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {field} must be a string, got {found}")]
    FieldType {
        field: &'static str,
        found: &'static str,
    },

    #[error("Unknown sample case: {0}")]
    UnknownSample(String),
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::extraction::ImagingFeatures;
use super::InputError;

/// One diagnosis request: imaging attributes plus free-text clinical notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisRequest {
    pub imaging_result: ImagingFeatures,
    pub clinical_text: String,
}

impl DiagnosisRequest {
    pub fn new(imaging_result: ImagingFeatures, clinical_text: &str) -> Self {
        Self {
            imaging_result,
            clinical_text: clinical_text.into(),
        }
    }

    /// Validate the shape of an untyped JSON request.
    ///
    /// Absent imaging fields read as empty strings; a field that is present
    /// but not a string is rejected rather than silently ignored.
    pub fn from_json(value: &Value) -> Result<Self, InputError> {
        let obj = value
            .as_object()
            .ok_or(InputError::NotAnObject("request", json_type(value)))?;

        let imaging = obj
            .get("imaging_result")
            .ok_or(InputError::MissingField("imaging_result"))?;
        let imaging = imaging
            .as_object()
            .ok_or(InputError::NotAnObject("imaging_result", json_type(imaging)))?;

        let field = |name: &'static str| -> Result<String, InputError> {
            match imaging.get(name) {
                None | Some(Value::Null) => Ok(String::new()),
                Some(Value::String(s)) => Ok(s.clone()),
                Some(other) => Err(InputError::FieldType {
                    field: name,
                    found: json_type(other),
                }),
            }
        };
        let imaging_result = ImagingFeatures {
            mass_size: field("mass_size")?,
            density: field("density")?,
            calcifications: field("calcifications")?,
        };

        let clinical_text = match obj.get("clinical_text") {
            None => return Err(InputError::MissingField("clinical_text")),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(InputError::FieldType {
                    field: "clinical_text",
                    found: json_type(other),
                })
            }
        };

        Ok(Self {
            imaging_result,
            clinical_text,
        })
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn well_formed_request_parses() {
        let req = DiagnosisRequest::from_json(&json!({
            "imaging_result": {"mass_size": "large", "density": "high", "calcifications": "micro"},
            "clinical_text": "Lump in left breast."
        }))
        .unwrap();
        assert_eq!(req.imaging_result, ImagingFeatures::new("large", "high", "micro"));
        assert_eq!(req.clinical_text, "Lump in left breast.");
    }

    #[test]
    fn absent_imaging_fields_default_to_empty() {
        let req = DiagnosisRequest::from_json(&json!({
            "imaging_result": {"density": "low", "calcifications": null},
            "clinical_text": ""
        }))
        .unwrap();
        assert_eq!(req.imaging_result, ImagingFeatures::new("", "low", ""));
    }

    #[test]
    fn non_string_clinical_text_rejected() {
        let err = DiagnosisRequest::from_json(&json!({
            "imaging_result": {},
            "clinical_text": 42
        }))
        .unwrap_err();
        assert_eq!(
            err,
            InputError::FieldType {
                field: "clinical_text",
                found: "number"
            }
        );
    }

    #[test]
    fn non_string_imaging_field_rejected() {
        let err = DiagnosisRequest::from_json(&json!({
            "imaging_result": {"mass_size": ["large"]},
            "clinical_text": "x"
        }))
        .unwrap_err();
        assert_eq!(
            err,
            InputError::FieldType {
                field: "mass_size",
                found: "array"
            }
        );
    }

    #[test]
    fn wrong_top_level_shapes_rejected() {
        assert_eq!(
            DiagnosisRequest::from_json(&json!("text")).unwrap_err(),
            InputError::NotAnObject("request", "string")
        );
        assert_eq!(
            DiagnosisRequest::from_json(&json!({"clinical_text": "x"})).unwrap_err(),
            InputError::MissingField("imaging_result")
        );
        assert_eq!(
            DiagnosisRequest::from_json(&json!({"imaging_result": "large", "clinical_text": "x"}))
                .unwrap_err(),
            InputError::NotAnObject("imaging_result", "string")
        );
        assert_eq!(
            DiagnosisRequest::from_json(&json!({"imaging_result": {}})).unwrap_err(),
            InputError::MissingField("clinical_text")
        );
    }
}

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::Assessment;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```json\s*|\s*```$").unwrap());

static JSON_OBJECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// Parse a model reply into an assessment.
///
/// Accepts bare JSON, JSON inside a ```json fence, or JSON embedded in
/// prose. Anything else becomes a "Parsing Error" assessment carrying the
/// raw reply. Missing fields get defaults.
pub fn parse_assessment(reply: &str) -> Assessment {
    let cleaned = JSON_FENCE.replace_all(reply.trim(), "");

    let parsed = serde_json::from_str::<Value>(&cleaned).ok().or_else(|| {
        JSON_OBJECT
            .find(&cleaned)
            .and_then(|m| serde_json::from_str::<Value>(m.as_str()).ok())
    });

    match parsed {
        Some(Value::Object(fields)) => from_fields(&fields),
        _ => {
            tracing::warn!(len = cleaned.len(), "LLM reply is not a JSON object");
            Assessment::new(
                "Unknown",
                0.0,
                &cleaned,
                "Parsing Error",
                "Manual review required",
            )
        }
    }
}

fn from_fields(fields: &Map<String, Value>) -> Assessment {
    Assessment {
        diagnosis: text_field(fields, "diagnosis", "Unknown"),
        confidence: confidence_field(fields),
        reasoning_text: text_field(fields, "reasoning_text", "No reasoning provided"),
        primary_concern: text_field(fields, "primary_concern", "None"),
        recommended_action: text_field(fields, "recommended_action", "Consult with radiologist"),
    }
}

fn text_field(fields: &Map<String, Value>, key: &str, default: &str) -> String {
    match fields.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn confidence_field(fields: &Map<String, Value>) -> f64 {
    let raw = match fields.get("confidence") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    raw.filter(|c| c.is_finite())
        .map(|c| c.clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

use crate::pipeline::{Context, ImagingFeatures};

pub const SYSTEM_PROMPT: &str = "You are a precise medical reasoning assistant specializing in breast cancer diagnosis. Always respond in valid JSON only. Use the Knowledge Graph evidence to support your reasoning.";

const INSTRUCTIONS: &str = r#"INSTRUCTIONS:
1. Integrate the Knowledge Graph analysis with the raw data
2. Consider the confidence scores and evidence from the KG
3. Reason step-by-step about the most likely diagnosis
4. Provide a final assessment with confidence level

Respond **only** in JSON format:
{
    "diagnosis": "Likely malignant / Likely benign / Uncertain / Requires further investigation",
    "confidence": <float between 0 and 1>,
    "reasoning_text": "<detailed step-by-step reasoning using KG evidence>",
    "primary_concern": "<specific disease name if malignant suspected, or 'None' if benign>",
    "recommended_action": "<Next steps: biopsy / follow-up imaging / routine screening>"
}"#;

/// Build the user prompt for one diagnostic reasoning call.
pub fn build_reasoning_prompt(
    imaging: &ImagingFeatures,
    clinical_text: &str,
    context: &Context,
) -> String {
    let imaging_json = serde_json::to_string_pretty(imaging).unwrap_or_default();

    let mut prompt = String::from(
        "You are an expert breast cancer diagnostic reasoning agent. \
         Analyze the following patient data and provide a diagnostic assessment.\n\n",
    );
    prompt.push_str(&context.render_for_prompt());
    prompt.push_str("\n\nRAW IMAGING DATA:\n");
    prompt.push_str(&imaging_json);
    prompt.push_str("\n\nCLINICAL NOTES:\n");
    prompt.push_str(clinical_text);
    prompt.push_str("\n\n");
    prompt.push_str(INSTRUCTIONS);
    prompt
}

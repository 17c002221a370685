pub mod cli;
pub mod config;
pub mod graph;
pub mod models;
pub mod pipeline;
pub mod reasoning;

use std::io::{Read, Write};

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::ReasoningConfig;
use graph::{breast_imaging_graph, GraphError, GraphSource, KnowledgeBase};
use pipeline::samples::{sample_names, sample_request};
use pipeline::{DiagnosisRequest, DifferentialEngine, InputError};
use reasoning::{
    DiagnosisService, LlmReasoner, OpenRouterClient, Reasoner, RuleBasedReasoner,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    Input(#[from] InputError),

    #[error("Knowledge graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Settings resolved from the process environment.
#[derive(Debug, Clone)]
pub struct Runtime {
    pub reasoning: ReasoningConfig,
    pub graph_source: GraphSource,
}

impl Runtime {
    pub fn from_env() -> Self {
        Self {
            reasoning: ReasoningConfig::from_env(),
            graph_source: config::graph_source_from_env(),
        }
    }
}

pub fn run() -> Result<(), AppError> {
    // Logs go to stderr; stdout carries the JSON report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let cli = Cli::parse();
    execute(
        &cli,
        &Runtime::from_env(),
        std::io::stdin().lock(),
        std::io::stdout().lock(),
    )
}

/// Carry out one CLI invocation against the given input and output streams.
pub fn execute<R: Read, W: Write>(
    cli: &Cli,
    runtime: &Runtime,
    mut input: R,
    mut out: W,
) -> Result<(), AppError> {
    if cli.list_samples {
        for name in sample_names() {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }

    if let Some(path) = &cli.save_graph {
        breast_imaging_graph()?.save_to_path(path)?;
        return Ok(());
    }

    let source = match &cli.graph {
        Some(path) => GraphSource::File(path.clone()),
        None => runtime.graph_source.clone(),
    };
    let knowledge = KnowledgeBase::new(source);
    let engine = DifferentialEngine::new(knowledge.graph()?);

    let request = read_request(cli, &mut input)?;

    if cli.kg_only {
        let report = DiagnosisService::new(engine, RuleBasedReasoner).kg_only(&request);
        serde_json::to_writer_pretty(&mut out, &report)?;
    } else {
        let service = DiagnosisService::new(engine, build_reasoner(&runtime.reasoning));
        let report = service.diagnose(&request);
        serde_json::to_writer_pretty(&mut out, &report)?;
    }
    writeln!(out)?;
    Ok(())
}

fn read_request<R: Read>(cli: &Cli, input: &mut R) -> Result<DiagnosisRequest, AppError> {
    if let Some(name) = &cli.sample {
        return Ok(sample_request(name)?);
    }

    let raw = match &cli.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            input.read_to_string(&mut buf)?;
            buf
        }
    };
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    Ok(DiagnosisRequest::from_json(&value)?)
}

fn build_reasoner(config: &ReasoningConfig) -> Box<dyn Reasoner> {
    if !config.has_api_key() {
        tracing::info!("No API key configured, using rule-based reasoning");
        return Box::new(RuleBasedReasoner);
    }
    match OpenRouterClient::new(config) {
        Ok(client) => {
            tracing::info!(model = %client.model(), "Using LLM reasoning");
            Box::new(LlmReasoner::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client unavailable, using rule-based reasoning");
            Box::new(RuleBasedReasoner)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use serde_json::Value;

    fn runtime() -> Runtime {
        Runtime {
            reasoning: ReasoningConfig::default(),
            graph_source: GraphSource::Builtin,
        }
    }

    fn run_cli(args: &[&str], stdin: &str) -> Result<String, AppError> {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        let mut out = Vec::new();
        execute(&cli, &runtime(), stdin.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    const REQUEST: &str = r#"{
        "imaging_result": {"mass_size": "large", "density": "high", "calcifications": "micro"},
        "clinical_text": "Patient noticed a lump. Family history of breast cancer."
    }"#;

    #[test]
    fn stdin_request_without_key_uses_rule_based_reasoning() {
        let out = run_cli(&["dxgraph"], REQUEST).unwrap();
        let report: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(report["diagnosis"], "Likely malignant");
        assert_eq!(report["primary_concern"], "Invasive Ductal Carcinoma");
        assert_eq!(report["confidence"], 0.95);
        assert_eq!(
            report["kg_context_used"]["differential_diagnoses"][0]["disease_id"],
            "IDC"
        );
        assert_eq!(
            report["input_used"]["clinical_text"],
            "Patient noticed a lump. Family history of breast cancer."
        );
    }

    #[test]
    fn kg_only_prints_context_and_fallback() {
        let out = run_cli(&["dxgraph", "--kg-only"], REQUEST).unwrap();
        let report: Value = serde_json::from_str(&out).unwrap();
        assert!(report.get("kg_context").is_some());
        assert_eq!(report["fallback_diagnosis"]["diagnosis"], "Likely malignant");
    }

    #[test]
    fn sample_case_ignores_stdin() {
        let args = ["dxgraph", "--kg-only", "--sample", "benign_fibroadenoma"];
        let out = run_cli(&args, "").unwrap();
        let report: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(report["fallback_diagnosis"]["diagnosis"], "Likely benign");
    }

    #[test]
    fn list_samples_prints_names() {
        let out = run_cli(&["dxgraph", "--list-samples"], "").unwrap();
        assert!(out.lines().any(|l| l == "malignant_idc"));
        assert_eq!(out.lines().count(), 6);
    }

    #[test]
    fn malformed_requests_are_reported() {
        assert!(matches!(run_cli(&["dxgraph"], "not json"), Err(AppError::Json(_))));
        assert!(matches!(
            run_cli(&["dxgraph"], r#"{"imaging_result": {}, "clinical_text": 3}"#),
            Err(AppError::Input(InputError::FieldType { .. }))
        ));
        assert!(matches!(
            run_cli(&["dxgraph", "--sample", "missing"], ""),
            Err(AppError::Input(InputError::UnknownSample(_)))
        ));
    }

    #[test]
    fn saved_graph_can_be_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("graph.bin");
        let path_str = path.to_str().unwrap();

        run_cli(&["dxgraph", "--save-graph", path_str], "").unwrap();
        assert!(path.exists());

        let out = run_cli(&["dxgraph", "--kg-only", "--graph", path_str], REQUEST).unwrap();
        let report: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            report["kg_context"]["differential_diagnoses"][0]["disease_id"],
            "IDC"
        );
    }

    #[test]
    fn missing_graph_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin");
        let result = run_cli(&["dxgraph", "--graph", path.to_str().unwrap()], REQUEST);
        assert!(matches!(result, Err(AppError::Graph(GraphError::Io { .. }))));
    }

    #[test]
    fn engine_shares_graph_handle() {
        let kb = KnowledgeBase::default();
        let engine = DifferentialEngine::new(kb.graph().unwrap());
        assert!(Arc::ptr_eq(engine.graph(), &kb.graph().unwrap()));
    }
}

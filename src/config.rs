use std::path::PathBuf;

use crate::graph::GraphSource;

/// Application-level constants
pub const APP_NAME: &str = "dxgraph";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_LLM_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
pub const ENV_LLM_URL: &str = "DXGRAPH_LLM_URL";
pub const ENV_LLM_MODEL: &str = "DXGRAPH_LLM_MODEL";
pub const ENV_LLM_TIMEOUT: &str = "DXGRAPH_LLM_TIMEOUT_SECS";
pub const ENV_GRAPH_PATH: &str = "DXGRAPH_GRAPH_PATH";

/// Log filter used when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "dxgraph=info,dxgraph_lib=info,warn"
}

/// Per-user data directory, e.g. ~/.local/share/dxgraph on Linux.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_NAME))
}

/// Where a saved knowledge graph is looked up by default.
pub fn default_graph_path() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join("graph.bin"))
}

/// Settings for the LLM reasoning call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasoningConfig {
    pub api_key: Option<String>,
    pub url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            url: DEFAULT_LLM_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

impl ReasoningConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout_secs = match get(ENV_LLM_TIMEOUT) {
            None => defaults.timeout_secs,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    tracing::warn!(
                        key = ENV_LLM_TIMEOUT,
                        value = %raw,
                        "Invalid timeout, using default"
                    );
                    defaults.timeout_secs
                }
            },
        };

        Self {
            api_key: get(ENV_API_KEY),
            url: get(ENV_LLM_URL).unwrap_or(defaults.url),
            model: get(ENV_LLM_MODEL).unwrap_or(defaults.model),
            timeout_secs,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Graph source from the environment: an explicit path must exist, the
/// default path is used only if present.
pub fn graph_source_from_lookup<F>(lookup: F) -> GraphSource
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(ENV_GRAPH_PATH).filter(|v| !v.trim().is_empty()) {
        Some(path) => GraphSource::File(PathBuf::from(path)),
        None => default_graph_path()
            .map(GraphSource::FileOrBuiltin)
            .unwrap_or(GraphSource::Builtin),
    }
}

pub fn graph_source_from_env() -> GraphSource {
    graph_source_from_lookup(|key| std::env::var(key).ok())
}

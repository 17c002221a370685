use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ReasoningError;
use crate::config::{ReasoningConfig, APP_NAME};

const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 800;
const REFERER: &str = "http://localhost";

/// Chat-completions client abstraction (allows mocking)
pub trait LlmClient {
    fn complete(&self, system: &str, prompt: &str) -> Result<String, ReasoningError>;
}

/// Blocking client for an OpenAI-compatible chat-completions endpoint.
pub struct OpenRouterClient {
    url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OpenRouterClient {
    pub fn new(config: &ReasoningConfig) -> Result<Self, ReasoningError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(ReasoningError::MissingApiKey)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ReasoningError::Connection(e.to_string()))?;

        Ok(Self {
            url: config.url.clone(),
            model: config.model.clone(),
            api_key,
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: String,
}

impl LlmClient for OpenRouterClient {
    fn complete(&self, system: &str, prompt: &str) -> Result<String, ReasoningError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", APP_NAME)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ReasoningError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    ReasoningError::Connection(self.url.clone())
                } else {
                    ReasoningError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ReasoningError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| ReasoningError::ResponseParsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| ReasoningError::ResponseParsing("no choices in response".into()))
    }
}

/// Mock LLM client for testing. Returns a configurable reply or error.
pub struct MockLlmClient {
    reply: Result<String, ReasoningError>,
    last_prompt: Mutex<Option<String>>,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            reply: Ok(response.to_string()),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing(error: ReasoningError) -> Self {
        Self {
            reply: Err(error),
            last_prompt: Mutex::new(None),
        }
    }

    /// The user prompt of the most recent call.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

impl LlmClient for MockLlmClient {
    fn complete(&self, _system: &str, prompt: &str) -> Result<String, ReasoningError> {
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        self.reply.clone()
    }
}

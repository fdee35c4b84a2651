//! OpenAI-compatible chat-completions backend.
//!
//! Text only. The feature-based detector sends a descriptor summary rather
//! than audio, so no multimodal support is needed; a request carrying blobs
//! is rejected up front.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::LlmError;
use crate::types::{GenerateRequest, Part};
use crate::Generator;

/// OpenAI backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name (e.g. "gpt-4o-mini").
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

/// OpenAI-compatible generator.
pub struct OpenAiGenerator {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiGenerator {
    /// Creates a new OpenAI generator.
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Converts a request into the chat-completions wire format.
    fn convert_request(&self, req: &GenerateRequest) -> Result<Value, LlmError> {
        if req.has_blobs() {
            return Err(LlmError::Unsupported(
                "openai backend accepts text parts only",
            ));
        }

        let user_text = req
            .parts
            .iter()
            .filter_map(Part::as_text)
            .collect::<Vec<_>>()
            .join("\n");

        let mut messages = Vec::new();
        if let Some(system) = &req.system {
            messages.push(json!({"role": "system", "content": system}));
        }
        messages.push(json!({"role": "user", "content": user_text}));

        Ok(json!({
            "model": self.config.model,
            "messages": messages,
        }))
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn generate(&self, req: &GenerateRequest) -> Result<String, LlmError> {
        let body = self.convert_request(req)?;

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: Value = response.json().await?;
        let content = reply["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default();

        if content.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(content.to_string())
    }
}

//! Google Gemini backend.
//!
//! Uses the non-streaming `generateContent` endpoint. Binary parts are sent
//! as `inline_data`, which is how audio reaches the model in one stateless
//! call (no file upload API involved).

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::LlmError;
use crate::types::{GenerateRequest, Part};
use crate::Generator;

/// Gemini backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Model name (e.g. "gemini-2.0-flash").
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
        }
    }
}

/// Gemini generator.
pub struct GeminiGenerator {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGenerator {
    /// Creates a new Gemini generator.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn api_url(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.config.model, self.config.api_key
        )
    }

    /// Converts a request into the Gemini wire format.
    fn convert_request(&self, req: &GenerateRequest) -> Value {
        let parts: Vec<Value> = req
            .parts
            .iter()
            .map(|part| match part {
                Part::Text(t) => json!({"text": t}),
                Part::Blob(b) => json!({
                    "inline_data": {
                        "mime_type": b.mime_type,
                        "data": base64::engine::general_purpose::STANDARD.encode(&b.data),
                    }
                }),
            })
            .collect();

        let mut body = json!({
            "contents": [{"role": "user", "parts": parts}],
        });
        if let Some(system) = &req.system {
            body["systemInstruction"] = json!({"parts": [{"text": system}]});
        }
        body
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, req: &GenerateRequest) -> Result<String, LlmError> {
        let body = self.convert_request(req);

        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
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

        // Concatenate the text parts of the first candidate.
        let mut text = String::new();
        if let Some(parts) = reply["candidates"][0]["content"]["parts"].as_array() {
            for part in parts {
                if let Some(t) = part["text"].as_str() {
                    text.push_str(t);
                }
            }
        }

        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}

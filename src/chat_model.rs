//! Chat model backend
//!
//! The agent talks to the language model through [`ChatModel`]; the only
//! production implementation speaks the OpenAI chat completions format.

use crate::config::AiConfig;
use crate::error::AiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Result type for AI operations
type Result<T> = std::result::Result<T, AiError>;

/// Message in a chat request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A handle on a language model
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Complete the conversation, cutting generation at any of `stop`
    async fn complete(&self, messages: &[Message], stop: &[&str]) -> Result<String>;
}

/// OpenAI-compatible chat completions client
pub struct OpenAiChat {
    config: AiConfig,
    client: reqwest::Client,
    api_key: String,
}

impl OpenAiChat {
    /// Create a client from configuration and an API key
    pub fn new(config: AiConfig, api_key: String) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| AiError::Unavailable(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            api_key,
        })
    }

    fn request_body(&self, messages: &[Message], stop: &[&str]) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": self.config.temperature,
        });
        if !stop.is_empty() {
            body["stop"] = serde_json::json!(stop);
        }
        if let Some(max_tokens) = self.config.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }
        body
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(&self, messages: &[Message], stop: &[&str]) -> Result<String> {
        let request_body = self.request_body(messages, stop);

        debug!(
            "Sending request to {} with {} messages",
            self.config.model,
            messages.len()
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::Parse(e.to_string()))?;

        // Extract content from response (OpenAI format)
        let content = response_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AiError::Parse("No content in response".to_string()))?;

        Ok(content.to_string())
    }
}

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Thin client for an OpenAI-compatible chat-completion endpoint. One
/// request per call, no retries, no streaming. The request timeout is left
/// at the transport default on purpose.
pub struct LLMClient {
    client: Client,
    api_base: String,
    api_key: String,
}

impl LLMClient {
    pub fn new(api_base: String, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .build()
            .with_context(|| format!("Failed to build HTTP client for {}", api_base))?;

        Ok(Self {
            client,
            api_base,
            api_key,
        })
    }

    /// Sends the message list and returns the first choice's message content
    /// unmodified.
    pub async fn chat_completion(&self, model: &str, messages: Vec<ChatMessage>) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));

        let request_body = json!({
            "model": model,
            "messages": messages,
            "stream": false,
        });

        tracing::debug!("Calling LLM API: {} with model: {}", url, model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!(
                "LLM API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        let v: serde_json::Value = response.json().await?;

        if let Some(s) = v
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c0| c0.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
        {
            return Ok(s.to_string());
        }

        if let Some(err_msg) = detect_provider_error(&v) {
            return Err(anyhow!(
                "LLM provider {} (model {}) returned error: {}",
                self.api_base,
                model,
                err_msg
            ));
        }

        Err(anyhow!("LLM response missing content field: {}", v))
    }
}

/// Some providers report failures inside a 200 body. Pull a readable message
/// out of the common `error` shapes.
fn detect_provider_error(value: &serde_json::Value) -> Option<String> {
    let error_val = value.get("error")?;
    if let Some(obj) = error_val.as_object() {
        let message = obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let code = obj
            .get("code")
            .or_else(|| obj.get("type"))
            .and_then(|c| c.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty());
        return Some(match (code, message) {
            (Some(code), Some(msg)) => format!("{}: {}", code, msg),
            (None, Some(msg)) => msg.to_string(),
            _ => error_val.to_string(),
        });
    }
    if let Some(text) = error_val.as_str() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    Some(error_val.to_string())
}

use crate::config::Config;
use crate::error::AppError;
use crate::llm::{ChatMessage, LLMClient};
use crate::prompt::{build_user_prompt, SYSTEM_PROMPT};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationRequest {
    pub url: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    pub id: String,
    pub model: String,
    /// The model's reply, carried byte-for-byte.
    pub answer: String,
    pub evaluated_at: DateTime<Utc>,
}

/// Performs the single outbound evaluation call. Holds no state beyond the
/// read-only configuration and the reused HTTP client; all scoring logic
/// lives in the remote model behind the fixed prompt.
pub struct Evaluator {
    config: Arc<Config>,
    client: LLMClient,
}

impl Evaluator {
    pub fn new(config: Arc<Config>, api_key: String) -> Result<Self> {
        let client = LLMClient::new(config.model.api_base.clone(), api_key)?;
        Ok(Self { config, client })
    }

    /// One chat-completion round trip: fixed system prompt plus a user
    /// message interpolating url and description verbatim. Not retried.
    pub async fn evaluate(&self, request: &EvaluationRequest) -> Result<String, AppError> {
        if request.url.is_empty() {
            return Err(AppError::InvalidRequest(
                "Please enter a target URL.".to_string(),
            ));
        }

        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: build_user_prompt(&request.url, &request.description),
            },
        ];

        self.client
            .chat_completion(&self.config.model.name, messages)
            .await
            .map_err(|e| AppError::LLMError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModelConfig, ServerConfig};
    use serde_json::json;

    fn build_test_config(api_base: &str) -> Arc<Config> {
        Arc::new(Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8612,
            },
            model: ModelConfig {
                name: "gpt-4.1".to_string(),
                api_base: api_base.to_string(),
                api_key: None,
            },
        })
    }

    #[tokio::test]
    async fn empty_url_never_reaches_the_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let evaluator =
            Evaluator::new(build_test_config(&server.url()), "sk-test".to_string()).unwrap();
        let err = evaluator
            .evaluate(&EvaluationRequest {
                url: String::new(),
                description: "product prices".to_string(),
            })
            .await
            .expect_err("expected validation failure");

        assert_eq!(err.error_code(), "invalid_request");
        assert!(err.to_string().contains("Please enter a target URL."));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sends_fixed_system_prompt_and_verbatim_inputs() {
        let mut server = mockito::Server::new_async().await;
        let expected_body = json!({
            "model": "gpt-4.1",
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {
                    "role": "user",
                    "content": build_user_prompt("https://shop.example.com", "product prices"),
                }
            ],
            "stream": false,
        });
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::Json(expected_body))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"Final: 3.10 — Hard"},"finish_reason":"stop"}]}"#,
            )
            .create_async()
            .await;

        let evaluator =
            Evaluator::new(build_test_config(&server.url()), "sk-test".to_string()).unwrap();
        let answer = evaluator
            .evaluate(&EvaluationRequest {
                url: "https://shop.example.com".to_string(),
                description: "product prices".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(answer, "Final: 3.10 — Hard");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_as_llm_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let evaluator =
            Evaluator::new(build_test_config(&server.url()), "sk-test".to_string()).unwrap();
        let err = evaluator
            .evaluate(&EvaluationRequest {
                url: "https://example.com".to_string(),
                description: String::new(),
            })
            .await
            .expect_err("expected upstream failure");

        assert_eq!(err.error_code(), "llm_error");
        let message = err.to_string();
        assert!(message.contains("500"), "{}", message);
        assert!(message.contains("upstream exploded"), "{}", message);
    }

    #[test]
    fn description_defaults_to_empty_when_omitted() {
        let request: EvaluationRequest =
            serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        assert_eq!(request.url, "https://example.com");
        assert_eq!(request.description, "");
    }
}

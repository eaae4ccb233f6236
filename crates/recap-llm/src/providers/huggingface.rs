// HuggingFace router client (OpenAI-compatible chat completions, HTTP direct, no SDK)

use crate::error::{LlmError, Result};
use crate::tokens::{estimate_text_tokens, estimate_tokens};
use crate::traits::{Completion, CompletionClient, CompletionRequest};
use crate::types::TokenUsage;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const HUGGINGFACE_API_BASE: &str = "https://router.huggingface.co/v1";

/// Model names are routed here when prefixed `huggingface/`; the prefix is
/// stripped before the request since the router expects bare model ids.
pub const HUGGINGFACE_MODEL_PREFIX: &str = "huggingface/";

/// Completion calls are bounded; exceeding this surfaces as an upstream error.
pub(crate) const COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

pub struct HuggingFaceClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HuggingFaceClient {
    /// Create new client with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| LlmError::Configuration("Invalid API key format".to_string()))?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(COMPLETION_TIMEOUT)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: HUGGINGFACE_API_BASE.to_string(),
        })
    }

    fn build_chat_request(&self, request: &CompletionRequest) -> Value {
        let model = request
            .model
            .strip_prefix(HUGGINGFACE_MODEL_PREFIX)
            .unwrap_or(&request.model);

        let messages: Vec<Value> = request
            .messages
            .iter()
            .map(|msg| {
                serde_json::json!({
                    "role": msg.role(),
                    "content": msg.content(),
                })
            })
            .collect();

        serde_json::json!({
            "model": model,
            "messages": messages,
            "stream": false,
        })
    }
}

#[async_trait]
impl CompletionClient for HuggingFaceClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        tracing::debug!(model = %request.model, "requesting chat completion");
        let payload = self.build_chat_request(&request);

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Upstream(format!(
                "HuggingFace returned {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("no choices in response".to_string()))?;

        // The router normally reports usage; fall back to estimation so
        // accounting never sees zeros for a non-empty exchange.
        let usage = match completion.usage {
            Some(usage) => TokenUsage::new(usage.prompt_tokens, usage.completion_tokens),
            None => TokenUsage::new(
                estimate_tokens(&request.messages),
                estimate_text_tokens(&text),
            ),
        };

        Ok(Completion { text, usage })
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PromptMessage;

    #[test]
    fn test_build_chat_request_strips_model_prefix() {
        let client = HuggingFaceClient::new("hf_test").unwrap();
        let request = CompletionRequest::new(
            "huggingface/meta-llama/Llama-3.1-8B-Instruct",
            vec![PromptMessage::user("hi")],
        );

        let payload = client.build_chat_request(&request);
        assert_eq!(payload["model"], "meta-llama/Llama-3.1-8B-Instruct");
        assert_eq!(payload["messages"][0]["role"], "user");
        assert_eq!(payload["messages"][0]["content"], "hi");
        assert_eq!(payload["stream"], false);
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{
            "choices": [{"message": {"role": "assistant", "content": "A summary."}}],
            "usage": {"prompt_tokens": 120, "completion_tokens": 18, "total_tokens": 138}
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("A summary."));
        assert_eq!(parsed.usage.as_ref().unwrap().prompt_tokens, 120);
        assert_eq!(parsed.usage.as_ref().unwrap().completion_tokens, 18);
    }
}

// AWS Bedrock client (Converse API via the official SDK)

use crate::error::{LlmError, Result};
use crate::traits::{Completion, CompletionClient, CompletionRequest};
use crate::types::{PromptMessage, TokenUsage};
use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_bedrockruntime::config::Credentials;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, Message as ConverseMessage, SystemContentBlock,
};

use super::huggingface::COMPLETION_TIMEOUT;

/// Model names are routed here when prefixed `bedrock/`; the prefix is
/// stripped before the call since Bedrock expects bare model ids.
pub const BEDROCK_MODEL_PREFIX: &str = "bedrock/";

pub struct BedrockClient {
    client: aws_sdk_bedrockruntime::Client,
}

impl BedrockClient {
    /// Create new client with static credentials
    pub async fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        let credentials = Credentials::new(
            access_key_id.into(),
            secret_access_key.into(),
            None,
            None,
            "recap-config",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.into()))
            .credentials_provider(credentials)
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(COMPLETION_TIMEOUT)
                    .build(),
            )
            .load()
            .await;

        Self {
            client: aws_sdk_bedrockruntime::Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl CompletionClient for BedrockClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        let model_id = request
            .model
            .strip_prefix(BEDROCK_MODEL_PREFIX)
            .unwrap_or(&request.model)
            .to_string();

        let mut system = Vec::new();
        let mut messages = Vec::new();
        for message in request.messages {
            match message {
                PromptMessage::System(content) => {
                    system.push(SystemContentBlock::Text(content));
                }
                PromptMessage::User(content) => {
                    let converse_message = ConverseMessage::builder()
                        .role(ConversationRole::User)
                        .content(ContentBlock::Text(content))
                        .build()
                        .map_err(|e| {
                            LlmError::InvalidResponse(format!("invalid converse message: {}", e))
                        })?;
                    messages.push(converse_message);
                }
            }
        }

        tracing::debug!(model = %model_id, "requesting converse completion");
        let output = self
            .client
            .converse()
            .model_id(&model_id)
            .set_system(Some(system))
            .set_messages(Some(messages))
            .send()
            .await
            .map_err(|e| LlmError::Upstream(format!("Bedrock converse failed: {}", e)))?;

        let text = output
            .output()
            .and_then(|o| o.as_message().ok())
            .and_then(|m| m.content().first())
            .and_then(|c| c.as_text().ok())
            .cloned()
            .ok_or_else(|| LlmError::InvalidResponse("empty converse output".to_string()))?;

        let usage = output
            .usage()
            .map(|u| {
                TokenUsage::new(u.input_tokens().max(0) as u32, u.output_tokens().max(0) as u32)
            })
            .unwrap_or_default();

        Ok(Completion { text, usage })
    }
}

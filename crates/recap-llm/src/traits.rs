use crate::error::Result;
use crate::types::{PromptMessage, TokenUsage};
use async_trait::async_trait;

/// Trait for non-streaming text completion against an LLM provider
///
/// Implementations own their credentials and HTTP plumbing; callers only see
/// ordered prompt messages in and generated text plus token counts out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion>;
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<PromptMessage>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<PromptMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
}

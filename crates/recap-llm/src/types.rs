use serde::{Deserialize, Serialize};

/// Prompt message types (high-level, provider-agnostic)
///
/// The summarization pipeline only ever produces system and user messages,
/// so the enum stays that narrow. Roles are carried by the variant, never as
/// free-form strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "lowercase")]
pub enum PromptMessage {
    /// System prompt (instructions)
    System(String),

    /// User message
    User(String),
}

impl PromptMessage {
    /// Create system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Create user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Get role as string
    pub fn role(&self) -> &str {
        match self {
            Self::System(_) => "system",
            Self::User(_) => "user",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::System(content) | Self::User(content) => content,
        }
    }
}

/// Token counts reported (or estimated) for one completion call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

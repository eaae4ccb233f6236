pub mod error;
pub mod factory;
pub mod providers;
pub mod tokens;
pub mod traits;
pub mod types;

pub use error::LlmError;
pub use factory::{client_for_model, ProviderCredentials};
pub use providers::{BedrockClient, HuggingFaceClient, BEDROCK_MODEL_PREFIX, HUGGINGFACE_MODEL_PREFIX};
pub use tokens::{estimate_text_tokens, estimate_tokens};
pub use traits::{Completion, CompletionClient, CompletionRequest};
pub use types::{PromptMessage, TokenUsage};

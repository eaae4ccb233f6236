pub mod bedrock;
pub mod huggingface;

pub use bedrock::{BedrockClient, BEDROCK_MODEL_PREFIX};
pub use huggingface::{HuggingFaceClient, HUGGINGFACE_MODEL_PREFIX};

use recap_llm::LlmError;
use recap_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummarizeError {
    /// No summarization model is configured on this deployment.
    #[error("AI features are not enabled on this server.")]
    FeatureDisabled,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

pub type Result<T> = std::result::Result<T, SummarizeError>;

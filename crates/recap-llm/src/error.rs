use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    /// The selected model has no matching credential set, or a required
    /// secret is absent. A deployment problem, not a user problem.
    #[error("Completion client misconfigured: {0}")]
    Configuration(String),

    /// The provider call failed or timed out.
    #[error("Completion provider error: {0}")]
    Upstream(String),

    /// The provider answered, but not with anything usable.
    #[error("Malformed completion response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Upstream(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LlmError>;

use crate::error::{LlmError, Result};
use crate::providers::{
    BedrockClient, HuggingFaceClient, BEDROCK_MODEL_PREFIX, HUGGINGFACE_MODEL_PREFIX,
};
use crate::traits::CompletionClient;
use std::sync::Arc;

/// Provider secrets, loaded once at startup and passed in explicitly.
///
/// Which of these must be present depends on the configured model's prefix;
/// `client_for_model` enforces that.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub huggingface_api_key: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_region: Option<String>,
}

impl ProviderCredentials {
    fn require<'a>(secret: &'a Option<String>, name: &str) -> Result<&'a str> {
        secret
            .as_deref()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| LlmError::Configuration(format!("{} is not set", name)))
    }
}

/// Centralized logic for selecting a provider client from a model name
///
/// Model names carry their provider as a prefix (`huggingface/...`,
/// `bedrock/...`); the matching credential set must be complete or the
/// whole feature is considered misconfigured.
pub async fn client_for_model(
    model: &str,
    credentials: &ProviderCredentials,
) -> Result<Arc<dyn CompletionClient>> {
    if model.starts_with(HUGGINGFACE_MODEL_PREFIX) {
        let api_key =
            ProviderCredentials::require(&credentials.huggingface_api_key, "HUGGINGFACE_API_KEY")?;
        return Ok(Arc::new(HuggingFaceClient::new(api_key)?));
    }

    if model.starts_with(BEDROCK_MODEL_PREFIX) {
        let access_key_id =
            ProviderCredentials::require(&credentials.aws_access_key_id, "AWS_ACCESS_KEY_ID")?;
        let secret_access_key = ProviderCredentials::require(
            &credentials.aws_secret_access_key,
            "AWS_SECRET_ACCESS_KEY",
        )?;
        let region = ProviderCredentials::require(&credentials.aws_region, "AWS_REGION_NAME")?;
        return Ok(Arc::new(
            BedrockClient::new(access_key_id, secret_access_key, region).await,
        ));
    }

    Err(LlmError::Configuration(format!(
        "no completion provider matches model '{}'",
        model
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn huggingface_credentials() -> ProviderCredentials {
        ProviderCredentials {
            huggingface_api_key: Some("hf_test".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_huggingface_prefix_routes_with_key() {
        let client = client_for_model(
            "huggingface/meta-llama/Llama-3.1-8B-Instruct",
            &huggingface_credentials(),
        )
        .await;
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_huggingface_prefix_without_key_is_configuration_error() {
        let result =
            client_for_model("huggingface/some-model", &ProviderCredentials::default()).await;
        assert!(matches!(result, Err(LlmError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_bedrock_prefix_requires_all_three_secrets() {
        let mut credentials = ProviderCredentials {
            aws_access_key_id: Some("AKIA_TEST".to_string()),
            aws_secret_access_key: Some("secret".to_string()),
            ..Default::default()
        };
        let result = client_for_model("bedrock/anthropic.claude-3-haiku", &credentials).await;
        assert!(matches!(result, Err(LlmError::Configuration(_))));

        credentials.aws_region = Some("us-east-1".to_string());
        let result = client_for_model("bedrock/anthropic.claude-3-haiku", &credentials).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_prefix_is_configuration_error() {
        let result = client_for_model("openai/gpt-4o", &huggingface_credentials()).await;
        assert!(matches!(result, Err(LlmError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_empty_secret_counts_as_absent() {
        let credentials = ProviderCredentials {
            huggingface_api_key: Some(String::new()),
            ..Default::default()
        };
        let result = client_for_model("huggingface/some-model", &credentials).await;
        assert!(matches!(result, Err(LlmError::Configuration(_))));
    }
}

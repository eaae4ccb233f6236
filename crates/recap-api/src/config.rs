use config::{Config as ConfigLoader, ConfigError, Environment, File};
use recap_core::CostRates;
use recap_llm::ProviderCredentials;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub mongodb: MongoDbConfig,
    pub summarization: SummarizationConfig,
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub mongodb_uri: String,
    #[serde(default)]
    pub huggingface_api_key: Option<String>,
    #[serde(default)]
    pub aws_access_key_id: Option<String>,
    #[serde(default)]
    pub aws_secret_access_key: Option<String>,
    #[serde(default)]
    pub aws_region_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoDbConfig {
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizationConfig {
    /// Provider-prefixed model name (`huggingface/...`, `bedrock/...`).
    /// Absent means AI features are disabled on this deployment.
    pub model: Option<String>,
    #[serde(default = "default_input_cost_per_token")]
    pub input_cost_per_token: i64,
    #[serde(default = "default_output_cost_per_token")]
    pub output_cost_per_token: i64,
}

fn default_input_cost_per_token() -> i64 {
    1
}

fn default_output_cost_per_token() -> i64 {
    5
}

impl From<&SummarizationConfig> for CostRates {
    fn from(config: &SummarizationConfig) -> Self {
        Self {
            input_cost_per_token: config.input_cost_per_token,
            output_cost_per_token: config.output_cost_per_token,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables (with SERVER_, MONGODB_, etc. prefixes)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::default()
                    .prefix("SERVER")
                    .separator("_")
                    .try_parsing(true),
            )
            .add_source(
                Environment::default()
                    .prefix("MONGODB")
                    .separator("_")
                    .try_parsing(true),
            )
            .add_source(
                Environment::default()
                    .prefix("SUMMARIZATION")
                    .separator("_")
                    .try_parsing(true),
            )
            .add_source(
                Environment::default()
                    .prefix("LOG")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let mut cfg: Config = config.try_deserialize()?;

        // Load secrets from ENV (not in TOML)
        cfg.mongodb_uri = std::env::var("MONGODB_URI").map_err(|_| {
            ConfigError::Message("MONGODB_URI environment variable is required".to_string())
        })?;
        cfg.huggingface_api_key = std::env::var("HUGGINGFACE_API_KEY").ok();
        cfg.aws_access_key_id = std::env::var("AWS_ACCESS_KEY_ID").ok();
        cfg.aws_secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY").ok();
        cfg.aws_region_name = std::env::var("AWS_REGION_NAME").ok();

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));
        let config = builder.build()?;
        config.try_deserialize()
    }

    pub fn provider_credentials(&self) -> ProviderCredentials {
        ProviderCredentials {
            huggingface_api_key: self.huggingface_api_key.clone(),
            aws_access_key_id: self.aws_access_key_id.clone(),
            aws_secret_access_key: self.aws_secret_access_key.clone(),
            aws_region: self.aws_region_name.clone(),
        }
    }
}

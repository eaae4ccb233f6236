use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recap_api::{build_router, config::Config, state::AppState};
use recap_core::{CompletionBackend, CostRates, Summarizer};
use recap_llm::client_for_model;
use recap_store::MongoStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config =
        Config::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting Recap API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Initialize store
    tracing::info!("Connecting to MongoDB");
    let store = Arc::new(MongoStore::connect(&config.mongodb_uri, &config.mongodb.database).await?);
    tracing::info!("MongoDB connected");

    // Initialize the summarization backend, if a model is configured.
    // Missing credentials for a configured model are a deployment error and
    // refuse startup; no model at all just disables the feature.
    let backend = match &config.summarization.model {
        Some(model) => {
            let client = client_for_model(model, &config.provider_credentials()).await?;
            tracing::info!("Summarization model: {}", model);
            Some(CompletionBackend {
                model: model.clone(),
                client,
            })
        }
        None => {
            tracing::warn!("No summarization model configured; AI features disabled");
            None
        }
    };

    let summarizer = Summarizer::new(
        store.clone(),
        store.clone(),
        backend,
        CostRates::from(&config.summarization),
    );

    // Create application state
    let state = Arc::new(AppState::new(
        config.clone(),
        store.clone(),
        store,
        summarizer,
    ));

    // Build router
    let app = build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("API docs: http://{}/api/docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}

use crate::config::Config;
use recap_core::Summarizer;
use recap_store::{MessageStore, UserDirectory};
use std::sync::Arc;

/// Shared application state passed to all handlers
///
/// All resources are wrapped in Arc for efficient sharing across async tasks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn MessageStore>,
    pub directory: Arc<dyn UserDirectory>,
    pub summarizer: Arc<Summarizer>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn MessageStore>,
        directory: Arc<dyn UserDirectory>,
        summarizer: Summarizer,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            directory,
            summarizer: Arc::new(summarizer),
        }
    }
}

use chrono::Utc;
use recap_llm::{CompletionClient, CompletionRequest, TokenUsage};
use recap_store::{Anchor, MessageStore, NarrowFilter, NarrowTerm, UsageLedger, UserRecord};
use std::sync::Arc;

use crate::error::{Result, SummarizeError};
use crate::prompt::assemble_prompt;
use crate::window::{ConversationWindow, MAX_MESSAGES_SUMMARIZED};

/// Stat name for the per-realm daily AI credit counter.
pub const AI_CREDIT_USAGE_PROPERTY: &str = "ai_credit_usage::day";

/// Credit cost per token, integer per-token rates.
#[derive(Debug, Clone, Copy)]
pub struct CostRates {
    pub input_cost_per_token: i64,
    pub output_cost_per_token: i64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            input_cost_per_token: 1,
            output_cost_per_token: 5,
        }
    }
}

impl CostRates {
    pub fn credits(&self, usage: &TokenUsage) -> i64 {
        i64::from(usage.output_tokens) * self.output_cost_per_token
            + i64::from(usage.input_tokens) * self.input_cost_per_token
    }
}

/// The configured summarization model and the client it routes to.
#[derive(Clone)]
pub struct CompletionBackend {
    pub model: String,
    pub client: Arc<dyn CompletionClient>,
}

/// How one summarization request resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Summary(String),
    /// The caller is not a realm administrator; recovered locally.
    AdminOnly,
    /// The filtered window held no messages; recovered locally.
    EmptyConversation,
}

/// Request-scoped summarization pipeline.
///
/// Each call runs the same linear sequence with no retries: parse the
/// narrow, fetch a window anchored at newest, materialize, assemble the
/// prompt, call the model, account credits.
pub struct Summarizer {
    store: Arc<dyn MessageStore>,
    ledger: Arc<dyn UsageLedger>,
    backend: Option<CompletionBackend>,
    cost_rates: CostRates,
}

impl Summarizer {
    pub fn new(
        store: Arc<dyn MessageStore>,
        ledger: Arc<dyn UsageLedger>,
        backend: Option<CompletionBackend>,
        cost_rates: CostRates,
    ) -> Self {
        Self {
            store,
            ledger,
            backend,
            cost_rates,
        }
    }

    pub async fn summarize(
        &self,
        viewer: &UserRecord,
        narrow: Option<&[NarrowTerm]>,
    ) -> Result<SummaryOutcome> {
        if !viewer.is_realm_admin {
            return Ok(SummaryOutcome::AdminOnly);
        }
        let backend = self.backend.as_ref().ok_or(SummarizeError::FeatureDisabled)?;

        let filter = NarrowFilter::parse(narrow.unwrap_or(&[]))?;
        let ids = self
            .store
            .fetch_window(viewer, &filter, Anchor::Newest, MAX_MESSAGES_SUMMARIZED, 0)
            .await?;
        if ids.is_empty() {
            return Ok(SummaryOutcome::EmptyConversation);
        }

        let refs = self.store.materialize(&ids).await?;
        let window = ConversationWindow::from_newest_first(refs);
        let conversation = window.into_chronological();
        let prompt = assemble_prompt(&conversation, &filter);

        tracing::debug!(
            model = %backend.model,
            conversation_length = conversation.len(),
            "requesting conversation summary"
        );

        let request = CompletionRequest::new(&backend.model, prompt);
        let completion = backend.client.complete(request).await.map_err(|e| {
            tracing::error!(model = %backend.model, error = %e, "completion call failed");
            e
        })?;

        let credits = self.cost_rates.credits(&completion.usage);
        let today = Utc::now().date_naive();
        if let Err(e) = self
            .ledger
            .increment(viewer.realm_id, AI_CREDIT_USAGE_PROPERTY, today, credits)
            .await
        {
            // Undercounting usage beats denying a summary we already have.
            tracing::error!(
                realm_id = viewer.realm_id,
                credits,
                error = %e,
                "failed to record AI credit usage"
            );
        }

        Ok(SummaryOutcome::Summary(completion.text))
    }
}

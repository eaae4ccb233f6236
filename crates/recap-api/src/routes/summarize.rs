use axum::{extract::State, http::HeaderMap, Json};
use recap_core::SummaryOutcome;
use recap_store::NarrowTerm;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{error::ApiResult, routes::resolve_viewer, state::AppState};

pub const ADMIN_ONLY_SUMMARY: &str = "Feature limited to admin users for now.";
pub const EMPTY_CONVERSATION_SUMMARY: &str = "No messages in conversation to summarize";

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NarrowTermParam {
    pub operator: String,
    pub operand: String,
    #[serde(default)]
    pub negated: bool,
}

impl From<NarrowTermParam> for NarrowTerm {
    fn from(param: NarrowTermParam) -> Self {
        Self {
            operator: param.operator,
            operand: param.operand,
            negated: param.negated,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub narrow: Option<Vec<NarrowTermParam>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// Summarize the most recent messages matching a narrow
#[utoipa::path(
    post,
    path = "/summarize",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Summary, or an informational placeholder", body = SummarizeResponse),
        (status = 400, description = "Invalid narrow, or AI features disabled"),
        (status = 401, description = "Unknown user")
    ),
    tag = "summarization"
)]
pub async fn summarize_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Option<Json<SummarizeRequest>>,
) -> ApiResult<Json<SummarizeResponse>> {
    let viewer = resolve_viewer(&state, &headers).await?;

    let request = body.map(|Json(request)| request).unwrap_or_default();
    let narrow: Option<Vec<NarrowTerm>> = request
        .narrow
        .map(|terms| terms.into_iter().map(NarrowTerm::from).collect());

    let outcome = state
        .summarizer
        .summarize(&viewer, narrow.as_deref())
        .await?;

    let summary = match outcome {
        SummaryOutcome::Summary(text) => text,
        SummaryOutcome::AdminOnly => ADMIN_ONLY_SUMMARY.to_string(),
        SummaryOutcome::EmptyConversation => EMPTY_CONVERSATION_SUMMARY.to_string(),
    };
    Ok(Json(SummarizeResponse { summary }))
}

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use recap_store::{Anchor, MessageRef, NarrowFilter, NarrowTerm};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    error::{ApiError, ApiResult},
    routes::resolve_viewer,
    state::AppState,
};

/// Upper bound on `num_before + num_after` for one fetch.
const MAX_MESSAGES_PER_FETCH: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct ListMessagesQuery {
    /// JSON-encoded array of narrow terms
    pub narrow: Option<String>,
    #[serde(default = "default_anchor")]
    pub anchor: String,
    #[serde(default)]
    pub num_before: usize,
    #[serde(default)]
    pub num_after: usize,
}

fn default_anchor() -> String {
    "newest".to_string()
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageView {
    pub id: i64,
    pub sender: String,
    pub content: String,
}

impl From<MessageRef> for MessageView {
    fn from(message: MessageRef) -> Self {
        Self {
            id: message.id,
            sender: message.sender,
            content: message.content,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListMessagesResponse {
    pub messages: Vec<MessageView>,
}

/// Fetch a window of messages around an anchor
#[utoipa::path(
    get,
    path = "/messages",
    params(
        ("narrow" = Option<String>, Query, description = "JSON-encoded array of narrow terms"),
        ("anchor" = Option<String>, Query, description = "\"newest\" or a message id"),
        ("num_before" = Option<usize>, Query, description = "Messages at or before the anchor"),
        ("num_after" = Option<usize>, Query, description = "Messages after the anchor")
    ),
    responses(
        (status = 200, description = "Messages in descending-id order", body = ListMessagesResponse),
        (status = 400, description = "Invalid narrow or anchor"),
        (status = 401, description = "Unknown user")
    ),
    tag = "messages"
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListMessagesQuery>,
) -> ApiResult<Json<ListMessagesResponse>> {
    let viewer = resolve_viewer(&state, &headers).await?;

    let terms: Vec<NarrowTerm> = match &query.narrow {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| ApiError::BadRequest(format!("malformed narrow: {}", e)))?,
        None => Vec::new(),
    };
    let filter = NarrowFilter::parse(&terms)?;

    let anchor = match query.anchor.as_str() {
        "newest" => Anchor::Newest,
        raw => raw
            .parse()
            .map(Anchor::Id)
            .map_err(|_| ApiError::BadRequest(format!("invalid anchor '{}'", raw)))?,
    };

    if query.num_before.saturating_add(query.num_after) > MAX_MESSAGES_PER_FETCH {
        return Err(ApiError::BadRequest(format!(
            "too many messages requested (max {})",
            MAX_MESSAGES_PER_FETCH
        )));
    }

    let ids = state
        .store
        .fetch_window(&viewer, &filter, anchor, query.num_before, query.num_after)
        .await?;
    let messages = state.store.materialize(&ids).await?;

    Ok(Json(ListMessagesResponse {
        messages: messages.into_iter().map(MessageView::from).collect(),
    }))
}

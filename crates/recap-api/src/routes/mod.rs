pub mod health;
pub mod messages;
pub mod summarize;

use crate::error::ApiError;
use crate::state::AppState;
use axum::http::HeaderMap;
use recap_store::UserRecord;

/// Resolve the requesting identity from the `X-User-Id` header.
///
/// Authentication proper lives in front of this service; the header is the
/// trusted identity it forwards.
pub(crate) async fn resolve_viewer(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<UserRecord, ApiError> {
    let raw = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest("missing X-User-Id header".to_string()))?;
    let user_id: i64 = raw
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid X-User-Id '{}'", raw)))?;
    state
        .directory
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::UnknownUser(raw.to_string()))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message as persisted in the store.
///
/// Sender display fields are denormalized onto the message so that
/// materialization never needs a join against the user collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    #[serde(rename = "_id")]
    pub id: i64,
    pub realm_id: i64,
    pub channel: String,
    pub topic: String,
    pub sender_id: i64,
    pub sender_email: String,
    pub sender_full_name: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

/// A user as persisted in the store; doubles as the requesting identity
/// once loaded, carrying everything read authorization needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub user_id: i64,
    pub realm_id: i64,
    pub email: String,
    pub full_name: String,
    pub is_realm_admin: bool,
    pub subscribed_channels: Vec<String>,
}

/// Minimal materialized view of one message, owned transiently by a single
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    pub id: i64,
    pub sender: String,
    pub content: String,
}

impl From<StoredMessage> for MessageRef {
    fn from(message: StoredMessage) -> Self {
        Self {
            id: message.id,
            sender: message.sender_full_name,
            content: message.content,
        }
    }
}

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Result;
use crate::models::{MessageRef, StoredMessage, UserRecord};
use crate::narrow::{Anchor, NarrowFilter};
use crate::traits::{MessageStore, UsageLedger, UserDirectory};

/// In-memory store with the same window and ledger semantics as the Mongo
/// implementation. Used by tests and local development without a database.
#[derive(Default)]
pub struct MemoryStore {
    messages: Mutex<Vec<StoredMessage>>,
    users: Mutex<HashMap<i64, UserRecord>>,
    usage: Mutex<HashMap<(i64, String, NaiveDate), i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_message(&self, message: StoredMessage) {
        self.messages.lock().unwrap().push(message);
    }

    pub fn add_user(&self, user: UserRecord) {
        self.users.lock().unwrap().insert(user.user_id, user);
    }

    pub fn usage_total(&self, realm_id: i64, property: &str, day: NaiveDate) -> i64 {
        self.usage
            .lock()
            .unwrap()
            .get(&(realm_id, property.to_string(), day))
            .copied()
            .unwrap_or(0)
    }

    fn matches(message: &StoredMessage, viewer: &UserRecord, filter: &NarrowFilter) -> bool {
        if message.realm_id != viewer.realm_id {
            return false;
        }
        if !viewer.subscribed_channels.contains(&message.channel) {
            return false;
        }
        if let Some(channel) = &filter.channel {
            if &message.channel != channel {
                return false;
            }
        }
        if let Some(topic) = &filter.topic {
            if &message.topic != topic {
                return false;
            }
        }
        if let Some(sender) = &filter.sender {
            if &message.sender_email != sender {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn fetch_window(
        &self,
        viewer: &UserRecord,
        filter: &NarrowFilter,
        anchor: Anchor,
        num_before: usize,
        num_after: usize,
    ) -> Result<Vec<i64>> {
        let messages = self.messages.lock().unwrap();
        let mut matching: Vec<i64> = messages
            .iter()
            .filter(|m| Self::matches(m, viewer, filter))
            .map(|m| m.id)
            .collect();
        drop(messages);
        matching.sort_unstable();

        let mut ids: Vec<i64> = Vec::new();
        if num_before > 0 {
            let before = matching.iter().rev().filter(|&&id| match anchor {
                Anchor::Newest => true,
                Anchor::Id(anchor_id) => id <= anchor_id,
            });
            ids.extend(before.take(num_before));
        }
        if num_after > 0 {
            if let Anchor::Id(anchor_id) = anchor {
                let after = matching.iter().filter(|&&id| id > anchor_id);
                ids.extend(after.take(num_after));
            }
        }

        ids.sort_unstable_by(|a, b| b.cmp(a));
        Ok(ids)
    }

    async fn materialize(&self, ids: &[i64]) -> Result<Vec<MessageRef>> {
        let messages = self.messages.lock().unwrap();
        let by_id: HashMap<i64, &StoredMessage> =
            messages.iter().map(|m| (m.id, m)).collect();
        Ok(ids
            .iter()
            .filter_map(|id| by_id.get(id))
            .map(|m| MessageRef::from((*m).clone()))
            .collect())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }
}

#[async_trait]
impl UsageLedger for MemoryStore {
    async fn increment(
        &self,
        realm_id: i64,
        property: &str,
        day: NaiveDate,
        delta: i64,
    ) -> Result<()> {
        let mut usage = self.usage.lock().unwrap();
        *usage
            .entry((realm_id, property.to_string(), day))
            .or_insert(0) += delta;
        Ok(())
    }
}

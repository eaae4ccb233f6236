use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::Result;
use crate::models::{MessageRef, StoredMessage, UserRecord};
use crate::narrow::{Anchor, NarrowFilter};

#[derive(Debug, Deserialize)]
struct MessageId {
    #[serde(rename = "_id")]
    id: i64,
}

#[derive(Clone)]
pub struct MongoMessageRepository {
    collection: Collection<StoredMessage>,
}

impl MongoMessageRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("messages");
        Self { collection }
    }

    /// Fetch an anchored window of message ids, descending, bounded.
    ///
    /// Read authorization is part of the query: only channels the viewer is
    /// subscribed to are searched, and a narrow that names an unsubscribed
    /// channel matches nothing.
    pub async fn fetch_window(
        &self,
        viewer: &UserRecord,
        filter: &NarrowFilter,
        anchor: Anchor,
        num_before: usize,
        num_after: usize,
    ) -> Result<Vec<i64>> {
        let mut query = doc! { "realm_id": viewer.realm_id };
        match &filter.channel {
            Some(channel) => {
                if !viewer.subscribed_channels.iter().any(|c| c == channel) {
                    return Ok(Vec::new());
                }
                query.insert("channel", channel.as_str());
            }
            None => {
                query.insert(
                    "channel",
                    doc! { "$in": viewer.subscribed_channels.clone() },
                );
            }
        }
        if let Some(topic) = &filter.topic {
            query.insert("topic", topic.as_str());
        }
        if let Some(sender) = &filter.sender {
            query.insert("sender_email", sender.as_str());
        }

        let id_collection = self.collection.clone_with_type::<MessageId>();
        let mut ids: Vec<i64> = Vec::new();

        if num_before > 0 {
            let mut before_query = query.clone();
            if let Anchor::Id(anchor_id) = anchor {
                before_query.insert("_id", doc! { "$lte": anchor_id });
            }
            let before: Vec<MessageId> = id_collection
                .find(before_query)
                .projection(doc! { "_id": 1 })
                .sort(doc! { "_id": -1 })
                .limit(num_before as i64)
                .await?
                .try_collect()
                .await?;
            ids.extend(before.into_iter().map(|m| m.id));
        }

        if num_after > 0 {
            if let Anchor::Id(anchor_id) = anchor {
                let mut after_query = query.clone();
                after_query.insert("_id", doc! { "$gt": anchor_id });
                let after: Vec<MessageId> = id_collection
                    .find(after_query)
                    .projection(doc! { "_id": 1 })
                    .sort(doc! { "_id": 1 })
                    .limit(num_after as i64)
                    .await?
                    .try_collect()
                    .await?;
                ids.extend(after.into_iter().map(|m| m.id));
            }
        }

        ids.sort_unstable_by(|a, b| b.cmp(a));
        Ok(ids)
    }

    /// Resolve ids into display-ready records, preserving input order and
    /// dropping ids that no longer resolve.
    pub async fn materialize(&self, ids: &[i64]) -> Result<Vec<MessageRef>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = doc! { "_id": { "$in": ids.to_vec() } };
        let messages: Vec<StoredMessage> =
            self.collection.find(query).await?.try_collect().await?;

        let mut by_id: HashMap<i64, MessageRef> = messages
            .into_iter()
            .map(|message| (message.id, MessageRef::from(message)))
            .collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}

use async_trait::async_trait;
use chrono::NaiveDate;
use mongodb::{bson::doc, Client};

use crate::error::Result;
use crate::models::{MessageRef, UserRecord};
use crate::narrow::{Anchor, NarrowFilter};
use crate::repositories::{MongoMessageRepository, MongoUsageRepository, MongoUserRepository};
use crate::traits::{MessageStore, UsageLedger, UserDirectory};

/// MongoDB-backed store, one repository per collection.
#[derive(Clone)]
pub struct MongoStore {
    messages: MongoMessageRepository,
    users: MongoUserRepository,
    usage: MongoUsageRepository,
}

impl MongoStore {
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        // Fail at startup on an unreachable deployment, not at first query.
        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await?;

        Ok(Self {
            messages: MongoMessageRepository::new(&client, db_name),
            users: MongoUserRepository::new(&client, db_name),
            usage: MongoUsageRepository::new(&client, db_name),
        })
    }
}

#[async_trait]
impl MessageStore for MongoStore {
    async fn fetch_window(
        &self,
        viewer: &UserRecord,
        filter: &NarrowFilter,
        anchor: Anchor,
        num_before: usize,
        num_after: usize,
    ) -> Result<Vec<i64>> {
        self.messages
            .fetch_window(viewer, filter, anchor, num_before, num_after)
            .await
    }

    async fn materialize(&self, ids: &[i64]) -> Result<Vec<MessageRef>> {
        self.messages.materialize(ids).await
    }
}

#[async_trait]
impl UserDirectory for MongoStore {
    async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>> {
        self.users.get_user(user_id).await
    }
}

#[async_trait]
impl UsageLedger for MongoStore {
    async fn increment(
        &self,
        realm_id: i64,
        property: &str,
        day: NaiveDate,
        delta: i64,
    ) -> Result<()> {
        self.usage.increment(realm_id, property, day, delta).await
    }
}

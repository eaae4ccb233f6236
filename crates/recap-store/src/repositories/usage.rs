use chrono::NaiveDate;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection};

use crate::error::Result;

#[derive(Clone)]
pub struct MongoUsageRepository {
    collection: Collection<Document>,
}

impl MongoUsageRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("usage_counters");
        Self { collection }
    }

    /// Add `delta` credits to the (realm, property, day) counter.
    ///
    /// A single upsert with `$inc`, so concurrent increments on the same key
    /// cannot lose updates; the document is created on first use of the day.
    pub async fn increment(
        &self,
        realm_id: i64,
        property: &str,
        day: NaiveDate,
        delta: i64,
    ) -> Result<()> {
        let query = doc! {
            "realm_id": realm_id,
            "property": property,
            "day": day.to_string(),
        };
        let update = doc! { "$inc": { "credits": delta } };
        self.collection
            .update_one(query, update)
            .upsert(true)
            .await?;
        Ok(())
    }
}

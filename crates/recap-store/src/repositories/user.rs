use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::models::UserRecord;

#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserRecord>,
}

impl MongoUserRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("users");
        Self { collection }
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>> {
        Ok(self.collection.find_one(doc! { "_id": user_id }).await?)
    }
}

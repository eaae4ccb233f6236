use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Malformed or unsupported narrow terms. A caller problem.
    #[error("Invalid narrow filter: {0}")]
    InvalidFilter(String),

    /// The backing store is unreachable or rejected the query. Fatal for
    /// the request; never retried here.
    #[error("Query error: {0}")]
    Query(#[from] mongodb::error::Error),

    #[error("BSON deserialization error: {0}")]
    BsonDeserialization(#[from] bson::de::Error),

    #[error("BSON serialization error: {0}")]
    BsonSerialization(#[from] bson::ser::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

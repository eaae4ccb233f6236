pub mod client;
pub mod error;
pub mod memory;
pub mod models;
pub mod narrow;
pub mod repositories;
pub mod traits;

pub use client::MongoStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use models::{MessageRef, StoredMessage, UserRecord};
pub use narrow::{Anchor, NarrowFilter, NarrowTerm};
pub use traits::{MessageStore, UsageLedger, UserDirectory};

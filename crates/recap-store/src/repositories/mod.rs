pub mod message;
pub mod usage;
pub mod user;

pub use message::MongoMessageRepository;
pub use usage::MongoUsageRepository;
pub use user::MongoUserRepository;

use crate::error::Result;
use crate::models::{MessageRef, UserRecord};
use crate::narrow::{Anchor, NarrowFilter};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for message window queries and materialization
///
/// `fetch_window` applies read authorization: a message id is only returned
/// when the requesting user is permitted to see it. `materialize` trusts
/// its input and performs no further filtering.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Fetch an ordered, bounded window of message ids around an anchor.
    ///
    /// Ids come back in descending order, truncated to `num_before`
    /// messages at or before the anchor plus `num_after` after it. No
    /// matches is an empty vec, not an error.
    async fn fetch_window(
        &self,
        viewer: &UserRecord,
        filter: &NarrowFilter,
        anchor: Anchor,
        num_before: usize,
        num_after: usize,
    ) -> Result<Vec<i64>>;

    /// Resolve ids into display-ready records, preserving input order.
    /// Ids that no longer resolve are dropped.
    async fn materialize(&self, ids: &[i64]) -> Result<Vec<MessageRef>>;
}

/// Trait for resolving a requesting identity
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>>;
}

/// Trait for the per-tenant, per-day usage counter
///
/// Implementations must make `increment` atomic with respect to concurrent
/// calls on the same (realm, property, day) key; at-least-once is
/// acceptable, lost updates are not.
#[async_trait]
pub trait UsageLedger: Send + Sync {
    async fn increment(
        &self,
        realm_id: i64,
        property: &str,
        day: NaiveDate,
        delta: i64,
    ) -> Result<()>;
}

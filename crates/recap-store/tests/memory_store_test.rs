use chrono::{NaiveDate, TimeZone, Utc};
use recap_store::{
    Anchor, MemoryStore, MessageStore, NarrowFilter, NarrowTerm, StoredMessage, UsageLedger,
    UserDirectory, UserRecord,
};
use std::sync::Arc;

fn test_user() -> UserRecord {
    UserRecord {
        user_id: 1,
        realm_id: 10,
        email: "ana@example.com".to_string(),
        full_name: "Ana Lima".to_string(),
        is_realm_admin: true,
        subscribed_channels: vec!["general".to_string(), "design".to_string()],
    }
}

fn message(id: i64, channel: &str, topic: &str) -> StoredMessage {
    StoredMessage {
        id,
        realm_id: 10,
        channel: channel.to_string(),
        topic: topic.to_string(),
        sender_id: 2,
        sender_email: "bruno@example.com".to_string(),
        sender_full_name: "Bruno Costa".to_string(),
        content: format!("message {}", id),
        sent_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
    }
}

fn seeded_store(count: i64) -> MemoryStore {
    let store = MemoryStore::new();
    store.add_user(test_user());
    for id in 1..=count {
        store.add_message(message(id, "general", "launch"));
    }
    store
}

#[tokio::test]
async fn test_newest_anchor_returns_descending_window() {
    let store = seeded_store(8);
    let filter = NarrowFilter::parse(&[NarrowTerm::new("channel", "general")]).unwrap();

    let ids = store
        .fetch_window(&test_user(), &filter, Anchor::Newest, 5, 0)
        .await
        .unwrap();
    assert_eq!(ids, vec![8, 7, 6, 5, 4]);
}

#[tokio::test]
async fn test_window_truncates_to_requested_count() {
    let store = seeded_store(105);
    let filter = NarrowFilter::parse(&[]).unwrap();

    let ids = store
        .fetch_window(&test_user(), &filter, Anchor::Newest, 100, 0)
        .await
        .unwrap();
    assert_eq!(ids.len(), 100);
    assert_eq!(ids[0], 105);
    assert_eq!(ids[99], 6);
}

#[tokio::test]
async fn test_empty_result_is_ok_not_error() {
    let store = seeded_store(3);
    let filter = NarrowFilter::parse(&[NarrowTerm::new("topic", "nonexistent")]).unwrap();

    let ids = store
        .fetch_window(&test_user(), &filter, Anchor::Newest, 100, 0)
        .await
        .unwrap();
    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_id_anchor_includes_anchor_and_splits_before_after() {
    let store = seeded_store(10);
    let filter = NarrowFilter::parse(&[]).unwrap();

    let ids = store
        .fetch_window(&test_user(), &filter, Anchor::Id(5), 3, 2)
        .await
        .unwrap();
    // 3 at-or-before the anchor, 2 after, descending overall.
    assert_eq!(ids, vec![7, 6, 5, 4, 3]);
}

#[tokio::test]
async fn test_unsubscribed_channel_is_invisible() {
    let store = seeded_store(3);
    store.add_message(message(50, "private-ops", "incident"));

    let ids = store
        .fetch_window(
            &test_user(),
            &NarrowFilter::parse(&[]).unwrap(),
            Anchor::Newest,
            100,
            0,
        )
        .await
        .unwrap();
    assert_eq!(ids, vec![3, 2, 1]);

    // Naming the unsubscribed channel outright matches nothing.
    let filter = NarrowFilter::parse(&[NarrowTerm::new("channel", "private-ops")]).unwrap();
    let ids = store
        .fetch_window(&test_user(), &filter, Anchor::Newest, 100, 0)
        .await
        .unwrap();
    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_other_realm_is_invisible() {
    let store = seeded_store(2);
    let mut foreign = message(99, "general", "launch");
    foreign.realm_id = 11;
    store.add_message(foreign);

    let ids = store
        .fetch_window(
            &test_user(),
            &NarrowFilter::parse(&[]).unwrap(),
            Anchor::Newest,
            100,
            0,
        )
        .await
        .unwrap();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn test_materialize_preserves_order_and_drops_unknown_ids() {
    let store = seeded_store(3);

    let refs = store.materialize(&[3, 42, 1]).await.unwrap();
    assert_eq!(refs.len(), 2);
    assert_eq!(refs[0].id, 3);
    assert_eq!(refs[1].id, 1);
    assert_eq!(refs[0].sender, "Bruno Costa");
    assert_eq!(refs[0].content, "message 3");
}

#[tokio::test]
async fn test_get_user() {
    let store = seeded_store(0);
    let user = store.get_user(1).await.unwrap().unwrap();
    assert_eq!(user.full_name, "Ana Lima");
    assert!(store.get_user(404).await.unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_increments_do_not_lose_updates() {
    let store = Arc::new(MemoryStore::new());
    let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

    let a = {
        let store = store.clone();
        tokio::spawn(async move {
            store
                .increment(10, "ai_credit_usage::day", day, 3)
                .await
                .unwrap();
        })
    };
    let b = {
        let store = store.clone();
        tokio::spawn(async move {
            store
                .increment(10, "ai_credit_usage::day", day, 5)
                .await
                .unwrap();
        })
    };
    a.await.unwrap();
    b.await.unwrap();

    assert_eq!(store.usage_total(10, "ai_credit_usage::day", day), 8);
}

#[tokio::test]
async fn test_increment_creates_counter_on_first_use() {
    let store = MemoryStore::new();
    let day = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
    assert_eq!(store.usage_total(10, "ai_credit_usage::day", day), 0);

    store
        .increment(10, "ai_credit_usage::day", day, 7)
        .await
        .unwrap();
    assert_eq!(store.usage_total(10, "ai_credit_usage::day", day), 7);

    // A different day gets its own counter.
    let next_day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    assert_eq!(store.usage_total(10, "ai_credit_usage::day", next_day), 0);
}

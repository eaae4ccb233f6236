use recap_store::MessageRef;

/// Maximum number of messages that can be summarized in a single request.
pub const MAX_MESSAGES_SUMMARIZED: usize = 100;

/// Bounded, ordered window of materialized messages for one request.
///
/// Holds at most `MAX_MESSAGES_SUMMARIZED` entries in the order the fetch
/// produced them (newest first when anchored at newest). The transcript
/// formatter wants chronological order, so consumption goes through
/// `into_chronological` rather than exposing the raw fetch order.
#[derive(Debug, Clone)]
pub struct ConversationWindow {
    messages: Vec<MessageRef>,
}

impl ConversationWindow {
    pub fn from_newest_first(mut messages: Vec<MessageRef>) -> Self {
        messages.truncate(MAX_MESSAGES_SUMMARIZED);
        Self { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The window in ascending-id (chronological) order.
    pub fn into_chronological(self) -> Vec<MessageRef> {
        let mut messages = self.messages;
        messages.reverse();
        messages
    }
}

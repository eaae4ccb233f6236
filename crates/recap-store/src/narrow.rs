use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};

/// One term of a narrow: an operator/operand pair selecting messages,
/// conjunctive with the other terms in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrowTerm {
    pub operator: String,
    pub operand: String,
    #[serde(default)]
    pub negated: bool,
}

impl NarrowTerm {
    pub fn new(operator: impl Into<String>, operand: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            operand: operand.into(),
            negated: false,
        }
    }
}

/// Reference point for a window fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// After the newest existing message; `num_after` finds nothing here.
    Newest,
    Id(i64),
}

/// Normalized conjunction of narrow terms, ready for the store to evaluate.
///
/// Only un-negated `channel`/`topic`/`sender` terms are supported; anything
/// else is rejected at parse time rather than silently ignored. When the same
/// operator appears twice, the last term wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NarrowFilter {
    pub channel: Option<String>,
    pub topic: Option<String>,
    pub sender: Option<String>,
    term_count: usize,
}

impl NarrowFilter {
    pub fn parse(terms: &[NarrowTerm]) -> Result<Self> {
        let mut filter = NarrowFilter::default();
        for term in terms {
            if term.negated {
                return Err(StoreError::InvalidFilter(
                    "negated narrow terms are not supported".to_string(),
                ));
            }
            match term.operator.as_str() {
                "channel" => filter.channel = Some(term.operand.clone()),
                "topic" => filter.topic = Some(term.operand.clone()),
                "sender" => filter.sender = Some(term.operand.clone()),
                other => {
                    return Err(StoreError::InvalidFilter(format!(
                        "unsupported narrow operator '{}'",
                        other
                    )));
                }
            }
        }
        filter.term_count = terms.len();
        Ok(filter)
    }

    /// Channel and topic display labels, only for the exact narrow shape the
    /// prompt intro special-cases: two terms, one channel and one topic.
    pub fn channel_topic_labels(&self) -> Option<(&str, &str)> {
        if self.term_count != 2 {
            return None;
        }
        match (self.channel.as_deref(), self.topic.as_deref()) {
            (Some(channel), Some(topic)) => Some((channel, topic)),
            _ => None,
        }
    }
}

use recap_llm::PromptMessage;
use recap_store::{MessageRef, NarrowFilter};
use serde_json::{json, Value};

/// Fixed first line of the system prompt; channel/topic labels are appended
/// when the narrow has the two-term channel+topic shape.
pub const SUMMARY_PREAMBLE: &str = "The following is a chat conversation in a team chat app.";

/// Summary budget in sentences for a conversation of the given length.
///
/// Monotonic step function capped at 6: one extra sentence per ten messages
/// past the first ten, with short conversations dipping to 3. Floor division
/// (toward negative infinity), so lengths below 10 land on 3, not 4.
pub fn max_summary_length(conversation_length: usize) -> i64 {
    i64::min(6, 4 + (conversation_length as i64 - 10).div_euclid(10))
}

/// Serialize the conversation as the model-facing transcript: a JSON array
/// of sender/content objects, chronological order.
///
/// Timestamps and reactions are deliberately absent; including them was
/// found not to help (timestamps) or to hurt (reactions) summary quality.
pub fn format_transcript(messages: &[MessageRef]) -> String {
    let entries: Vec<Value> = messages
        .iter()
        .map(|message| {
            json!({
                "sender": message.sender,
                "content": message.content,
            })
        })
        .collect();
    Value::Array(entries).to_string()
}

fn build_intro(filter: &NarrowFilter) -> String {
    let mut intro = SUMMARY_PREAMBLE.to_string();
    if let Some((channel, topic)) = filter.channel_topic_labels() {
        intro.push_str(&format!(" channel: {}", channel));
        intro.push_str(&format!(", topic: {}", topic));
    }
    intro
}

fn build_instruction(max_summary_length: i64) -> String {
    format!(
        "Succinctly summarize this conversation based only on the information provided, \
         in up to {} sentences, for someone who is familiar with the context. \
         Mention key conclusions and actions, if any. Refer to specific people as appropriate. \
         Don't use an intro phrase.",
        max_summary_length
    )
}

/// Build the ordered prompt for one summarization call: system intro, then
/// the transcript, then the instruction. Order matters to the model.
pub fn assemble_prompt(messages: &[MessageRef], filter: &NarrowFilter) -> Vec<PromptMessage> {
    vec![
        PromptMessage::system(build_intro(filter)),
        PromptMessage::user(format_transcript(messages)),
        PromptMessage::user(build_instruction(max_summary_length(messages.len()))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use recap_store::NarrowTerm;

    fn message_ref(id: i64, sender: &str, content: &str) -> MessageRef {
        MessageRef {
            id,
            sender: sender.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_max_summary_length_step_function() {
        assert_eq!(max_summary_length(0), 3);
        assert_eq!(max_summary_length(1), 3);
        assert_eq!(max_summary_length(10), 4);
        assert_eq!(max_summary_length(11), 4);
        assert_eq!(max_summary_length(20), 5);
        assert_eq!(max_summary_length(100), 6);
    }

    #[test]
    fn test_intro_with_channel_and_topic() {
        let filter = NarrowFilter::parse(&[
            NarrowTerm::new("channel", "general"),
            NarrowTerm::new("topic", "launch"),
        ])
        .unwrap();
        let intro = build_intro(&filter);
        assert_eq!(
            intro,
            format!("{} channel: general, topic: launch", SUMMARY_PREAMBLE)
        );

        let channel_pos = intro.find(" channel: general").unwrap();
        let topic_pos = intro.find(", topic: launch").unwrap();
        assert!(channel_pos < topic_pos);
    }

    #[test]
    fn test_intro_unchanged_for_other_narrow_shapes() {
        for terms in [
            vec![],
            vec![NarrowTerm::new("channel", "general")],
            vec![
                NarrowTerm::new("channel", "general"),
                NarrowTerm::new("sender", "ana@example.com"),
            ],
            vec![
                NarrowTerm::new("channel", "general"),
                NarrowTerm::new("topic", "launch"),
                NarrowTerm::new("sender", "ana@example.com"),
            ],
        ] {
            let filter = NarrowFilter::parse(&terms).unwrap();
            assert_eq!(build_intro(&filter), SUMMARY_PREAMBLE);
        }
    }

    #[test]
    fn test_transcript_is_json_array_of_sender_content() {
        let messages = vec![
            message_ref(1, "Ana Lima", "shipping friday?"),
            message_ref(2, "Bruno Costa", "yes, pending QA"),
        ];
        let transcript = format_transcript(&messages);
        let parsed: Vec<Value> = serde_json::from_str(&transcript).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["sender"], "Ana Lima");
        assert_eq!(parsed[0]["content"], "shipping friday?");
        assert_eq!(parsed[1]["sender"], "Bruno Costa");
    }

    #[test]
    fn test_assemble_prompt_order_and_roles() {
        let messages = vec![message_ref(1, "Ana Lima", "hello")];
        let filter = NarrowFilter::parse(&[]).unwrap();
        let prompt = assemble_prompt(&messages, &filter);

        assert_eq!(prompt.len(), 3);
        assert_eq!(prompt[0].role(), "system");
        assert_eq!(prompt[1].role(), "user");
        assert_eq!(prompt[2].role(), "user");
        assert_eq!(prompt[0].content(), SUMMARY_PREAMBLE);
        assert!(prompt[1].content().contains("Ana Lima"));
        assert!(prompt[2].content().contains("in up to 3 sentences"));
    }
}

pub mod error;
pub mod prompt;
pub mod summarizer;
pub mod window;

pub use error::SummarizeError;
pub use prompt::{assemble_prompt, format_transcript, max_summary_length, SUMMARY_PREAMBLE};
pub use summarizer::{
    CompletionBackend, CostRates, SummaryOutcome, Summarizer, AI_CREDIT_USAGE_PROPERTY,
};
pub use window::{ConversationWindow, MAX_MESSAGES_SUMMARIZED};

//! ============================================================================
//! Memory Types - Data structures for stored question/answer memories
//! ============================================================================
//! Defines the domain representation of a memory and the normalized response
//! shape guaranteed to API callers. Also hosts the legacy combined-text
//! parser used for records written before the payload schema was pre-split.
//! ============================================================================

use serde::{Deserialize, Serialize};

/// A question/answer memory as understood by this service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    /// Store-assigned point identifier, stringified
    pub id: String,
    /// Owning user identifier
    pub user_id: String,
    /// The application question
    pub question: String,
    /// The recorded answer
    pub answer: String,
    /// Company the question was answered for
    pub company: String,
    /// Free-text date the answer was recorded
    pub date: String,
}

/// Normalized response shape for a memory.
///
/// Every field is always present and always a string. Missing source data
/// degrades to an empty string, never to null or an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryResponse {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub company: String,
    pub date: String,
}

impl From<Memory> for MemoryResponse {
    fn from(memory: Memory) -> Self {
        Self {
            id: memory.id,
            question: memory.question,
            answer: memory.answer,
            company: memory.company,
            date: memory.date,
        }
    }
}

/// Split a legacy combined-text record into question and answer.
///
/// The legacy ingestion pipeline wrote a single text blob formatted as
/// `"Question: <q>\nAnswer: <a>"`. Everything before the first newline is
/// the question, everything after is the answer; the literal prefixes are
/// stripped when present. A blob with no newline has no answer.
pub fn split_combined_content(content: &str) -> (String, String) {
    let (first, rest) = match content.split_once('\n') {
        Some((first, rest)) => (first, Some(rest)),
        None => (content, None),
    };

    let question = first.strip_prefix("Question: ").unwrap_or(first).to_string();
    let answer = rest
        .map(|r| r.strip_prefix("Answer: ").unwrap_or(r).to_string())
        .unwrap_or_default();

    (question, answer)
}

//! Conversation message types.

use serde::{Deserialize, Serialize};

/// Represents the sender of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    /// Message from the user.
    User,
    /// Message from the assistant.
    Assistant,
}

/// Presentation classification for assistant messages.
///
/// Selects the affordance the host UI renders the message with. Only set on
/// assistant messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageTag {
    Info,
    Warning,
    Success,
}

/// A single message in a conversation history.
///
/// Messages are immutable after creation and are never removed
/// individually; only a full session reset clears the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique identifier, monotonically increasing by creation order.
    pub id: u64,
    /// The content of the message.
    pub content: String,
    /// Who sent the message.
    pub sender: MessageSender,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
    /// Presentation classification, assistant messages only.
    pub tag: Option<MessageTag>,
}

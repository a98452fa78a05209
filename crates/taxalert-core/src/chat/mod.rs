//! Conversational assistant domain: messages, session state machine,
//! content classification, and reply composition.

mod classifier;
mod message;
mod reply;
mod session;

pub use classifier::{is_greeting, is_technical, TECHNICAL_KEYWORDS};
pub use message::{ChatMessage, MessageSender, MessageTag};
pub use reply::{AssistantReply, ChatAnswer, FALLBACK_MESSAGE};
pub use session::{ChatSession, OutboundQuestion, QUICK_QUESTIONS, WELCOME_MESSAGE};

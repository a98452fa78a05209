//! Drives the conversational assistant: one asynchronous turn at a time
//! against the answer service, with local recovery to the scripted fallback.

use std::sync::Arc;
use taxalert_core::chat::{AssistantReply, ChatMessage, ChatSession};
use taxalert_core::service::AnswerService;

/// Coordinates a [`ChatSession`] with the answer transport.
///
/// The session lock is never held across the network await: `begin_send`
/// captures the outbound question and its generation, the request runs
/// unlocked, and the settled reply is applied afterwards (or discarded when
/// a reset happened in between).
pub struct ChatService {
    session: tokio::sync::Mutex<ChatSession>,
    transport: Arc<dyn AnswerService>,
}

impl ChatService {
    pub fn new(transport: Arc<dyn AnswerService>) -> Self {
        Self {
            session: tokio::sync::Mutex::new(ChatSession::new()),
            transport,
        }
    }

    /// Snapshot of the message history, oldest first.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.session.lock().await.messages().to_vec()
    }

    /// The pending input buffer.
    pub async fn input(&self) -> String {
        self.session.lock().await.input().to_string()
    }

    /// True while a turn is in flight.
    pub async fn is_awaiting_response(&self) -> bool {
        self.session.lock().await.is_awaiting_response()
    }

    /// Replaces the input buffer.
    pub async fn set_input(&self, text: impl Into<String>) {
        self.session.lock().await.set_input(text);
    }

    /// Applies a quick-question shortcut; populates the buffer only.
    pub async fn apply_quick_question(&self, question: &str) {
        self.session.lock().await.apply_quick_question(question);
    }

    /// Sends the pending input as one conversational turn.
    ///
    /// Returns the assistant message that was appended, or `None` when the
    /// send was a no-op (empty input, a turn already in flight) or the
    /// reply arrived stale after a reset. A transport failure is folded
    /// into the scripted fallback reply; the user never sees the error.
    pub async fn send_pending(&self) -> Option<ChatMessage> {
        let outbound = self.session.lock().await.begin_send()?;

        let reply = match self.transport.ask(&outbound.text).await {
            Ok(answer) => AssistantReply::from_answer(&answer),
            Err(e) => {
                tracing::warn!("Answer service unavailable: {}", e);
                AssistantReply::fallback()
            }
        };

        let mut session = self.session.lock().await;
        if session.apply_reply(outbound.generation, reply) {
            session.messages().last().cloned()
        } else {
            None
        }
    }

    /// Convenience: set the input and send in one call.
    pub async fn send(&self, text: impl Into<String>) -> Option<ChatMessage> {
        self.set_input(text).await;
        self.send_pending().await
    }

    /// Resets the session to the seeded welcome message. Safe mid-flight:
    /// the stale reply is discarded by the generation check.
    pub async fn reset(&self) {
        self.session.lock().await.reset();
    }
}

//! Chat session state machine.
//!
//! A session is either idle or awaiting exactly one in-flight response.
//! Every outbound question carries the session generation; replies from a
//! generation older than the current one (a reset happened meanwhile) are
//! discarded so they cannot corrupt fresh history.

use super::message::{ChatMessage, MessageSender, MessageTag};
use super::reply::AssistantReply;

/// The seeded assistant message every fresh session starts with.
pub const WELCOME_MESSAGE: &str = "Bonjour ! Je suis votre assistant IA spécialisé dans la \
     Charte du Contribuable 2025 du Cameroun. Je peux vous aider à comprendre vos droits et \
     obligations fiscales camerounaises. Posez-moi vos questions !";

/// Suggested questions; selecting one only populates the input buffer.
pub const QUICK_QUESTIONS: [&str; 6] = [
    "Quels sont mes droits lors d'un contrôle fiscal ?",
    "Comment contester une décision fiscale ?",
    "Quels sont les délais de prescription ?",
    "Comment faire un recours gracieux ?",
    "Quels sont mes droits en matière de secret professionnel ?",
    "Comment obtenir un délai de paiement ?",
];

/// A question handed to the transport, tagged with the generation it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundQuestion {
    pub text: String,
    pub generation: u64,
}

/// Turn-based conversation state.
///
/// Owns the ordered message history (append-only except on reset), the
/// pending input buffer, and the awaiting-response flag that enforces at
/// most one outstanding request per session.
#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    input: String,
    awaiting_response: bool,
    next_message_id: u64,
    generation: u64,
}

impl ChatSession {
    /// Creates a session seeded with the welcome message.
    pub fn new() -> Self {
        let mut session = Self {
            messages: Vec::new(),
            input: String::new(),
            awaiting_response: false,
            next_message_id: 1,
            generation: 0,
        };
        session.push_message(WELCOME_MESSAGE.to_string(), MessageSender::Assistant, Some(MessageTag::Info));
        session
    }

    /// The ordered message history, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The pending input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// True while a request is in flight.
    pub fn is_awaiting_response(&self) -> bool {
        self.awaiting_response
    }

    /// Current generation; bumped on every reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the input buffer.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Applies a quick-question shortcut: populates the input buffer only,
    /// without transitioning state or sending.
    pub fn apply_quick_question(&mut self, question: &str) {
        self.input = question.to_string();
    }

    /// Attempts the `Idle -> AwaitingResponse` transition.
    ///
    /// Returns `None` (a no-op: no message appended, no request to issue)
    /// when the input is empty or whitespace-only, or when a response is
    /// already awaited. Otherwise appends the user message, clears the
    /// buffer, sets the awaiting flag, and hands back the outbound question.
    pub fn begin_send(&mut self) -> Option<OutboundQuestion> {
        if self.awaiting_response || self.input.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.input);
        self.push_message(text.clone(), MessageSender::User, None);
        self.awaiting_response = true;

        Some(OutboundQuestion {
            text,
            generation: self.generation,
        })
    }

    /// Applies a settled response for the given generation.
    ///
    /// Stale replies (generation older than the current one) are discarded:
    /// a reset happened while the request was in flight and the fresh
    /// history must not be touched. Returns whether the reply was applied.
    pub fn apply_reply(&mut self, generation: u64, reply: AssistantReply) -> bool {
        if generation != self.generation {
            tracing::debug!(
                "Discarding stale chat reply (generation {} != {})",
                generation,
                self.generation
            );
            return false;
        }

        self.awaiting_response = false;
        self.push_message(reply.content, MessageSender::Assistant, Some(reply.tag));
        true
    }

    /// Resets the session: history back to exactly the seeded welcome
    /// message, input buffer and awaiting flag cleared. Allowed in any
    /// state; an in-flight response arriving afterwards is discarded by the
    /// generation check.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.input.clear();
        self.awaiting_response = false;
        self.generation += 1;
        self.push_message(WELCOME_MESSAGE.to_string(), MessageSender::Assistant, Some(MessageTag::Info));
    }

    fn push_message(&mut self, content: String, sender: MessageSender, tag: Option<MessageTag>) {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.messages.push(ChatMessage {
            id,
            content,
            sender,
            timestamp: chrono::Utc::now().to_rfc3339(),
            tag,
        });
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_seeded_with_welcome() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, WELCOME_MESSAGE);
        assert_eq!(session.messages()[0].sender, MessageSender::Assistant);
        assert_eq!(session.messages()[0].tag, Some(MessageTag::Info));
        assert!(!session.is_awaiting_response());
    }

    #[test]
    fn test_empty_or_whitespace_input_is_a_noop() {
        let mut session = ChatSession::new();
        assert!(session.begin_send().is_none());

        session.set_input("   \n  ");
        assert!(session.begin_send().is_none());
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_awaiting_response());
    }

    #[test]
    fn test_begin_send_appends_user_message_and_clears_buffer() {
        let mut session = ChatSession::new();
        session.set_input("Quels sont mes droits ?");

        let outbound = session.begin_send().unwrap();
        assert_eq!(outbound.text, "Quels sont mes droits ?");
        assert!(session.is_awaiting_response());
        assert_eq!(session.input(), "");

        let last = session.messages().last().unwrap();
        assert_eq!(last.sender, MessageSender::User);
        assert_eq!(last.content, "Quels sont mes droits ?");
        assert_eq!(last.tag, None);
    }

    #[test]
    fn test_second_send_is_rejected_while_awaiting() {
        let mut session = ChatSession::new();
        session.set_input("première question");
        session.begin_send().unwrap();

        session.set_input("deuxième question");
        assert!(session.begin_send().is_none());
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn test_apply_reply_returns_to_idle() {
        let mut session = ChatSession::new();
        session.set_input("question");
        let outbound = session.begin_send().unwrap();

        let applied = session.apply_reply(outbound.generation, AssistantReply::fallback());
        assert!(applied);
        assert!(!session.is_awaiting_response());

        let last = session.messages().last().unwrap();
        assert_eq!(last.sender, MessageSender::Assistant);
        assert_eq!(last.tag, Some(MessageTag::Warning));
    }

    #[test]
    fn test_message_ids_are_unique_and_increasing() {
        let mut session = ChatSession::new();
        session.set_input("a");
        session.begin_send().unwrap();
        session.apply_reply(session.generation(), AssistantReply::fallback());
        session.set_input("b");
        session.begin_send().unwrap();

        let ids: Vec<u64> = session.messages().iter().map(|m| m.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_reset_restores_single_welcome_message() {
        let mut session = ChatSession::new();
        session.set_input("question");
        session.begin_send().unwrap();
        session.apply_reply(session.generation(), AssistantReply::fallback());
        session.set_input("brouillon");

        session.reset();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, WELCOME_MESSAGE);
        assert_eq!(session.input(), "");
        assert!(!session.is_awaiting_response());
    }

    #[test]
    fn test_stale_reply_after_reset_is_discarded() {
        let mut session = ChatSession::new();
        session.set_input("question");
        let outbound = session.begin_send().unwrap();

        // Reset mid-flight, then the old response arrives.
        session.reset();
        let applied = session.apply_reply(outbound.generation, AssistantReply::fallback());

        assert!(!applied);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, WELCOME_MESSAGE);
        assert!(!session.is_awaiting_response());
    }

    #[test]
    fn test_quick_question_only_populates_input() {
        let mut session = ChatSession::new();
        session.apply_quick_question(QUICK_QUESTIONS[0]);

        assert_eq!(session.input(), QUICK_QUESTIONS[0]);
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_awaiting_response());
    }
}

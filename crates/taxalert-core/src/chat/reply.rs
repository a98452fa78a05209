//! Assistant reply composition.
//!
//! Turns a raw answer-service response into the assistant message content,
//! appending the source listing only when the answer warrants it, and
//! synthesizes the fixed fallback reply on communication failure.

use super::classifier::{is_greeting, is_technical};
use super::message::MessageTag;
use serde::{Deserialize, Serialize};

/// Fixed fallback shown when the answer service cannot be reached.
///
/// The underlying error is never shown to the user beyond this string.
pub const FALLBACK_MESSAGE: &str = "Désolé, je ne peux pas répondre pour le moment. \
     Veuillez vérifier que le serveur Flask est bien démarré sur le port 5000.";

/// A successful answer-service response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAnswer {
    /// The answer text.
    pub answer: String,
    /// Source citations, when the service returned any.
    #[serde(default)]
    pub sources: Vec<String>,
}

/// A fully composed assistant turn, ready to append to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub content: String,
    pub tag: MessageTag,
}

impl AssistantReply {
    /// Composes the assistant content from a service answer.
    ///
    /// The source suffix is appended only when the answer carries technical
    /// content, is not a generic greeting, and at least one citation is
    /// present. Otherwise sources are omitted even if the service sent some.
    pub fn from_answer(answer: &ChatAnswer) -> Self {
        let mut content = answer.answer.clone();

        let cite = !answer.sources.is_empty()
            && !is_greeting(&answer.answer)
            && is_technical(&answer.answer);
        if cite {
            content.push_str(&format!("\n\n📚 Sources : {}", answer.sources.join(", ")));
        }

        Self {
            content,
            tag: MessageTag::Info,
        }
    }

    /// The scripted warning reply used when the answer service fails.
    pub fn fallback() -> Self {
        Self {
            content: FALLBACK_MESSAGE.to_string(),
            tag: MessageTag::Warning,
        }
    }
}

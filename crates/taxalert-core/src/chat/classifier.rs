//! Keyword classifiers for assistant answers.
//!
//! Source citations are only appended to answers that carry technical
//! fiscal/legal content and are not plain greetings. Both heuristics operate
//! on a fixed vocabulary so they cannot silently diverge from the rest of
//! the system.

/// Vocabulary that marks an answer as technical fiscal/legal content.
pub const TECHNICAL_KEYWORDS: [&str; 8] = [
    "charte", "fiscal", "droit", "tva", "impôt", "douane", "page", "sources",
];

const GREETING_PHRASES: [&str; 3] = ["comment puis-je", "que puis-je", "comment vous aider"];

/// True when the text reads as a generic greeting rather than an answer.
pub fn is_greeting(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("bonjour") && GREETING_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// True when the text matches the technical-content vocabulary.
pub fn is_technical(text: &str) -> bool {
    let lower = text.to_lowercase();
    TECHNICAL_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

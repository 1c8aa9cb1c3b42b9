//! Chat assistant gate.
//!
//! The responder decides what to say; the session controller only decides
//! the `has_legal_access` flag it is called with (`role ∈ {Admin, Legal}`)
//! and serializes replies per controller.

use async_trait::async_trait;
use portal_auth::AuthError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;

/// Generates assistant replies.
#[async_trait]
pub trait ChatResponder: Send + Sync {
    /// Replies to `message`. Legal topics must be refused when
    /// `has_legal_access` is `false`.
    async fn generate_reply(&self, message: &str, has_legal_access: bool)
        -> Result<String, AuthError>;
}

/// Terms that mark a message as a legal-center topic.
pub const LEGAL_KEYWORDS: &[&str] = &[
    "juridico",
    "jurídico",
    "legal",
    "contrato",
    "contract",
    "documento",
    "document",
    "lgpd",
    "compliance",
    "procuração",
    "power of attorney",
    "licença",
    "license",
];

/// Reply given to legal topics without legal access.
pub const LEGAL_REFUSAL: &str = "Sorry, you are not authorized to access legal center \
information. For legal matters, contact the legal department or an administrator.";

const CANNED_REPLIES: &[&str] = &[
    "Hello! How can I help you today?",
    "Understood. Let me look that information up for you.",
    "Based on the most recent data, I can confirm that...",
    "Here is a summary of what I found: the growth rate is above the industry average.",
    "Is there anything else I can help you with?",
];

/// Returns `true` if the message touches a legal topic.
///
/// # Example
///
/// ```
/// use portal_runtime::chat::is_legal_topic;
///
/// assert!(is_legal_topic("Where is the LGPD policy?"));
/// assert!(!is_legal_topic("Sales numbers for Q3?"));
/// ```
#[must_use]
pub fn is_legal_topic(message: &str) -> bool {
    let lowered = message.to_lowercase();
    LEGAL_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// Canned-reply responder with simulated latency.
///
/// Replies rotate through a fixed list, so output is deterministic for a
/// given sequence of messages.
#[derive(Debug, Default)]
pub struct ScriptedResponder {
    latency: Duration,
    cursor: AtomicUsize,
}

impl ScriptedResponder {
    /// Creates a responder with the given latency.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            cursor: AtomicUsize::new(0),
        }
    }

    fn next_reply(&self) -> &'static str {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        CANNED_REPLIES[i % CANNED_REPLIES.len()]
    }
}

#[async_trait]
impl ChatResponder for ScriptedResponder {
    async fn generate_reply(
        &self,
        message: &str,
        has_legal_access: bool,
    ) -> Result<String, AuthError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if !has_legal_access && is_legal_topic(message) {
            debug!("legal topic refused");
            return Ok(LEGAL_REFUSAL.to_string());
        }
        Ok(self.next_reply().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_detection_is_case_insensitive() {
        assert!(is_legal_topic("Show me the CONTRATO"));
        assert!(is_legal_topic("jurídico?"));
        assert!(is_legal_topic("compliance report"));
        assert!(!is_legal_topic("hello"));
    }

    #[tokio::test]
    async fn refuses_legal_topic_without_access() {
        let bot = ScriptedResponder::new(Duration::ZERO);
        let reply = bot.generate_reply("open the NDA contract", false).await.unwrap();
        assert_eq!(reply, LEGAL_REFUSAL);
    }

    #[tokio::test]
    async fn answers_legal_topic_with_access() {
        let bot = ScriptedResponder::new(Duration::ZERO);
        let reply = bot.generate_reply("open the NDA contract", true).await.unwrap();
        assert_eq!(reply, CANNED_REPLIES[0]);
    }

    #[tokio::test]
    async fn replies_rotate() {
        let bot = ScriptedResponder::new(Duration::ZERO);
        let mut seen = Vec::new();
        for _ in 0..CANNED_REPLIES.len() + 1 {
            seen.push(bot.generate_reply("hi", false).await.unwrap());
        }
        assert_eq!(seen[0], seen[CANNED_REPLIES.len()]);
        assert_ne!(seen[0], seen[1]);
    }
}

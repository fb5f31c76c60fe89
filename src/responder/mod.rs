//! Response strategies
//!
//! Two ways to answer a query:
//! - `LocalResponder`: keyword lookup in the knowledge base, always succeeds
//! - `RemoteResponder`: a chat-completion backend, may fail with `RemoteError`

use crate::error::RemoteError;
use crate::knowledge::KnowledgeBase;
use crate::models::{Credential, ModeLabel, ResponseResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

pub mod openai;
pub use openai::OpenAiResponder;

/// Answer used when no knowledge-base keyword matches
pub const GENERIC_ANSWER: &str = "I can help you with accounts, cards, loans, branches, and more. Please ask a specific question or call 1-800-HELP.";

/// Trait for the remote (LLM controlled) strategy
#[async_trait]
pub trait RemoteResponder: Send + Sync {
    /// Answer a query. One attempt, no retries.
    async fn respond(
        &self,
        query: &str,
        credential: &Credential,
    ) -> std::result::Result<ResponseResult, RemoteError>;

    /// Cheap round trip used to check that the backend and credential work
    async fn probe(&self, credential: &Credential) -> std::result::Result<String, RemoteError>;
}

/// Keyword-matching fallback. Never fails.
#[derive(Debug, Clone, Default)]
pub struct LocalResponder {
    knowledge: KnowledgeBase,
}

impl LocalResponder {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self { knowledge }
    }

    pub fn respond(&self, query: &str) -> ResponseResult {
        let answer = self.knowledge.lookup(query).unwrap_or(GENERIC_ANSWER);
        ResponseResult::new(answer, ModeLabel::Fallback)
    }
}

/// Scripted remote for development & testing.
/// Keeps the router exercisable without a network dependency.
pub struct MockRemote {
    outcome: std::result::Result<String, RemoteError>,
    calls: AtomicUsize,
}

impl MockRemote {
    pub fn answering(answer: impl Into<String>) -> Self {
        Self {
            outcome: Ok(answer.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: RemoteError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `respond` and `probe` calls seen so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteResponder for MockRemote {
    async fn respond(
        &self,
        _query: &str,
        _credential: &Credential,
    ) -> std::result::Result<ResponseResult, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome
            .clone()
            .map(|answer| ResponseResult::new(answer, ModeLabel::AiMode))
    }

    async fn probe(&self, _credential: &Credential) -> std::result::Result<String, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeEntry;

    #[test]
    fn test_local_responder_matches_keyword() {
        let local = LocalResponder::default();

        let result = local.respond("How to open account?");
        assert_eq!(result.mode, ModeLabel::Fallback);
        assert!(result.answer.starts_with("To open an account, visit any branch"));
    }

    #[test]
    fn test_local_responder_generic_answer() {
        let local = LocalResponder::default();

        for q in ["Tell me a joke", "What's 2+2?"] {
            let result = local.respond(q);
            assert_eq!(result.answer, GENERIC_ANSWER);
            assert_eq!(result.mode, ModeLabel::Fallback);
        }
    }

    #[test]
    fn test_local_responder_custom_table() {
        let local = LocalResponder::new(KnowledgeBase::new(vec![KnowledgeEntry::new(
            "mortgage",
            "Mortgages from 8.5% APR.",
        )]));

        assert_eq!(local.respond("Mortgage options?").answer, "Mortgages from 8.5% APR.");
        assert_eq!(local.respond("How to open account?").answer, GENERIC_ANSWER);
    }

    #[tokio::test]
    async fn test_mock_remote_counts_calls() {
        let remote = MockRemote::failing(RemoteError::EmptyCompletion);
        let cred = Credential::new("sk-test").unwrap();

        assert!(remote.respond("hi", &cred).await.is_err());
        assert!(remote.probe(&cred).await.is_err());
        assert_eq!(remote.calls(), 2);
    }
}

//! Banking Assistant
//!
//! Answers natural-language banking questions by routing each query to:
//! - a remote chat-completions model (when a credential is configured)
//! - a local keyword responder (always available)
//!
//! Remote failures degrade to the local answer with an honest mode label,
//! and crisis queries get an urgent banner whichever strategy answered.
//!
//! FLOW:
//! QUERY → DISPATCH → DEGRADE ON FAILURE → ANNOTATE → (answer, mode label)

pub mod api;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod models;
pub mod responder;
pub mod router;
pub mod session;
pub mod urgency;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use config::AssistantConfig;
pub use error::{AssistantError, RemoteError};
pub use knowledge::{KnowledgeBase, KnowledgeEntry};
pub use responder::{LocalResponder, OpenAiResponder, RemoteResponder};
pub use router::ResponseRouter;
pub use urgency::UrgencyAnnotator;

//! Error types for the banking assistant

use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

/// Failure of a single remote completion call.
///
/// The `Display` text is the human-readable description that ends up in the
/// diagnostic note of a degraded answer, so it stays short.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("API key not configured")]
    MissingCredential,

    #[error("{0}")]
    Transport(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("no completion returned")]
    EmptyCompletion,
}

#[derive(Error, Debug)]
pub enum AssistantError {

    // =============================
    // Core Errors
    // =============================

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Core data models for the banking assistant

use serde::{Deserialize, Serialize};
use std::fmt;

/// Emergency contact line quoted in canned answers and urgent banners
pub const EMERGENCY_LINE: &str = "1-800-HELP";

/// Canned prompts offered to new users by the chat surfaces
pub const SAMPLE_QUESTIONS: &[&str] = &[
    "How to open account?",
    "Lost my card!",
    "Loan rates?",
    "Branch hours?",
    "Tell me a joke",
    "What's 2+2?",
];

//
// ================= Credential =================
//

/// Opaque API secret handed to the remote responder.
///
/// Never validated or stored by the router; `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw secret. Blank input yields `None`.
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            None
        } else {
            Some(Self(secret))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

//
// ================= Mode =================
//

/// Whether the remote strategy is attempted at all
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    AiEnabled,
    AiDisabled,
}

impl Mode {
    pub fn from_credential(credential: Option<&Credential>) -> Self {
        match credential {
            Some(_) => Mode::AiEnabled,
            None => Mode::AiDisabled,
        }
    }

    /// Session mode after a connection check: a failed check turns AI off,
    /// a successful one turns it back on whenever a credential is present.
    pub fn after_connection_test(connected: bool, credential: Option<&Credential>) -> Self {
        if connected {
            Self::from_credential(credential)
        } else {
            Mode::AiDisabled
        }
    }
}

/// Which strategy actually produced an answer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModeLabel {
    AiMode,
    AiError,
    Fallback,
}

impl ModeLabel {
    /// Caption shown above an answer in the chat views
    pub fn indicator(self) -> &'static str {
        match self {
            ModeLabel::AiMode => "🟢 [AI MODE]",
            ModeLabel::AiError => "🔴 [AI ERROR - Using Fallback]",
            ModeLabel::Fallback => "🔵 [FALLBACK MODE]",
        }
    }
}

//
// ================= Result =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseResult {
    pub answer: String,
    pub mode: ModeLabel,
}

impl ResponseResult {
    pub fn new(answer: impl Into<String>, mode: ModeLabel) -> Self {
        Self {
            answer: answer.into(),
            mode,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::AiEnabled => "AI MODE",
            Mode::AiDisabled => "FALLBACK MODE",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for ModeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModeLabel::AiMode => "AI_MODE",
            ModeLabel::AiError => "AI_ERROR",
            ModeLabel::Fallback => "FALLBACK",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_credential_is_absent() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new("   ").is_none());
        assert_eq!(Mode::from_credential(None), Mode::AiDisabled);

        let cred = Credential::new("sk-test").unwrap();
        assert_eq!(Mode::from_credential(Some(&cred)), Mode::AiEnabled);
    }

    #[test]
    fn test_mode_recovers_after_successful_connection_test() {
        let cred = Credential::new("sk-test").unwrap();

        let mode = Mode::after_connection_test(false, Some(&cred));
        assert_eq!(mode, Mode::AiDisabled);

        let mode = Mode::after_connection_test(true, Some(&cred));
        assert_eq!(mode, Mode::AiEnabled);

        assert_eq!(Mode::after_connection_test(true, None), Mode::AiDisabled);
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let cred = Credential::new("sk-very-secret").unwrap();
        assert!(!format!("{:?}", cred).contains("secret"));
        assert_eq!(cred.expose(), "sk-very-secret");
    }

    #[test]
    fn test_mode_label_serialization() {
        let result = ResponseResult::new("hi", ModeLabel::AiError);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mode"], "AI_ERROR");
        assert_eq!(ModeLabel::Fallback.to_string(), "FALLBACK");
        assert_eq!(ModeLabel::AiMode.indicator(), "🟢 [AI MODE]");
    }
}

//! Chat transcript for the interactive surfaces
//!
//! Lives only as long as the session that owns it; the router never reads it.

use crate::models::{ModeLabel, ResponseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    /// Set on assistant entries only
    pub mode: Option<ModeLabel>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ChatTranscript {
    entries: Vec<TranscriptEntry>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            id: Uuid::new_v4(),
            role: ChatRole::User,
            content: content.into(),
            mode: None,
            timestamp: Utc::now(),
        });
    }

    pub fn push_assistant(&mut self, result: ResponseResult) {
        self.entries.push(TranscriptEntry {
            id: Uuid::new_v4(),
            role: ChatRole::Assistant,
            content: result.answer,
            mode: Some(result.mode),
            timestamp: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

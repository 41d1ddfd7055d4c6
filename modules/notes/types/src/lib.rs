//! Shared types for the notes service and its HTTP clients.

use serde::{Deserialize, Serialize};

// =====================================================
// Request Types
// =====================================================

/// Body of `POST /api/notes`.
///
/// Both fields are optional on the wire so that a missing `content` reaches
/// the store's validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewNote {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub important: Option<bool>,
}

impl NewNote {
    pub fn new(content: impl Into<String>, important: bool) -> Self {
        Self {
            content: Some(content.into()),
            important: Some(important),
        }
    }
}

// =====================================================
// Response Types
// =====================================================

/// Error payload returned alongside 4xx/5xx statuses that carry a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

// =====================================================
// Domain Types
// =====================================================

/// A stored note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned identifier, immutable after creation
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub important: bool,
}

/*!
 * Session-specific models and DTOs.
 *
 * These structures are what the session workflow hands back to callers,
 * shaped for display and JSON output rather than for storage.
 */

use serde::{Deserialize, Serialize};

use crate::database::models::{SessionRecord, SessionStatus, SessionWordRecord};

/// Outcome of storing a new subtitle file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    /// New session id
    pub id: String,
    /// Language code detected from the whole document
    pub language: String,
    /// File name as given by the caller
    pub filename: String,
    /// Always `uploaded` for a fresh session
    pub status: SessionStatus,
    /// Styles to choose from before processing, empty for plain formats
    pub styles: Vec<String>,
}

/// One word of a session as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWordItem {
    pub word: String,
    pub frequency: i64,
    /// Struck by the user as already known
    pub is_removed: bool,
}

impl From<SessionWordRecord> for SessionWordItem {
    fn from(record: SessionWordRecord) -> Self {
        Self {
            word: record.word,
            frequency: record.frequency,
            is_removed: record.is_removed,
        }
    }
}

/// Result of closing a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeSummary {
    /// Most frequent words that were not struck, best first
    pub top_words: Vec<String>,
    /// Words struck in this session
    pub learned_count: usize,
    /// All words the session extracted
    pub total_count: usize,
}

/// High-level session information for display and tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: String,
    pub language: String,
    pub filename: String,
    /// Style used for processing, once known
    pub style: Option<String>,
    pub status: SessionStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl SessionInfo {
    /// Create from a session record
    pub fn from_record(record: &SessionRecord) -> Self {
        Self {
            id: record.id.clone(),
            language: record.language.clone(),
            filename: record.subtitle_filename.clone(),
            style: record.style.clone(),
            status: record.status,
            created_at: record.created_at.clone(),
            updated_at: record.updated_at.clone(),
        }
    }

    /// Get a human-readable status string
    pub fn status_display(&self) -> &'static str {
        match self.status {
            SessionStatus::Uploaded => "Uploaded",
            SessionStatus::Processed => "Awaiting review",
            SessionStatus::Finalized => "Finalized",
        }
    }

    /// Short form of the session ID (first 8 characters)
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

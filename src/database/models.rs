/*!
 * Database entity models and DTOs.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Session status enumeration
///
/// A session moves forward only: uploaded, then processed, then finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// File stored, styles and language known
    Uploaded,
    /// Unknown words extracted and awaiting review
    Processed,
    /// Review done, learned words recorded
    Finalized,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Uploaded => write!(f, "uploaded"),
            SessionStatus::Processed => write!(f, "processed"),
            SessionStatus::Finalized => write!(f, "finalized"),
        }
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uploaded" => Ok(SessionStatus::Uploaded),
            "processed" => Ok(SessionStatus::Processed),
            "finalized" => Ok(SessionStatus::Finalized),
            _ => Err(anyhow::anyhow!("Invalid session status: {}", s)),
        }
    }
}

/// Status of a word in a user's vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserWordStatus {
    /// The user confirmed they know the word
    Learned,
}

impl fmt::Display for UserWordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserWordStatus::Learned => write!(f, "learned"),
        }
    }
}

/// Upload session record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique session identifier (UUID)
    pub id: String,
    /// Language code of the subtitle text
    pub language: String,
    /// File name as uploaded
    pub subtitle_filename: String,
    /// Where the uploaded bytes are stored
    pub subtitle_path: String,
    /// SHA256 hash of the uploaded bytes
    pub content_hash: String,
    /// Style chosen when processing, if any
    pub style: Option<String>,
    /// Current session status
    pub status: SessionStatus,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl SessionRecord {
    /// Create a new session record in the uploaded state
    pub fn new(
        id: String,
        language: String,
        subtitle_filename: String,
        subtitle_path: String,
        content_hash: String,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id,
            language,
            subtitle_filename,
            subtitle_path,
            content_hash,
            style: None,
            status: SessionStatus::Uploaded,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// A word of one session, with its frequency and review flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWordRecord {
    /// Database ID
    pub id: i64,
    /// Session this row belongs to
    pub session_id: String,
    /// Case-folded word
    pub word: String,
    /// Occurrences in the session's dialogue
    pub frequency: i64,
    /// Position in the ranked extraction, starting at 0
    pub rank: i64,
    /// Struck by the user as already known
    pub is_removed: bool,
}

/// Counts per table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of sessions
    pub session_count: i64,
    /// Number of distinct words seen
    pub word_count: i64,
    /// Number of words users have learned
    pub learned_count: i64,
}

/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API for all database operations,
 * abstracting away the SQL details and providing type-safe access.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};

use super::connection::DatabaseConnection;
use super::models::{
    SessionRecord, SessionStatus, SessionWordRecord, StoreStats, UserWordStatus,
};
use crate::language_utils::Language;
use crate::vocabulary::{KnownWordSet, KnownWordStore, WordToken};

const SESSION_COLUMNS: &str = r#"
    id, language, subtitle_filename, subtitle_path, content_hash, style, status,
    created_at, updated_at
"#;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open (or create) the database file and wrap it
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new(path)?))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Row counts of the main tables
    pub fn stats(&self) -> Result<StoreStats> {
        self.db.stats()
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Insert a new upload session
    pub async fn create_session(&self, session: &SessionRecord) -> Result<()> {
        let session = session.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO sessions (
                        id, language, subtitle_filename, subtitle_path, content_hash, style,
                        status, created_at, updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                    "#,
                    params![
                        session.id,
                        session.language,
                        session.subtitle_filename,
                        session.subtitle_path,
                        session.content_hash,
                        session.style,
                        session.status.to_string(),
                        session.created_at,
                        session.updated_at,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Get a session by ID
    pub async fn get_session(&self, session_id: &str) -> Result<Option<SessionRecord>> {
        let session_id = session_id.to_string();

        self.db
            .execute_async(move |conn| Self::get_session_sync(conn, &session_id))
            .await
    }

    fn get_session_sync(conn: &Connection, session_id: &str) -> Result<Option<SessionRecord>> {
        let sql = format!("SELECT {} FROM sessions WHERE id = ?1", SESSION_COLUMNS);
        let result = conn
            .query_row(&sql, [session_id], parse_session_row)
            .optional()?;

        Ok(result)
    }

    /// List sessions, newest first, with optional status filter
    pub async fn list_sessions(
        &self,
        status_filter: Option<SessionStatus>,
    ) -> Result<Vec<SessionRecord>> {
        self.db
            .execute_async(move |conn| {
                let sessions: Vec<SessionRecord> = if let Some(status) = status_filter {
                    let sql = format!(
                        "SELECT {} FROM sessions WHERE status = ?1 ORDER BY created_at DESC",
                        SESSION_COLUMNS
                    );
                    let mut stmt = conn.prepare(&sql)?;
                    stmt.query_map([status.to_string()], parse_session_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?
                } else {
                    let sql = format!("SELECT {} FROM sessions ORDER BY created_at DESC", SESSION_COLUMNS);
                    let mut stmt = conn.prepare(&sql)?;
                    stmt.query_map([], parse_session_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?
                };

                Ok(sessions)
            })
            .await
    }

    /// Update session status
    pub async fn update_session_status(
        &self,
        session_id: &str,
        status: SessionStatus,
    ) -> Result<()> {
        let session_id = session_id.to_string();
        let now = chrono::Utc::now().to_rfc3339();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "UPDATE sessions SET status = ?1, updated_at = ?2 WHERE id = ?3",
                    params![status.to_string(), now, session_id],
                )?;
                Ok(())
            })
            .await
    }

    // =========================================================================
    // Session Word Operations
    // =========================================================================

    /// Store the ranked words of a processed session and mark it processed
    ///
    /// Runs in one transaction: either every word and the status change land,
    /// or nothing does. `words` must already be in rank order.
    pub async fn save_processed_words(
        &self,
        session_id: &str,
        language: Language,
        style: Option<String>,
        words: Vec<WordToken>,
    ) -> Result<usize> {
        let session_id = session_id.to_string();
        let now = chrono::Utc::now().to_rfc3339();

        self.db
            .transaction_async(move |tx| {
                for (rank, token) in words.iter().enumerate() {
                    let word_id = Self::upsert_word_sync(tx, &token.word, language)?;
                    tx.execute(
                        r#"
                        INSERT INTO session_words (session_id, word_id, frequency, rank, is_removed)
                        VALUES (?1, ?2, ?3, ?4, 0)
                        ON CONFLICT(session_id, word_id) DO UPDATE SET
                            frequency = excluded.frequency,
                            rank = excluded.rank
                        "#,
                        params![session_id, word_id, token.frequency as i64, rank as i64],
                    )?;
                }

                tx.execute(
                    "UPDATE sessions SET status = ?1, style = ?2, updated_at = ?3 WHERE id = ?4",
                    params![SessionStatus::Processed.to_string(), style, now, session_id],
                )?;

                debug!("Stored {} words for session {}", words.len(), session_id);
                Ok(words.len())
            })
            .await
    }

    /// Words of a session in rank order, struck ones included
    pub async fn get_session_words(&self, session_id: &str) -> Result<Vec<SessionWordRecord>> {
        let session_id = session_id.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT sw.id, sw.session_id, w.word, sw.frequency, sw.rank, sw.is_removed
                    FROM session_words sw
                    JOIN words w ON w.id = sw.word_id
                    WHERE sw.session_id = ?1
                    ORDER BY sw.rank
                    "#,
                )?;

                let rows = stmt.query_map([&session_id], |row| {
                    Ok(SessionWordRecord {
                        id: row.get(0)?,
                        session_id: row.get(1)?,
                        word: row.get(2)?,
                        frequency: row.get(3)?,
                        rank: row.get(4)?,
                        is_removed: row.get::<_, i64>(5)? != 0,
                    })
                })?;

                let words = rows.collect::<rusqlite::Result<Vec<SessionWordRecord>>>()?;
                Ok(words)
            })
            .await
    }

    /// Mark words of a session as struck; returns how many rows changed
    ///
    /// Words the session does not contain are ignored.
    pub async fn mark_words_removed(&self, session_id: &str, words: &[String]) -> Result<usize> {
        let session_id = session_id.to_string();
        let words: Vec<String> = words.iter().map(|w| w.trim().to_lowercase()).collect();

        self.db
            .transaction_async(move |tx| {
                let mut changed = 0;
                for word in &words {
                    changed += tx.execute(
                        r#"
                        UPDATE session_words SET is_removed = 1
                        WHERE session_id = ?1
                          AND is_removed = 0
                          AND word_id IN (SELECT id FROM words WHERE word = ?2)
                        "#,
                        params![session_id, word],
                    )?;
                }
                Ok(changed)
            })
            .await
    }

    // =========================================================================
    // User Word Operations
    // =========================================================================

    /// Record words as learned by a user; returns how many were new
    pub async fn learn_words(
        &self,
        user_id: &str,
        language: Language,
        words: &[String],
    ) -> Result<usize> {
        let user_id = user_id.to_string();
        let words = words.to_vec();
        let now = chrono::Utc::now().to_rfc3339();

        self.db
            .transaction_async(move |tx| {
                let mut added = 0;
                for word in &words {
                    let folded = word.trim().to_lowercase();
                    if folded.is_empty() {
                        continue;
                    }

                    let word_id = Self::upsert_word_sync(tx, &folded, language)?;
                    added += tx.execute(
                        r#"
                        INSERT OR IGNORE INTO user_words (user_id, word_id, status, created_at)
                        VALUES (?1, ?2, ?3, ?4)
                        "#,
                        params![user_id, word_id, UserWordStatus::Learned.to_string(), now],
                    )?;
                }
                Ok(added)
            })
            .await
    }

    /// Words a user has learned in one language
    pub async fn get_learned_words(&self, user_id: &str, language: Language) -> Result<Vec<String>> {
        let user_id = user_id.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT w.word
                    FROM user_words uw
                    JOIN words w ON w.id = uw.word_id
                    WHERE uw.user_id = ?1 AND w.language = ?2 AND uw.status = ?3
                    ORDER BY w.word
                    "#,
                )?;

                let rows = stmt.query_map(
                    params![user_id, language.code(), UserWordStatus::Learned.to_string()],
                    |row| row.get::<_, String>(0),
                )?;

                let words = rows.collect::<rusqlite::Result<Vec<String>>>()?;
                Ok(words)
            })
            .await
    }

    /// Id of a word, inserting it first if needed
    fn upsert_word_sync(conn: &Connection, word: &str, language: Language) -> Result<i64> {
        conn.execute(
            "INSERT OR IGNORE INTO words (word, language) VALUES (?1, ?2)",
            params![word, language.code()],
        )?;

        let id = conn.query_row(
            "SELECT id FROM words WHERE word = ?1 AND language = ?2",
            params![word, language.code()],
            |row| row.get(0),
        )?;

        Ok(id)
    }

    // =========================================================================
    // Hashing
    // =========================================================================

    /// Compute SHA256 hash of raw bytes
    pub fn hash_content(content: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        format!("{:x}", hasher.finalize())
    }
}

#[async_trait]
impl KnownWordStore for Repository {
    async fn load_known_words(&self, user_id: &str, language: Language) -> Result<KnownWordSet> {
        let words = self.get_learned_words(user_id, language).await?;
        Ok(KnownWordSet::from_words(language, words))
    }

    async fn add_known_words(&self, user_id: &str, language: Language, words: &[String]) -> Result<usize> {
        self.learn_words(user_id, language, words).await
    }
}

fn parse_session_row(row: &rusqlite::Row) -> rusqlite::Result<SessionRecord> {
    Ok(SessionRecord {
        id: row.get(0)?,
        language: row.get(1)?,
        subtitle_filename: row.get(2)?,
        subtitle_path: row.get(3)?,
        content_hash: row.get(4)?,
        style: row.get(5)?,
        status: row.get::<_, String>(6)?.parse().map_err(|e: anyhow::Error| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, e.into())
        })?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

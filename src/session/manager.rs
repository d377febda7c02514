/*!
 * Session manager for the review workflow.
 *
 * This module handles:
 * - Storing uploaded subtitle files and opening a session for them
 * - Extracting the unknown words of a session for a chosen style
 * - Recording which words the user struck as already known
 * - Finalizing: learning the struck words and summarizing the rest
 */

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::app_config::Config;
use crate::database::models::{SessionRecord, SessionStatus};
use crate::database::repository::Repository;
use crate::errors::SessionError;
use crate::file_utils::FileManager;
use crate::language_utils::Language;
use crate::subtitle::{decode_bytes, detect_format_and_styles, SubtitleFormat};
use crate::vocabulary::{Extraction, KnownWordStore, RankedWordList, WordPipeline, WordToken};

use super::models::{FinalizeSummary, SessionInfo, SessionWordItem, UploadResult};

/// Session manager for handling the upload, review and finalize lifecycle
pub struct SessionManager {
    /// Repository for database operations
    repo: Repository,
    /// Storage locations, limits and the active user
    config: Config,
    /// Shared word pipeline
    pipeline: Arc<WordPipeline>,
}

impl SessionManager {
    /// Create a new session manager with the given repository
    pub fn new(repo: Repository, config: Config, pipeline: Arc<WordPipeline>) -> Self {
        Self {
            repo,
            config,
            pipeline,
        }
    }

    /// Open the configured database and build the pipeline from the configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let repo = Repository::open(&config.storage.database_path)?;
        let pipeline = Arc::new(WordPipeline::from_config(&config));
        Ok(Self::new(repo, config, pipeline))
    }

    /// Create a new session manager with an in-memory database (for testing)
    pub fn new_in_memory(config: Config, pipeline: Arc<WordPipeline>) -> Result<Self> {
        let repo = Repository::new_in_memory()?;
        Ok(Self::new(repo, config, pipeline))
    }

    /// Get the underlying repository
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    fn user_id(&self) -> &str {
        &self.config.default_user
    }

    // =========================================================================
    // Upload
    // =========================================================================

    /// Store an uploaded subtitle file and open a session for it
    pub async fn upload(&self, filename: &str, content: &[u8]) -> Result<UploadResult> {
        let storage = &self.config.storage;

        if !storage.is_extension_allowed(filename) {
            let extension = Path::new(filename)
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
                .unwrap_or_default();
            return Err(SessionError::ExtensionNotAllowed {
                extension,
                allowed: storage.allowed_extensions.clone(),
            }
            .into());
        }

        if content.len() > storage.max_upload_size {
            return Err(SessionError::FileTooLarge {
                size: content.len(),
                limit: storage.max_upload_size,
            }
            .into());
        }

        let info = detect_format_and_styles(filename, content)?;
        let text = decode_bytes(content)?;
        let language = self.pipeline.detect_language(&text);

        let session_id = Uuid::new_v4().to_string();
        let path = FileManager::upload_path(&storage.upload_dir, &session_id, filename);
        FileManager::write_bytes(&path, content)?;

        let record = SessionRecord::new(
            session_id.clone(),
            language.code().to_string(),
            filename.to_string(),
            path.to_string_lossy().to_string(),
            Repository::hash_content(content),
        );
        if let Err(e) = self.repo.create_session(&record).await {
            // No session will ever point at the stored copy
            if let Err(cleanup) = FileManager::remove_file(&path) {
                warn!("Failed to remove orphaned upload {:?}: {}", path, cleanup);
            }
            return Err(e);
        }

        info!(
            "Created session {} for '{}' ({}, {} style(s))",
            &session_id[..8],
            filename,
            language.name(),
            info.styles.len()
        );

        Ok(UploadResult {
            id: session_id,
            language: record.language,
            filename: filename.to_string(),
            status: SessionStatus::Uploaded,
            styles: info.styles,
        })
    }

    // =========================================================================
    // Processing
    // =========================================================================

    /// Extract the session's unknown words for the chosen style
    ///
    /// On failure the session stays `uploaded`, so the call can be repeated
    /// with another style.
    pub async fn process(&self, session_id: &str, style: Option<&str>) -> Result<Extraction> {
        let session = self.require_status(session_id, SessionStatus::Uploaded).await?;
        let language = self.session_language(&session)?;

        let format = SubtitleFormat::from_filename(&session.subtitle_filename)?;
        let content = FileManager::read_bytes(&session.subtitle_path)
            .with_context(|| format!("Stored subtitle for session {} is unreadable", session_id))?;

        let known = self.repo.load_known_words(self.user_id(), language).await?;
        let extraction =
            self.pipeline
                .extract_words(&content, format, style, Some(language), &known)?;

        let stored = self
            .repo
            .save_processed_words(
                session_id,
                language,
                style.map(str::to_string),
                extraction.words.clone(),
            )
            .await?;

        info!(
            "Processed session {}: {} unknown words, {} known words skipped",
            &session_id[..session_id.len().min(8)],
            stored,
            extraction.filtered_known.len()
        );

        Ok(extraction)
    }

    // =========================================================================
    // Review
    // =========================================================================

    /// Words of a session in rank order
    pub async fn words(&self, session_id: &str) -> Result<Vec<SessionWordItem>> {
        self.get_session_record(session_id).await?;

        let words = self.repo.get_session_words(session_id).await?;
        Ok(words.into_iter().map(SessionWordItem::from).collect())
    }

    /// Strike words the user already knows; returns how many were updated
    pub async fn strike(&self, session_id: &str, removed_words: &[String]) -> Result<usize> {
        self.require_status(session_id, SessionStatus::Processed).await?;

        let updated = self.repo.mark_words_removed(session_id, removed_words).await?;
        debug!("Struck {} of {} word(s) in session {}", updated, removed_words.len(), session_id);
        Ok(updated)
    }

    /// Learn the struck words and summarize the ones still unknown
    pub async fn finalize(&self, session_id: &str) -> Result<FinalizeSummary> {
        let session = self.require_status(session_id, SessionStatus::Processed).await?;
        let language = self.session_language(&session)?;

        let words = self.repo.get_session_words(session_id).await?;
        let total_count = words.len();

        let (removed, remaining): (Vec<_>, Vec<_>) =
            words.into_iter().partition(|word| word.is_removed);

        let learned: Vec<String> = removed.into_iter().map(|word| word.word).collect();
        let newly_known = self
            .repo
            .add_known_words(self.user_id(), language, &learned)
            .await?;

        let remaining: Vec<WordToken> = remaining
            .into_iter()
            .map(|word| WordToken::new(word.word, word.frequency.max(0) as usize))
            .collect();
        let top = RankedWordList::top(remaining, self.config.extraction.top_words_limit);

        self.repo
            .update_session_status(session_id, SessionStatus::Finalized)
            .await?;

        info!(
            "Finalized session {}: {} learned ({} new), {} total",
            session_id,
            learned.len(),
            newly_known,
            total_count
        );

        Ok(FinalizeSummary {
            top_words: top.word_strings(),
            learned_count: learned.len(),
            total_count,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get session info by ID
    pub async fn get_session(&self, session_id: &str) -> Result<Option<SessionInfo>> {
        let record = self.repo.get_session(session_id).await?;
        Ok(record.as_ref().map(SessionInfo::from_record))
    }

    /// List sessions, newest first
    pub async fn list_sessions(&self, status: Option<SessionStatus>) -> Result<Vec<SessionInfo>> {
        let records = self.repo.list_sessions(status).await?;
        Ok(records.iter().map(SessionInfo::from_record).collect())
    }

    async fn get_session_record(&self, session_id: &str) -> Result<SessionRecord> {
        self.repo
            .get_session(session_id)
            .await?
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()).into())
    }

    async fn require_status(&self, session_id: &str, expected: SessionStatus) -> Result<SessionRecord> {
        let session = self.get_session_record(session_id).await?;
        if session.status != expected {
            return Err(SessionError::InvalidStatus {
                id: session_id.to_string(),
                expected: expected.to_string(),
                actual: session.status.to_string(),
            }
            .into());
        }
        Ok(session)
    }

    fn session_language(&self, session: &SessionRecord) -> Result<Language> {
        session
            .language
            .parse()
            .with_context(|| format!("Session {} has an invalid language", session.id))
    }
}

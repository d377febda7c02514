use anyhow::{anyhow, Context, Result};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::language_utils::Language;
use crate::session::SessionManager;
use crate::subtitle::{detect_format_and_styles, FormatInfo, SubtitleDocument, SubtitleFormat};
use crate::vocabulary::{KnownWordStore, KnownWordsFile, WordPipeline, WordToken};

// @module: Application controller for the command line

/// Ranked unknown words of one scanned file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// File that was scanned
    pub file: PathBuf,
    /// Language the dialogue was processed as
    pub language: Language,
    /// Most frequent unknown words, best first
    pub top_words: Vec<WordToken>,
    /// Distinct unknown words before truncation
    pub unknown_count: usize,
    /// Distinct known words that were skipped
    pub known_count: usize,
}

/// Options of a `scan` run
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Style to read from styled documents
    pub style: Option<String>,
    /// Skip detection and process as this language
    pub language: Option<Language>,
    /// Override of the configured summary size
    pub top: Option<usize>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Shared word pipeline
    pipeline: Arc<WordPipeline>,

    // @field: Known words used by stand-alone scans
    known_words: KnownWordsFile,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let pipeline = Arc::new(WordPipeline::from_config(&config));
        Ok(Self::with_pipeline(config, pipeline))
    }

    /// Controller around an existing pipeline
    pub fn with_pipeline(config: Config, pipeline: Arc<WordPipeline>) -> Self {
        let known_words = KnownWordsFile::new(&config.storage.known_words_dir);
        Self {
            config,
            pipeline,
            known_words,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Session workflow over the configured database, sharing this controller's pipeline
    pub fn session_manager(&self) -> Result<SessionManager> {
        let repo = crate::database::Repository::open(&self.config.storage.database_path)?;
        Ok(SessionManager::new(repo, self.config.clone(), self.pipeline.clone()))
    }

    /// Format and declared styles of a subtitle file
    pub fn styles(&self, path: &Path) -> Result<FormatInfo> {
        let content = FileManager::read_bytes(path)?;
        Ok(detect_format_and_styles(&file_name(path), &content)?)
    }

    /// Scan a file, or every subtitle file under a directory
    ///
    /// In directory mode a file that fails is logged and skipped.
    pub async fn scan(&self, path: &Path, options: &ScanOptions) -> Result<Vec<ScanReport>> {
        if FileManager::file_exists(path) {
            return Ok(vec![self.scan_file(path, options).await?]);
        }

        if !FileManager::dir_exists(path) {
            return Err(anyhow!("Input path does not exist: {:?}", path));
        }

        let files = FileManager::find_subtitle_files(path)?;
        if files.is_empty() {
            warn!("No subtitle files found in {:?}", path);
        }

        let mut reports = Vec::with_capacity(files.len());
        for file in &files {
            match self.scan_file(file, options).await {
                Ok(report) => reports.push(report),
                Err(e) => error!("Skipping {:?}: {}", file, e),
            }
        }

        info!("Scanned {} of {} file(s)", reports.len(), files.len());
        Ok(reports)
    }

    /// Extract the ranked unknown words of one file
    pub async fn scan_file(&self, path: &Path, options: &ScanOptions) -> Result<ScanReport> {
        let format = SubtitleFormat::from_filename(&file_name(path))?;
        let content = FileManager::read_bytes(path)?;

        let document = SubtitleDocument::from_bytes(format, &content)?;
        let text = document.dialogue_text(options.style.as_deref())?;
        let language = options
            .language
            .unwrap_or_else(|| self.pipeline.detect_language(&text));

        let known = self
            .known_words
            .load_known_words(&self.config.default_user, language)
            .await?;
        let extraction = self.pipeline.extract_from_text(&text, Some(language), &known);

        let limit = options.top.unwrap_or(self.config.extraction.top_words_limit);
        let top = extraction.top(limit);

        debug!("{:?}: {} unknown, {} known", path, extraction.words.len(), extraction.filtered_known.len());

        Ok(ScanReport {
            file: path.to_path_buf(),
            language,
            top_words: top.into_inner(),
            unknown_count: extraction.words.len(),
            known_count: extraction.filtered_known.len(),
        })
    }

    /// Add words to the known-word list of a language
    pub async fn learn(&self, language: Language, words: &[String]) -> Result<usize> {
        let added = self
            .known_words
            .add_known_words(&self.config.default_user, language, words)
            .await
            .with_context(|| format!("Failed to update known {} words", language.name()))?;

        info!("Learned {} new {} word(s)", added, language.name());
        Ok(added)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

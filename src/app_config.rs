use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::language_utils::DEFAULT_CJK_RATIO_THRESHOLD;
use crate::vocabulary::pipeline::DEFAULT_MIN_WORD_LENGTH;
use crate::vocabulary::DEFAULT_TOP_WORDS;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Word extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Dictionary settings
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Upload and database locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// User whose known words are read and written
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Word extraction settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Size of the "top words" summary
    #[serde(default = "default_top_words_limit")]
    pub top_words_limit: usize,

    /// Shortest accepted word, in characters
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,

    /// CJK character share above which text is treated as Japanese
    #[serde(default = "default_cjk_ratio_threshold")]
    pub cjk_ratio_threshold: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            top_words_limit: default_top_words_limit(),
            min_word_length: default_min_word_length(),
            cjk_ratio_threshold: default_cjk_ratio_threshold(),
        }
    }
}

/// Dictionary settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DictionaryConfig {
    /// Word list, one word per line
    #[serde(default = "default_dictionary_path")]
    pub path: PathBuf,

    /// When false, every token of the right shape counts as a word
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: default_dictionary_path(),
            enabled: true,
        }
    }
}

/// Upload and database settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
    /// Directory receiving uploaded subtitle files
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Directory of the plain-text known-word lists used by `scan`
    #[serde(default = "default_known_words_dir")]
    pub known_words_dir: PathBuf,

    /// Largest accepted upload, in bytes
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,

    /// Accepted upload suffixes, with the leading dot
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            database_path: default_database_path(),
            known_words_dir: default_known_words_dir(),
            max_upload_size: default_max_upload_size(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl StorageConfig {
    /// Whether `filename` has an allowed suffix, ignoring case
    pub fn is_extension_allowed(&self, filename: &str) -> bool {
        let lowered = filename.to_lowercase();
        self.allowed_extensions
            .iter()
            .any(|ext| lowered.ends_with(&ext.to_lowercase()))
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_top_words_limit() -> usize {
    DEFAULT_TOP_WORDS
}

fn default_min_word_length() -> usize {
    DEFAULT_MIN_WORD_LENGTH
}

fn default_cjk_ratio_threshold() -> f64 {
    DEFAULT_CJK_RATIO_THRESHOLD
}

fn default_dictionary_path() -> PathBuf {
    PathBuf::from("/usr/share/dict/words")
}

fn default_true() -> bool {
    true
}

fn default_user() -> String {
    "default".to_string()
}

fn default_max_upload_size() -> usize {
    10 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    vec![".ass".to_string(), ".srt".to_string()]
}

/// Base directory for sscout data, e.g. `~/.local/share/sscout`
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sscout")
}

fn default_upload_dir() -> PathBuf {
    default_data_dir().join("uploads")
}

fn default_database_path() -> PathBuf {
    default_data_dir().join("sscout.db")
}

fn default_known_words_dir() -> PathBuf {
    default_data_dir()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.extraction.top_words_limit == 0 {
            return Err(anyhow!("extraction.top_words_limit must be at least 1"));
        }

        let threshold = self.extraction.cjk_ratio_threshold;
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(anyhow!(
                "extraction.cjk_ratio_threshold must be between 0 and 1, got {}",
                threshold
            ));
        }

        if self.storage.max_upload_size == 0 {
            return Err(anyhow!("storage.max_upload_size must be greater than 0"));
        }

        if self.storage.allowed_extensions.is_empty() {
            return Err(anyhow!("storage.allowed_extensions must not be empty"));
        }

        if let Some(bad) = self
            .storage
            .allowed_extensions
            .iter()
            .find(|ext| !ext.starts_with('.'))
        {
            return Err(anyhow!("Allowed extension '{}' must start with a dot", bad));
        }

        if self.default_user.trim().is_empty() {
            return Err(anyhow!("default_user must not be empty"));
        }

        Ok(())
    }

    /// Load a JSON configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {:?}", path))
    }

    /// Load the file, or create it with defaults when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            extraction: ExtractionConfig::default(),
            dictionary: DictionaryConfig::default(),
            storage: StorageConfig::default(),
            default_user: default_user(),
            log_level: LogLevel::default(),
        }
    }
}

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;
use crate::language_utils::Language;

/// Vocabulary a user already knows, for one language
///
/// Words are stored case-folded. The set only grows, and only through
/// explicit confirmation by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownWordSet {
    language: Language,
    words: HashSet<String>,
}

impl KnownWordSet {
    /// Empty set for a language
    pub fn new(language: Language) -> Self {
        Self {
            language,
            words: HashSet::new(),
        }
    }

    /// Build a set from existing words, folding their case
    pub fn from_words<I, S>(language: Language, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new(language);
        set.confirm_all(words);
        set
    }

    /// Language the set belongs to
    pub fn language(&self) -> Language {
        self.language
    }

    /// Whether the word is known, ignoring case
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Record a word the user confirmed as known; returns false if it already was
    pub fn confirm(&mut self, word: &str) -> bool {
        let folded = word.trim().to_lowercase();
        if folded.is_empty() {
            return false;
        }
        self.words.insert(folded)
    }

    /// Record several confirmed words; returns how many were new
    pub fn confirm_all<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words
            .into_iter()
            .filter(|word| self.confirm(word.as_ref()))
            .count()
    }

    /// Number of known words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no word is known yet
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Known words, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Persistent home of known-word sets, keyed by user and language
#[async_trait]
pub trait KnownWordStore: Send + Sync {
    /// Snapshot of the user's known words for a language
    async fn load_known_words(&self, user_id: &str, language: Language) -> Result<KnownWordSet>;

    /// Add confirmed words; returns how many were not known before
    async fn add_known_words(&self, user_id: &str, language: Language, words: &[String]) -> Result<usize>;
}

/// Known words kept as plain-text files, `known-words.<lang>.txt`, one word per line
///
/// The files are append-only. They are not split per user, so the user id
/// is ignored.
#[derive(Debug, Clone)]
pub struct KnownWordsFile {
    dir: PathBuf,
}

impl KnownWordsFile {
    /// Store rooted at `dir`; the directory is created on first write
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// File holding the words of one language
    pub fn path_for(&self, language: Language) -> PathBuf {
        self.dir.join(format!("known-words.{}.txt", language.code()))
    }

    fn read(&self, language: Language) -> Result<KnownWordSet> {
        let path = self.path_for(language);
        if !FileManager::file_exists(&path) {
            return Ok(KnownWordSet::new(language));
        }

        let content = FileManager::read_to_string(&path)?;
        Ok(KnownWordSet::from_words(language, content.lines()))
    }
}

#[async_trait]
impl KnownWordStore for KnownWordsFile {
    async fn load_known_words(&self, _user_id: &str, language: Language) -> Result<KnownWordSet> {
        let set = self.read(language)?;
        debug!("Loaded {} known {} words from {:?}", set.len(), language.name(), self.path_for(language));
        Ok(set)
    }

    async fn add_known_words(&self, _user_id: &str, language: Language, words: &[String]) -> Result<usize> {
        let mut known = self.read(language)?;
        let fresh: Vec<String> = words
            .iter()
            .filter(|word| known.confirm(word))
            .map(|word| word.trim().to_lowercase())
            .collect();

        if fresh.is_empty() {
            return Ok(0);
        }

        FileManager::ensure_dir(&self.dir)?;
        let path = self.path_for(language);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open known-words file: {:?}", path))?;

        writeln!(file, "{}", fresh.join("\n"))
            .with_context(|| format!("Failed to write known-words file: {:?}", path))?;

        Ok(fresh.len())
    }
}

use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::HashSet;
use std::path::Path;

use crate::file_utils::FileManager;

/// Spell-check membership test used to tell real words from noise
///
/// A lookup never fails: anything the dictionary cannot vouch for is simply
/// not a word.
pub trait Dictionary: Send + Sync {
    /// Whether `word` is a known spelling
    fn contains(&self, word: &str) -> bool;
}

/// Dictionary backed by a word list, one entry per line
///
/// Lowercase entries match any capitalization of the word (`hello` matches
/// `Hello` and `HELLO`); entries with capitals only match exactly, so a
/// proper noun such as `Smith` does not vouch for `smith`.
#[derive(Debug, Clone, Default)]
pub struct WordListDictionary {
    exact: HashSet<String>,
    folded: HashSet<String>,
}

impl WordListDictionary {
    /// Build a dictionary from an iterator of entries
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::default();
        for word in words {
            dictionary.insert(word.as_ref());
        }
        dictionary
    }

    /// Load a word list file such as `/usr/share/dict/words`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)
            .with_context(|| format!("Failed to load dictionary: {:?}", path))?;

        let dictionary = Self::from_words(content.lines());
        info!("Loaded dictionary with {} entries from {:?}", dictionary.len(), path);
        Ok(dictionary)
    }

    /// Add one entry; blank lines and `#` comments are ignored
    pub fn insert(&mut self, entry: &str) {
        let entry = entry.trim();
        if entry.is_empty() || entry.starts_with('#') {
            return;
        }

        if entry.chars().any(|c| c.is_uppercase()) {
            self.exact.insert(entry.to_string());
        } else {
            self.folded.insert(entry.to_string());
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.exact.len() + self.folded.len()
    }

    /// Whether the dictionary has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Dictionary for WordListDictionary {
    fn contains(&self, word: &str) -> bool {
        self.exact.contains(word) || self.folded.contains(&word.to_lowercase())
    }
}

/// Dictionary that accepts every spelling
///
/// Used when dictionary filtering is switched off; only the length and
/// character checks then decide what a word is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveDictionary;

impl Dictionary for PermissiveDictionary {
    fn contains(&self, _word: &str) -> bool {
        true
    }
}

/// Load the configured dictionary
///
/// A missing word list is not fatal: an empty dictionary is returned, which
/// rejects every token, and a warning is logged.
pub fn load_dictionary(path: &Path, enabled: bool) -> Box<dyn Dictionary> {
    if !enabled {
        return Box::new(PermissiveDictionary);
    }

    match WordListDictionary::from_file(path) {
        Ok(dictionary) => Box::new(dictionary),
        Err(e) => {
            warn!("{:#}; no word will pass the dictionary check", e);
            Box::new(WordListDictionary::default())
        }
    }
}

use serde::{Deserialize, Serialize};

/// Default size of the "top words" summary
pub const DEFAULT_TOP_WORDS: usize = 20;

/// A case-folded word and how often it occurs in one document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordToken {
    /// Case-folded word
    pub word: String,
    /// Occurrences in the document
    pub frequency: usize,
}

impl WordToken {
    pub fn new(word: impl Into<String>, frequency: usize) -> Self {
        Self {
            word: word.into(),
            frequency,
        }
    }
}

/// Sort by descending frequency, keeping the existing order among equals
pub fn rank_words(words: &mut [WordToken]) {
    // sort_by is stable, so ties keep first-seen order
    words.sort_by(|a, b| b.frequency.cmp(&a.frequency));
}

/// Ordered (word, frequency) pairs, most frequent first, at most `limit` long
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedWordList {
    words: Vec<WordToken>,
}

impl RankedWordList {
    /// Rank `words` and keep the first `limit`
    pub fn top(mut words: Vec<WordToken>, limit: usize) -> Self {
        rank_words(&mut words);
        words.truncate(limit);
        Self { words }
    }

    /// Rank with the default limit
    pub fn top_default(words: Vec<WordToken>) -> Self {
        Self::top(words, DEFAULT_TOP_WORDS)
    }

    pub fn words(&self) -> &[WordToken] {
        &self.words
    }

    /// Just the words, in rank order
    pub fn word_strings(&self) -> Vec<String> {
        self.words.iter().map(|token| token.word.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn into_inner(self) -> Vec<WordToken> {
        self.words
    }
}

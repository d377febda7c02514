use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::app_config::Config;
use crate::errors::SubtitleError;
use crate::language_utils::{self, Language, DEFAULT_CJK_RATIO_THRESHOLD};
use crate::subtitle::{SubtitleDocument, SubtitleFormat};

use super::dictionary::{load_dictionary, Dictionary};
use super::known_words::KnownWordSet;
use super::ranking::{rank_words, RankedWordList, WordToken};
use super::tokenizer::tokenize;

// @const: A Latin-script word starts with a Latin letter
static LATIN_WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]").unwrap()
});

/// Default minimum word length, in characters
pub const DEFAULT_MIN_WORD_LENGTH: usize = 2;

/// Tunables of the word pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionOptions {
    /// Shortest accepted word, in characters
    pub min_word_length: usize,
    /// CJK share above which text is treated as Japanese
    pub cjk_ratio_threshold: f64,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            cjk_ratio_threshold: DEFAULT_CJK_RATIO_THRESHOLD,
        }
    }
}

/// Words extracted from one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Language the text was processed as
    pub language: Language,
    /// Unknown words, most frequent first, ties in first-seen order
    pub words: Vec<WordToken>,
    /// Known words that occurred in the text and were left out
    pub filtered_known: Vec<String>,
}

impl Extraction {
    /// The `limit` most frequent unknown words
    pub fn top(&self, limit: usize) -> RankedWordList {
        RankedWordList::top(self.words.clone(), limit)
    }
}

/// Dialogue text to ranked unknown words
///
/// Holds the dictionary and options; no state is kept between calls, so one
/// pipeline can serve any number of documents, from several threads.
pub struct WordPipeline {
    dictionary: Box<dyn Dictionary>,
    options: ExtractionOptions,
}

impl WordPipeline {
    pub fn new(dictionary: Box<dyn Dictionary>, options: ExtractionOptions) -> Self {
        Self { dictionary, options }
    }

    /// Pipeline with default options
    pub fn with_dictionary<D: Dictionary + 'static>(dictionary: D) -> Self {
        Self::new(Box::new(dictionary), ExtractionOptions::default())
    }

    /// Pipeline using the dictionary and limits from the configuration
    pub fn from_config(config: &Config) -> Self {
        let dictionary = load_dictionary(&config.dictionary.path, config.dictionary.enabled);
        Self::new(
            dictionary,
            ExtractionOptions {
                min_word_length: config.extraction.min_word_length,
                cjk_ratio_threshold: config.extraction.cjk_ratio_threshold,
            },
        )
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    /// Classify text with the configured threshold
    pub fn detect_language(&self, text: &str) -> Language {
        language_utils::detect_language_with_threshold(text, self.options.cjk_ratio_threshold)
    }

    /// Whether a token counts as a word: long enough, Latin letter first, in the dictionary
    pub fn is_word(&self, token: &str) -> bool {
        token.chars().count() >= self.options.min_word_length
            && LATIN_WORD_REGEX.is_match(token)
            && self.dictionary.contains(token)
    }

    /// Case-folded word frequencies, most frequent first
    ///
    /// Tokens that are not words are dropped without any report; that is
    /// the filter doing its job, not an error. Japanese text has no
    /// tokenizer yet and yields nothing.
    pub fn count_words(&self, text: &str, language: Language) -> Vec<WordToken> {
        if language.is_cjk() {
            warn!("No word tokenizer for {} text; returning an empty word list", language.name());
            return Vec::new();
        }

        let mut counts: Vec<WordToken> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for token in tokenize(text) {
            if !self.is_word(&token) {
                continue;
            }

            let folded = token.to_lowercase();
            match index.get(&folded) {
                Some(&at) => counts[at].frequency += 1,
                None => {
                    index.insert(folded.clone(), counts.len());
                    counts.push(WordToken::new(folded, 1));
                }
            }
        }

        rank_words(&mut counts);
        counts
    }

    /// Run the word stage on text that is already extracted
    ///
    /// Known words only apply when the set belongs to the text's language.
    pub fn extract_from_text(
        &self,
        text: &str,
        language: Option<Language>,
        known: &KnownWordSet,
    ) -> Extraction {
        let language = language.unwrap_or_else(|| self.detect_language(text));
        let counted = self.count_words(text, language);

        let (words, filtered_known) = if known.language() == language {
            split_known(counted, known)
        } else {
            warn!(
                "Known-word set is for {}, text is {}; not filtering",
                known.language().name(),
                language.name()
            );
            (counted, Vec::new())
        };

        debug!(
            "Extracted {} unknown {} words ({} known words filtered)",
            words.len(),
            language.name(),
            filtered_known.len()
        );

        Extraction {
            language,
            words,
            filtered_known,
        }
    }

    /// Full pipeline: decode, parse, pick the dialogue, classify, count and filter
    pub fn extract_words(
        &self,
        content: &[u8],
        format: SubtitleFormat,
        style: Option<&str>,
        language: Option<Language>,
        known: &KnownWordSet,
    ) -> Result<Extraction, SubtitleError> {
        let document = SubtitleDocument::from_bytes(format, content)?;
        let text = document.dialogue_text(style)?;
        Ok(self.extract_from_text(&text, language, known))
    }
}

/// Drop every word present in `known`, keeping the order of the rest
pub fn filter_known(words: &[WordToken], known: &KnownWordSet) -> Vec<WordToken> {
    words
        .iter()
        .filter(|token| !known.contains(&token.word))
        .cloned()
        .collect()
}

fn split_known(words: Vec<WordToken>, known: &KnownWordSet) -> (Vec<WordToken>, Vec<String>) {
    let mut unknown = Vec::with_capacity(words.len());
    let mut filtered = Vec::new();
    for token in words {
        if known.contains(&token.word) {
            filtered.push(token.word);
        } else {
            unknown.push(token);
        }
    }
    (unknown, filtered)
}

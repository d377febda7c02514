/*!
 * Vocabulary extraction from dialogue text.
 *
 * This module provides:
 * - Word tokenization with contraction and sentence-period handling
 * - Dictionary-based word validation
 * - Known-word sets and their persistent stores
 * - Frequency ranking and the "top words" summary
 */

pub mod dictionary;
pub mod known_words;
pub mod pipeline;
pub mod ranking;
pub mod tokenizer;

// Re-export main types
pub use dictionary::{Dictionary, PermissiveDictionary, WordListDictionary};
pub use known_words::{KnownWordSet, KnownWordStore, KnownWordsFile};
pub use pipeline::{filter_known, Extraction, ExtractionOptions, WordPipeline};
pub use ranking::{RankedWordList, WordToken, DEFAULT_TOP_WORDS};

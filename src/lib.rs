/*!
 * # sscout - subtitle vocabulary scout
 *
 * A Rust library that turns subtitle files into a ranked list of the words
 * a learner does not know yet.
 *
 * ## Features
 *
 * - Format detection for `.ass` and `.srt` files
 * - Style-aware dialogue extraction from Advanced SubStation Alpha files
 * - CJK/Latin language classification
 * - Dictionary-backed tokenization with a known-word filter
 * - Frequency ranking and a "top words" summary
 * - Upload/review/finalize sessions persisted in SQLite
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle`: Format detection, decoding and parsing
 * - `vocabulary`: Tokenizer, dictionary, known words and ranking
 * - `language_utils`: Language classification and ISO codes
 * - `database`: SQLite persistence
 * - `session`: The upload, review and finalize workflow
 * - `file_utils`: File system operations
 * - `app_controller`: Command line controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod session;
pub mod subtitle;
pub mod vocabulary;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, SessionError, SubtitleError};
pub use language_utils::{detect_language, Language};
pub use subtitle::{detect_format_and_styles, FormatInfo, SubtitleFormat};
pub use vocabulary::{filter_known, Extraction, KnownWordSet, RankedWordList, WordPipeline, WordToken};

/// Extract ranked unknown words from raw subtitle bytes
///
/// Convenience wrapper over [`WordPipeline::extract_words`].
pub fn extract_words(
    pipeline: &WordPipeline,
    content: &[u8],
    format: SubtitleFormat,
    style: Option<&str>,
    language: Option<Language>,
    known: &KnownWordSet,
) -> Result<Extraction, SubtitleError> {
    pipeline.extract_words(content, format, style, language, known)
}

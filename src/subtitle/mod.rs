/*!
 * Subtitle document handling.
 *
 * This module turns uploaded subtitle bytes into dialogue text:
 * - `decode`: byte decoding with a single UTF-16 fallback
 * - `ass`: Advanced SubStation Alpha documents (styles + events)
 * - `srt`: SubRip documents (plain text, no styles)
 *
 * The format is chosen from the filename suffix only.
 */

pub mod ass;
pub mod decode;
pub mod srt;

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::errors::SubtitleError;

pub use ass::{AssDocument, AssEvent, DialogueSelection};
pub use decode::decode_bytes;
pub use srt::PlainDocument;

/// Label used in errors when a document has no named style to report
pub const IMPLICIT_STYLE: &str = "*";

/// Supported subtitle formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    /// Advanced SubStation Alpha (`.ass`), carries styles
    Ass,
    /// SubRip (`.srt`), plain text
    Srt,
}

impl SubtitleFormat {
    /// All formats, in detection order
    pub const ALL: [SubtitleFormat; 2] = [SubtitleFormat::Ass, SubtitleFormat::Srt];

    /// Lowercase suffix including the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Ass => ".ass",
            Self::Srt => ".srt",
        }
    }

    /// Whether documents of this format declare styles
    pub fn supports_styles(&self) -> bool {
        matches!(self, Self::Ass)
    }

    /// Pick a format from a filename suffix, case-insensitively
    pub fn from_filename(filename: &str) -> Result<Self, SubtitleError> {
        let extension = Path::new(filename)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let lowered = extension.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == lowered)
            .ok_or(SubtitleError::UnsupportedFormat { extension })
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ass => write!(f, "ass"),
            Self::Srt => write!(f, "srt"),
        }
    }
}

/// Result of inspecting a freshly uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Detected format
    pub format: SubtitleFormat,
    /// Declared styles, empty for formats without styles
    pub styles: Vec<String>,
}

/// A parsed subtitle document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtitleDocument {
    /// Document with a style table and styled events
    Structured(AssDocument),
    /// Document without style metadata
    Plain(PlainDocument),
}

impl SubtitleDocument {
    /// Parse decoded text as the given format
    pub fn parse(format: SubtitleFormat, text: &str) -> Self {
        match format {
            SubtitleFormat::Ass => Self::Structured(AssDocument::parse(text)),
            SubtitleFormat::Srt => Self::Plain(PlainDocument::parse(text)),
        }
    }

    /// Decode bytes and parse them as the given format
    pub fn from_bytes(format: SubtitleFormat, content: &[u8]) -> Result<Self, SubtitleError> {
        let text = decode_bytes(content)?;
        Ok(Self::parse(format, &text))
    }

    /// Declared style names, in document order
    pub fn styles(&self) -> Vec<String> {
        match self {
            Self::Structured(doc) => doc.styles().to_vec(),
            Self::Plain(_) => Vec::new(),
        }
    }

    /// Dialogue text for the chosen style
    ///
    /// A styled document without a style choice fails with `StyleRequired`;
    /// the style is never picked on the caller's behalf.
    pub fn dialogue_text(&self, style: Option<&str>) -> Result<String, SubtitleError> {
        match self {
            Self::Structured(doc) => match doc.extract_dialogue(style)? {
                DialogueSelection::Text(text) => Ok(text),
                DialogueSelection::ChooseStyle(available) => {
                    Err(SubtitleError::StyleRequired { available })
                }
            },
            Self::Plain(doc) => doc.text(),
        }
    }
}

/// Detect the format from the filename and list the document's styles
pub fn detect_format_and_styles(filename: &str, content: &[u8]) -> Result<FormatInfo, SubtitleError> {
    let format = SubtitleFormat::from_filename(filename)?;

    let styles = if format.supports_styles() {
        SubtitleDocument::from_bytes(format, content)?.styles()
    } else {
        // Still validate that the bytes are readable text
        decode_bytes(content)?;
        Vec::new()
    };

    debug!("Detected {} subtitle '{}' with {} style(s)", format, filename, styles.len());

    Ok(FormatInfo { format, styles })
}

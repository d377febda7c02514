use crate::errors::SubtitleError;
use super::IMPLICIT_STYLE;

// @module: SubRip handling

/// A `.srt` document
///
/// The whole file is the dialogue text. Cue numbers and timestamps are left
/// in place; the word filter drops them later since they are not words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainDocument {
    text: String,
}

impl PlainDocument {
    /// Wrap decoded `.srt` content, normalizing CRLF line endings
    pub fn parse(content: &str) -> Self {
        Self {
            text: content.replace("\r\n", "\n"),
        }
    }

    /// Full file content, or `EmptyDialogue` when it holds only whitespace
    pub fn text(&self) -> Result<String, SubtitleError> {
        if self.text.trim().is_empty() {
            return Err(SubtitleError::EmptyDialogue {
                style: IMPLICIT_STYLE.to_string(),
            });
        }
        Ok(self.text.clone())
    }
}

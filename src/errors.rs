/*!
 * Error types for the sscout application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while reading a subtitle document
///
/// Every variant is recoverable from the caller's point of view: the
/// request can be resubmitted with a different file, encoding or style.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// The filename suffix does not map to a known parser
    #[error("Unsupported subtitle format: '{extension}'")]
    UnsupportedFormat {
        /// Offending suffix, as found in the filename
        extension: String,
    },

    /// The requested style is not declared by the document
    #[error("Style '{style}' not found. Available styles: {available:?}")]
    StyleNotFound {
        /// Style that was asked for
        style: String,
        /// Styles declared by the document, in document order
        available: Vec<String>,
    },

    /// The document declares styles but none was chosen
    #[error("No style selected. Choose one of: {available:?}")]
    StyleRequired {
        /// Styles declared by the document, in document order
        available: Vec<String>,
    },

    /// The selected style has no dialogue events
    #[error("No dialogue found for style '{style}'")]
    EmptyDialogue {
        /// Style that yielded nothing
        style: String,
    },

    /// The bytes could not be decoded as text
    #[error("Failed to decode subtitle content: {0}")]
    DecodeError(String),
}

/// Errors raised by the session workflow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No session with the given id
    #[error("Session not found: {0}")]
    NotFound(String),

    /// The session is not in the state the operation requires
    #[error("Session {id} is '{actual}', expected '{expected}'")]
    InvalidStatus {
        /// Session id
        id: String,
        /// Status the operation needs
        expected: String,
        /// Status the session is in
        actual: String,
    },

    /// Upload exceeds the configured size limit
    #[error("File too large: {size} bytes (maximum {limit} bytes)")]
    FileTooLarge {
        /// Upload size in bytes
        size: usize,
        /// Configured limit in bytes
        limit: usize,
    },

    /// Upload suffix is not in the configured allow-list
    #[error("Invalid file type '{extension}'. Allowed: {allowed:?}")]
    ExtensionNotAllowed {
        /// Offending suffix
        extension: String,
        /// Allowed suffixes
        allowed: Vec<String>,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from the session workflow
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        // Keep typed errors typed when they travelled through anyhow
        if let Some(subtitle) = error.downcast_ref::<SubtitleError>() {
            return Self::Subtitle(subtitle.clone());
        }
        if let Some(session) = error.downcast_ref::<SessionError>() {
            return Self::Session(session.clone());
        }
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

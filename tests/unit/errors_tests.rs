/*!
 * Tests for error types and conversions
 */

use sscout::errors::{AppError, SessionError, SubtitleError};

#[test]
fn test_subtitleError_display_shouldDescribeProblem() {
    let unsupported = SubtitleError::UnsupportedFormat {
        extension: ".vtt".to_string(),
    };
    assert_eq!(unsupported.to_string(), "Unsupported subtitle format: '.vtt'");

    let empty = SubtitleError::EmptyDialogue {
        style: "Default".to_string(),
    };
    assert_eq!(empty.to_string(), "No dialogue found for style 'Default'");

    let decode = SubtitleError::DecodeError("bad byte".to_string());
    assert!(decode.to_string().contains("bad byte"));
}

#[test]
fn test_sessionError_display_shouldIncludeDetails() {
    let err = SessionError::InvalidStatus {
        id: "abc".to_string(),
        expected: "processed".to_string(),
        actual: "uploaded".to_string(),
    };
    assert_eq!(err.to_string(), "Session abc is 'uploaded', expected 'processed'");

    let too_large = SessionError::FileTooLarge { size: 20, limit: 10 };
    assert!(too_large.to_string().contains("20 bytes"));
}

#[test]
fn test_appError_from_shouldWrapTypedErrors() {
    let app: AppError = SubtitleError::StyleNotFound {
        style: "Foo".to_string(),
        available: vec!["Default".to_string()],
    }
    .into();
    assert!(matches!(app, AppError::Subtitle(SubtitleError::StyleNotFound { .. })));

    let app: AppError = SessionError::NotFound("x".to_string()).into();
    assert!(matches!(app, AppError::Session(SessionError::NotFound(_))));
}

#[test]
fn test_appError_fromAnyhow_shouldRecoverSessionError() {
    let err = anyhow::Error::from(SessionError::NotFound("gone".to_string()));

    let app = AppError::from(err);

    assert!(matches!(app, AppError::Session(SessionError::NotFound(ref id)) if id == "gone"));
}

/*!
 * Session workflow tests: upload, process, strike and finalize over SQLite
 */

use anyhow::Result;

use sscout::database::{Repository, SessionStatus};
use sscout::errors::{SessionError, SubtitleError};
use sscout::language_utils::Language;
use sscout::session::SessionManager;
use sscout::vocabulary::KnownWordStore;

use crate::common;

fn manager_in(dir: &std::path::Path) -> Result<SessionManager> {
    let config = common::test_config(dir);
    let repo = Repository::open(&config.storage.database_path)?;
    Ok(SessionManager::new(repo, config, common::test_pipeline()))
}

#[tokio::test]
async fn test_workflow_withStyledFile_shouldRunToFinalized() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let manager = manager_in(dir.path())?;
    let ass = common::build_ass(
        &["Default", "Signs"],
        &[
            ("Default", "Hello my friend"),
            ("Signs", "EXIT"),
            ("Default", "Hello again, my friend"),
            ("Default", "Goodbye world"),
        ],
    );

    let upload = manager.upload("Show.ass", ass.as_bytes()).await?;
    assert_eq!(upload.styles, vec!["Default".to_string(), "Signs".to_string()]);
    assert_eq!(upload.status, SessionStatus::Uploaded);

    manager.process(&upload.id, Some("Default")).await?;

    let words = manager.words(&upload.id).await?;
    assert_eq!(words[0].word, "hello");
    assert_eq!(words[0].frequency, 2);
    assert!(words.iter().all(|w| !w.is_removed));

    manager
        .strike(&upload.id, &["my".to_string(), "friend".to_string()])
        .await?;

    let summary = manager.finalize(&upload.id).await?;
    assert_eq!(summary.learned_count, 2);
    assert_eq!(summary.total_count, 6);
    assert_eq!(summary.top_words, vec!["hello", "again", "goodbye", "world"]);

    let info = manager.get_session(&upload.id).await?.expect("session exists");
    assert_eq!(info.status, SessionStatus::Finalized);
    Ok(())
}

#[tokio::test]
async fn test_workflow_learnedWords_shouldBeSkippedInNextSession() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let manager = manager_in(dir.path())?;
    let srt = common::build_srt(&["Hello world", "Goodbye world"]);

    let first = manager.upload("one.srt", srt.as_bytes()).await?;
    manager.process(&first.id, None).await?;
    manager.strike(&first.id, &["world".to_string()]).await?;
    manager.finalize(&first.id).await?;

    let second = manager.upload("two.srt", srt.as_bytes()).await?;
    let extraction = manager.process(&second.id, None).await?;

    assert_eq!(extraction.filtered_known, vec!["world".to_string()]);
    let words: Vec<String> = manager
        .words(&second.id)
        .await?
        .into_iter()
        .map(|w| w.word)
        .collect();
    assert_eq!(words, vec!["hello", "goodbye"]);
    Ok(())
}

#[tokio::test]
async fn test_finalize_twice_shouldReportInvalidStatus() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let manager = manager_in(dir.path())?;
    let upload = manager
        .upload("a.srt", common::build_srt(&["hello"]).as_bytes())
        .await?;
    manager.process(&upload.id, None).await?;
    manager.finalize(&upload.id).await?;

    let err = manager.finalize(&upload.id).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SessionError>(),
        Some(SessionError::InvalidStatus { actual, .. }) if actual == "finalized"
    ));
    Ok(())
}

#[tokio::test]
async fn test_process_withoutStyleOnStyledFile_shouldRequireStyle() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let manager = manager_in(dir.path())?;
    let upload = manager
        .upload("show.ass", common::signs_only_ass().as_bytes())
        .await?;

    let err = manager.process(&upload.id, None).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SubtitleError>(),
        Some(SubtitleError::StyleRequired { .. })
    ));

    let err = manager.process(&upload.id, Some("Default")).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SubtitleError>(),
        Some(SubtitleError::EmptyDialogue { .. })
    ));

    // Still retryable with the right style
    manager.process(&upload.id, Some("Signs")).await?;
    Ok(())
}

#[tokio::test]
async fn test_upload_withUnsupportedAllowedExtension_shouldFailFormatDetection() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let mut config = common::test_config(dir.path());
    config.storage.allowed_extensions.push(".vtt".to_string());
    let manager = SessionManager::new_in_memory(config, common::test_pipeline())?;

    let err = manager.upload("talk.vtt", b"WEBVTT").await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SubtitleError>(),
        Some(SubtitleError::UnsupportedFormat { extension }) if extension == ".vtt"
    ));
    assert!(manager.list_sessions(None).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_sessions_shouldPersistAcrossManagers() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let id = {
        let manager = manager_in(dir.path())?;
        manager
            .upload("a.srt", common::build_srt(&["hello"]).as_bytes())
            .await?
            .id
    };

    let manager = manager_in(dir.path())?;
    let sessions = manager.list_sessions(Some(SessionStatus::Uploaded)).await?;

    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, id);
    assert_eq!(sessions[0].language, "en");
    Ok(())
}

#[tokio::test]
async fn test_repositoryKnownWords_shouldBeScopedByLanguage() -> Result<()> {
    let repo = Repository::new_in_memory()?;

    repo.add_known_words("default", Language::Japanese, &["kanji".to_string()])
        .await?;

    let english = repo.load_known_words("default", Language::English).await?;
    let japanese = repo.load_known_words("default", Language::Japanese).await?;

    assert!(english.is_empty());
    assert!(japanese.contains("kanji"));
    Ok(())
}

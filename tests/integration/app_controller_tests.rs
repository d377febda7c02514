/*!
 * Tests for the command line controller
 */

use anyhow::Result;

use sscout::app_controller::{Controller, ScanOptions};
use sscout::language_utils::Language;
use sscout::vocabulary::WordToken;

use crate::common;

fn controller(dir: &std::path::Path) -> Controller {
    Controller::with_pipeline(common::test_config(dir), common::test_pipeline())
}

#[tokio::test]
async fn test_scan_withTopOption_shouldTruncate() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let file = common::create_test_file(
        dir.path(),
        "ep.srt",
        &common::build_srt(&["hello hello hello world world friend"]),
    )?;

    let options = ScanOptions {
        top: Some(2),
        ..ScanOptions::default()
    };
    let reports = controller(dir.path()).scan(&file, &options).await?;

    assert_eq!(reports.len(), 1);
    assert_eq!(
        reports[0].top_words,
        vec![WordToken::new("hello", 3), WordToken::new("world", 2)]
    );
    assert_eq!(reports[0].unknown_count, 3);
    Ok(())
}

#[tokio::test]
async fn test_scan_withStyledFileAndNoStyle_shouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let file = common::create_test_file(dir.path(), "show.ass", &common::signs_only_ass())?;

    let result = controller(dir.path()).scan(&file, &ScanOptions::default()).await;

    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn test_learn_thenScan_shouldFilterLearnedWords() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let file = common::create_test_file(dir.path(), "show.ass", &common::signs_only_ass())?;
    let controller = controller(dir.path());

    let added = controller
        .learn(Language::English, &["Exit".to_string(), "exit".to_string()])
        .await?;
    assert_eq!(added, 1);

    let options = ScanOptions {
        style: Some("Signs".to_string()),
        ..ScanOptions::default()
    };
    let report = controller.scan_file(&file, &options).await?;

    assert_eq!(report.known_count, 1);
    assert!(report.top_words.iter().all(|t| t.word != "exit"));
    Ok(())
}

#[tokio::test]
async fn test_sessionManager_shouldUseConfiguredDatabase() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let controller = controller(dir.path());

    let manager = controller.session_manager()?;
    manager
        .upload("a.srt", common::build_srt(&["hello"]).as_bytes())
        .await?;

    assert!(dir.path().join("sscout.db").exists());
    assert_eq!(manager.repository().stats()?.session_count, 1);
    Ok(())
}

/*!
 * Tests for file and directory utilities
 */

use anyhow::Result;
use std::fs;
use std::path::Path;

use sscout::file_utils::FileManager;

use crate::common;

#[test]
fn test_uploadPath_shouldPrefixSessionAndDropDirectories() {
    let path = FileManager::upload_path("/data/uploads", "abc", "../../etc/show.ass");
    assert_eq!(path, Path::new("/data/uploads/abc_show.ass"));

    let plain = FileManager::upload_path("/data/uploads", "abc", "episode.srt");
    assert_eq!(plain, Path::new("/data/uploads/abc_episode.srt"));
}

#[test]
fn test_findSubtitleFiles_shouldReturnSortedSubtitlesOnly() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let nested = dir.path().join("season1");
    fs::create_dir_all(&nested)?;

    common::create_test_file(&nested, "b.SRT", "x")?;
    common::create_test_file(dir.path(), "a.ass", "x")?;
    common::create_test_file(dir.path(), "notes.txt", "x")?;
    common::create_test_file(&nested, "video.mkv", "x")?;

    let files = FileManager::find_subtitle_files(dir.path())?;

    assert_eq!(files, vec![dir.path().join("a.ass"), nested.join("b.SRT")]);
    Ok(())
}

#[test]
fn test_writeBytes_shouldCreateParentsAndRoundTrip() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("a").join("b").join("file.bin");

    FileManager::write_bytes(&path, &[1, 2, 3])?;

    assert!(FileManager::file_exists(&path));
    assert!(FileManager::dir_exists(dir.path().join("a")));
    assert_eq!(FileManager::read_bytes(&path)?, vec![1, 2, 3]);
    Ok(())
}

#[test]
fn test_readToString_withMissingFile_shouldFail() {
    assert!(FileManager::read_to_string("/nonexistent/sscout/file.srt").is_err());
    assert!(!FileManager::file_exists("/nonexistent/sscout/file.srt"));
}

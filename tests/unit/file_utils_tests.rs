/*!
 * Tests for file utility functions
 */

use std::path::Path;
use anyhow::Result;
use subprose::file_utils::{FileManager, SubtitleFormat};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

#[test]
fn test_write_to_file_withMissingParent_shouldCreateDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("out.txt");

    FileManager::write_to_file(&nested, "content")?;

    assert_eq!(FileManager::read_to_string(&nested)?, "content");
    Ok(())
}

#[test]
fn test_read_to_string_withInvalidUtf8_shouldReplaceBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("broken.vtt");
    std::fs::write(&path, b"caf\xe9 ok")?;

    let content = FileManager::read_to_string(&path)?;
    assert!(content.starts_with("caf"));
    assert!(content.ends_with(" ok"));
    Ok(())
}

#[test]
fn test_find_files_with_prefix_withMixedFiles_shouldReturnOnlyMatchesSorted() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "abc.tr.vtt", "")?;
    common::create_test_file(temp_dir.path(), "abc.en.vtt", "")?;
    common::create_test_file(temp_dir.path(), "xyz.en.vtt", "")?;
    std::fs::create_dir(temp_dir.path().join("abc.dir"))?;

    let files = FileManager::find_files_with_prefix(temp_dir.path(), "abc")?;
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["abc.en.vtt", "abc.tr.vtt"]);
    Ok(())
}

#[test]
fn test_remove_files_with_prefix_withMatches_shouldRemoveOnlyThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "req.tr.vtt", "")?;
    common::create_test_file(temp_dir.path(), "req.en.vtt", "")?;
    let keep = common::create_test_file(temp_dir.path(), "other.en.vtt", "")?;

    let removed = FileManager::remove_files_with_prefix(temp_dir.path(), "req")?;

    assert_eq!(removed, 2);
    assert!(keep.exists());
    assert!(FileManager::find_files_with_prefix(temp_dir.path(), "req")?.is_empty());
    Ok(())
}

#[test]
fn test_transcript_output_path_withReservedChars_shouldSanitize() {
    let path = FileManager::transcript_output_path("/tmp/out", "AC/DC: Live? <2024>", "altyazi");
    assert_eq!(path, Path::new("/tmp/out/AC_DC_ Live_ _2024_.txt"));
}

#[test]
fn test_transcript_output_path_withBlankTitle_shouldUseFallback() {
    let path = FileManager::transcript_output_path("/tmp/out", "  ...  ", "altyazi");
    assert_eq!(path, Path::new("/tmp/out/altyazi.txt"));
}

#[test]
fn test_detect_subtitle_format_withKnownDialects_shouldDetect() {
    assert_eq!(FileManager::detect_subtitle_format(common::PROGRESSIVE_VTT), SubtitleFormat::WebVtt);
    assert_eq!(FileManager::detect_subtitle_format("\u{feff}WEBVTT\n\n"), SubtitleFormat::WebVtt);
    assert_eq!(
        FileManager::detect_subtitle_format("1\n00:00:01,000 --> 00:00:04,000\nHi\n"),
        SubtitleFormat::Srt
    );
    assert_eq!(FileManager::detect_subtitle_format("just some text"), SubtitleFormat::Unknown);
}

/*!
 * Tests for file discovery and subtitle output writing
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use whisub::file_utils::{FileManager, UTF8_BOM};

use crate::common;

/// Test non-recursive case-insensitive transcript discovery
#[test]
fn test_find_transcript_files_withMixedDirectory_shouldMatchJsonOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();

    common::create_test_file(dir, "a.json", "{}")?;
    common::create_test_file(dir, "b.JSON", "{}")?;
    common::create_test_file(dir, "notes.txt", "")?;
    common::create_test_file(dir, "noext", "")?;

    // Files in subdirectories must not be picked up
    fs::create_dir(dir.join("nested"))?;
    common::create_test_file(&dir.join("nested"), "c.json", "{}")?;

    let files = FileManager::find_transcript_files(dir)?;
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(names, vec!["a.json", "b.JSON"]);
    Ok(())
}

/// Test that an empty directory yields an empty list
#[test]
fn test_find_transcript_files_withEmptyDirectory_shouldReturnEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let files = FileManager::find_transcript_files(temp_dir.path())?;
    assert!(files.is_empty());
    Ok(())
}

/// Test output path derivation by extension swap
#[test]
fn test_subtitle_output_path_withJsonInput_shouldSwapExtension() {
    let output = FileManager::subtitle_output_path(PathBuf::from("/tmp/talk.json"));
    assert_eq!(output, PathBuf::from("/tmp/talk.srt"));
}

/// Dotted stems keep everything before the final extension
#[test]
fn test_subtitle_output_path_withDottedStem_shouldOnlySwapFinalExtension() {
    let output = FileManager::subtitle_output_path(PathBuf::from("episode.01.json"));
    assert_eq!(output, PathBuf::from("episode.01.srt"));
}

/// Written subtitle files start with the UTF-8 BOM
#[test]
fn test_write_subtitle_file_withContent_shouldPrefixBom() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out.srt");

    FileManager::write_subtitle_file(&path, "1\n00:00:01,000 --> 00:00:02,000\nhi\n\n")?;

    let bytes = fs::read(&path)?;
    assert_eq!(&bytes[..3], UTF8_BOM);
    assert!(bytes[3..].starts_with(b"1\n00:00:01,000"));
    Ok(())
}

/// Empty content still produces a BOM-only file
#[test]
fn test_write_subtitle_file_withEmptyContent_shouldWriteBomOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("empty.srt");

    FileManager::write_subtitle_file(&path, "")?;

    let bytes = fs::read(&path)?;
    assert_eq!(bytes, UTF8_BOM);
    Ok(())
}

/// Test byte reads surface io errors for missing files
#[test]
fn test_read_bytes_withMissingFile_shouldFail() {
    assert!(FileManager::read_bytes("/nonexistent/whisub-test.json").is_err());
}

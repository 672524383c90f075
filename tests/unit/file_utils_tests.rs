/*!
 * Tests for file utility functions and output naming
 */

use std::path::Path;
use anyhow::Result;
use graded_reader::file_utils::{FileManager, OutputPaths};
use crate::common;

/// Test that every artifact name derives from the input path
#[test]
fn test_output_paths_withTxtInput_shouldStripExtension() {
    let paths = OutputPaths::for_input("/tmp/stories/story.txt");

    assert_eq!(paths.typeset(), Path::new("/tmp/stories/story.tex"));
    assert_eq!(paths.source_text(1), Path::new("/tmp/stories/story_chinese_1.txt"));
    assert_eq!(paths.repeat_text(2), Path::new("/tmp/stories/story_chinese_english_repeat_2.txt"));
    assert_eq!(paths.source_audio(3), Path::new("/tmp/stories/story_chinese_3.mp3"));
    assert_eq!(paths.repeat_audio(3), Path::new("/tmp/stories/story_chinese_english_repeat_3.mp3"));
    assert_eq!(paths.flashcards(), Path::new("/tmp/stories/story_anki.csv"));
}

/// Test that only the last extension is removed
#[test]
fn test_output_paths_withDottedName_shouldKeepInnerDots() {
    let paths = OutputPaths::for_input("lesson.01.txt");
    assert_eq!(paths.typeset(), Path::new("lesson.01.tex"));
}

/// Test an input without an extension
#[test]
fn test_output_paths_withoutExtension_shouldUseWholeName() {
    let paths = OutputPaths::for_input("story");
    assert_eq!(paths.flashcards(), Path::new("story_anki.csv"));
}

/// Test that write_to_file creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("out.txt");

    FileManager::write_to_file(&path, "内容")?;

    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_to_string(&path)?, "内容");
    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test reading a missing file reports the path
#[test]
fn test_read_to_string_withMissingFile_shouldReturnError() {
    let error = FileManager::read_to_string("non_existent_file.tmp").unwrap_err();
    assert!(format!("{:#}", error).contains("non_existent_file.tmp"));
}

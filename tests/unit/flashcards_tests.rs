/*!
 * Tests for the Anki flashcard export
 */

use anyhow::Result;
use regex::Regex;
use graded_reader::emitters::{FlashcardEmitter, FlashcardRow};
use graded_reader::script_parser::{Script, SentencePair};
use crate::common;

fn row(zh_vocab: &str, zh_sentence: &str, en_vocab: &str, en_sentence: &str) -> FlashcardRow {
    FlashcardRow {
        zh_vocab: zh_vocab.to_string(),
        zh_sentence: zh_sentence.to_string(),
        en_vocab: en_vocab.to_string(),
        en_sentence: en_sentence.to_string(),
    }
}

/// Test the row of the reference sentence
#[test]
fn test_rows_withReferenceSentence_shouldCleanSentence() {
    let rows = FlashcardEmitter::rows(&[SentencePair::new("你好(吗)[很][very]", "Hello")]);

    assert_eq!(rows, vec![row("很", "你好吗很", "very", "Hello")]);
}

/// Test that repeated terms produce independent rows
#[test]
fn test_rows_withRepeatedTerm_shouldNotDeduplicate() {
    let rows = FlashcardEmitter::rows(&[
        SentencePair::new("他[很][very]高。", "He is very tall."),
        SentencePair::new("她也[很][very]高。", "She is very tall too."),
    ]);

    assert_eq!(rows, vec![
        row("很", "他很高。", "very", "He is very tall."),
        row("很", "她也很高。", "very", "She is very tall too."),
    ]);
}

/// Test that sentences without glosses contribute nothing
#[test]
fn test_rows_withoutGlosses_shouldBeEmpty() {
    let rows = FlashcardEmitter::rows(&[SentencePair::new(r"\p(小明)你好。", "Hello, Xiaoming.")]);
    assert!(rows.is_empty());
}

/// Test row count equals the number of gloss spans
#[test]
fn test_rows_withSampleScript_shouldMatchGlossCount() {
    let sentences = Script::parse_str(common::SAMPLE_SCRIPT);
    let rows = FlashcardEmitter::rows(&sentences);

    let gloss_span = Regex::new(r"\[[^\]]*\]\[[^\]]*\]").unwrap();
    let gloss_spans: usize = sentences
        .iter()
        .map(|pair| gloss_span.find_iter(&pair.source_text).count())
        .sum();
    assert_eq!(gloss_spans, 5);
    assert_eq!(rows.len(), 5);

    let terms: Vec<&str> = rows.iter().map(|r| r.zh_vocab.as_str()).collect();
    assert_eq!(terms, vec!["很", "很", "喜欢", "喜欢", "朋友"]);
    assert_eq!(rows[2].zh_sentence, "Chapter Two小红也很高兴，她喜欢唱歌。");
    assert_eq!(rows[3].en_sentence, "We like friends.");
}

/// Test CSV output with header and quoting
#[test]
fn test_write_csv_withRows_shouldWriteHeaderAndQuoteFields() -> Result<()> {
    let rows = vec![row("喜欢", "她喜欢唱歌。", "to like", "She likes singing, a lot.")];
    let mut buffer = Vec::new();
    FlashcardEmitter::write_csv(&rows, &mut buffer)?;

    let output = String::from_utf8(buffer)?;
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines, vec![
        "zh_vocab,zh_sentence,en_vocab,en_sentence",
        "喜欢,她喜欢唱歌。,to like,\"She likes singing, a lot.\"",
    ]);
    Ok(())
}

/// Test that an export without rows still has its header
#[test]
fn test_write_csv_withNoRows_shouldWriteHeaderOnly() -> Result<()> {
    let mut buffer = Vec::new();
    FlashcardEmitter::write_csv(&[], &mut buffer)?;

    assert_eq!(String::from_utf8(buffer)?.trim_end(), "zh_vocab,zh_sentence,en_vocab,en_sentence");
    Ok(())
}

/// Test writing the CSV file to disk
#[test]
fn test_write_file_withSampleRows_shouldBeReadable() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("story_anki.csv");
    let rows = FlashcardEmitter::rows(&Script::parse_str(common::SAMPLE_SCRIPT));

    FlashcardEmitter::write_file(&rows, &path)?;

    let content = std::fs::read_to_string(&path)?;
    assert_eq!(content.lines().count(), rows.len() + 1);
    assert!(content.contains("朋友,我们喜欢朋友。,friend,We like friends."));
    Ok(())
}

/// Test that missing parent directories are created
#[test]
fn test_write_file_withMissingParentDir_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("decks").join("story_anki.csv");

    FlashcardEmitter::write_file(&[], &path)?;

    assert_eq!(std::fs::read_to_string(&path)?.trim_end(), "zh_vocab,zh_sentence,en_vocab,en_sentence");
    Ok(())
}

/// Test that a path blocked by a file reports the failing directory
#[test]
fn test_write_file_withParentIsFile_shouldReturnContextError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory")?;

    let error = FlashcardEmitter::write_file(&[], blocker.join("story_anki.csv")).unwrap_err();

    assert!(format!("{:#}", error).contains("Failed to"));
    Ok(())
}

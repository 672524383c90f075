/*!
 * End-to-end conversion tests
 */

use std::fs;
use anyhow::Result;
use graded_reader::app_config::Config;
use graded_reader::app_controller::Controller;
use crate::common;

/// Test a full run over the sample script
#[tokio::test]
async fn test_run_withSampleScript_shouldWriteEveryArtifact() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_script(temp_dir.path(), "story.txt")?;
    let controller = Controller::new_for_test()?;

    let summary = controller.run(&input, false).await?;

    assert_eq!(summary.sentences, 4);
    assert_eq!(summary.chapters, 2);
    assert_eq!(summary.vocabulary_terms, 3);
    assert_eq!(summary.flashcard_rows, 5);
    assert!(summary.audio.is_none());

    let expected = [
        "story.tex",
        "story_chinese_1.txt",
        "story_chinese_english_repeat_1.txt",
        "story_chinese_2.txt",
        "story_chinese_english_repeat_2.txt",
        "story_anki.csv",
    ];
    let written: Vec<String> = summary
        .written
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(written, expected);
    for name in expected {
        assert!(temp_dir.path().join(name).is_file(), "missing {}", name);
    }

    // No audio without the flag
    assert!(!temp_dir.path().join("story_chinese_1.mp3").exists());

    let tex = fs::read_to_string(temp_dir.path().join("story.tex"))?;
    assert!(tex.contains(r"\section*{Chapter One}"));
    assert!(tex.contains(r"\section*{Chapter Two}"));
    assert!(tex.contains(r"\xpinyin*{\textbf{小明}你好。}"));
    assert!(!tex.contains("this line has no translation"));
    Ok(())
}

/// Test the reference sentence across all three outputs
#[tokio::test]
async fn test_run_withReferenceSentence_shouldAgreeAcrossOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "hello.txt", "你好(吗)[很][very]\n Hello")?;
    let controller = Controller::new_for_test()?;

    controller.run(&input, false).await?;

    let narration = fs::read_to_string(temp_dir.path().join("hello_chinese_1.txt"))?;
    assert_eq!(narration, "你好吗很");

    let csv = fs::read_to_string(temp_dir.path().join("hello_anki.csv"))?;
    assert_eq!(
        csv.lines().collect::<Vec<_>>(),
        vec!["zh_vocab,zh_sentence,en_vocab,en_sentence", "很,你好吗很,very,Hello"]
    );

    let tex = fs::read_to_string(temp_dir.path().join("hello.tex"))?;
    assert!(tex.contains(r"\underword{很}{1}{very}"));
    Ok(())
}

/// Test that a malformed block contributes to no output
#[tokio::test]
async fn test_run_withMalformedBlock_shouldIgnoreIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "mixed.txt",
        "一[个][one]。\nOne.\n\n[坏][bad]的块\n\n二。\nTwo.\n",
    )?;
    let controller = Controller::new_for_test()?;

    let summary = controller.run(&input, false).await?;

    assert_eq!(summary.sentences, 2);
    assert_eq!(summary.flashcard_rows, 1);
    assert_eq!(summary.vocabulary_terms, 1);

    let narration = fs::read_to_string(temp_dir.path().join("mixed_chinese_english_repeat_1.txt"))?;
    assert_eq!(narration, "一个。\nOne.\n一个。\n二。\nTwo.\n二。");
    let tex = fs::read_to_string(temp_dir.path().join("mixed.tex"))?;
    assert!(!tex.contains("坏"));
    Ok(())
}

/// Test an empty script still produces the document and the CSV header
#[tokio::test]
async fn test_run_withEmptyScript_shouldWriteEmptyOutputs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "empty.txt", "")?;
    let controller = Controller::new_for_test()?;

    let summary = controller.run(&input, false).await?;

    assert_eq!(summary.sentences, 0);
    assert_eq!(summary.chapters, 0);
    assert!(temp_dir.path().join("empty.tex").is_file());
    assert!(!temp_dir.path().join("empty_chinese_1.txt").exists());
    let csv = fs::read_to_string(temp_dir.path().join("empty_anki.csv"))?;
    assert_eq!(csv.trim_end(), "zh_vocab,zh_sentence,en_vocab,en_sentence");
    Ok(())
}

/// Test that a missing input file aborts the run
#[test]
fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;

    let result = tokio_test::block_on(controller.run(&temp_dir.path().join("missing.txt"), false));

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("missing.txt"));
    assert!(!temp_dir.path().join("missing.tex").exists());
    Ok(())
}

/// Test that an invalid configuration is rejected by the controller
#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.typeset.font_size_pt = 0;
    assert!(Controller::with_config(config).is_err());
}

/// Test that requesting audio without credentials still writes the text outputs
#[tokio::test]
async fn test_run_withAudioButNoCredentials_shouldSkipAudio() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_script(temp_dir.path(), "story.txt")?;
    let controller = Controller::with_config(Config::default())?;

    let summary = controller.run(&input, true).await?;

    assert!(summary.audio.is_none());
    assert_eq!(summary.written.len(), 6);
    assert!(!temp_dir.path().join("story_chinese_1.mp3").exists());
    Ok(())
}

use std::path::PathBuf;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use crate::file_utils::{FileManager, OutputPaths};
use crate::markup::MarkupTransformer;
use crate::script_parser::SentencePair;
use crate::speech::SpeechSynthesizer;

// @module: Per-chapter narration text and audio

/// A cleaned sentence with its translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationLine {
    /// Source sentence with every annotation stripped
    pub source: String,

    /// Target translation, unchanged
    pub target: String,
}

/// A run of consecutive sentences started by a chapter header (or the document start)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// 1-based position of the chapter in the document
    pub index: usize,

    /// Title from the chapter header, absent for an implicit first chapter
    pub title: Option<String>,

    pub lines: Vec<NarrationLine>,
}

impl Chapter {
    /// Cleaned source lines, one per line
    pub fn source_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.source.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Source, translation, source again, for every line of the chapter
    pub fn repeat_text(&self) -> String {
        self.lines
            .iter()
            .flat_map(|line| [line.source.as_str(), line.target.as_str(), line.source.as_str()])
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Outcome of the audio pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisReport {
    /// Audio files written successfully
    pub produced: Vec<PathBuf>,

    /// Audio files whose synthesis failed
    pub failed: Vec<PathBuf>,
}

impl SynthesisReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct NarrationEmitter;

impl NarrationEmitter {
    /// Group sentences into chapters.
    ///
    /// A chapter header after the first sentence closes the current chapter
    /// and opens a new one with that sentence. A header on the very first
    /// sentence only names the first chapter.
    pub fn chapters(sentences: &[SentencePair]) -> Vec<Chapter> {
        let mut chapters = Vec::new();
        let mut current: Option<Chapter> = None;

        for pair in sentences {
            let sentence = MarkupTransformer::plain(&pair.source_text);

            if MarkupTransformer::has_chapter_marker(&pair.source_text) {
                if let Some(finished) = current.take() {
                    chapters.push(finished);
                }
            }

            let chapter = current.get_or_insert_with(|| Chapter {
                index: chapters.len() + 1,
                title: sentence.chapter_title.clone(),
                lines: Vec::new(),
            });

            chapter.lines.push(NarrationLine {
                source: sentence.text,
                target: pair.target_text.clone(),
            });
        }

        if let Some(finished) = current {
            chapters.push(finished);
        }

        debug!(
            "Split {} sentence(s) into {} chapter(s)",
            sentences.len(),
            chapters.len()
        );

        chapters
    }

    /// Write the source-only and repeat-drill text files of every chapter
    pub fn write(chapters: &[Chapter], paths: &OutputPaths) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(chapters.len() * 2);

        for chapter in chapters {
            let source_path = paths.source_text(chapter.index);
            FileManager::write_to_file(&source_path, &chapter.source_text())?;
            written.push(source_path);

            let repeat_path = paths.repeat_text(chapter.index);
            FileManager::write_to_file(&repeat_path, &chapter.repeat_text())?;
            written.push(repeat_path);
        }

        Ok(written)
    }

    /// Synthesize the two audio files of every chapter, one request at a time.
    ///
    /// A failed request is logged and recorded in the report; the remaining
    /// chapters are still processed.
    pub async fn synthesize(
        chapters: &[Chapter],
        paths: &OutputPaths,
        synthesizer: &dyn SpeechSynthesizer,
    ) -> SynthesisReport {
        let mut report = SynthesisReport::default();

        let progress_bar = ProgressBar::new((chapters.len() * 2) as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} audio files {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        for chapter in chapters {
            let jobs = [
                (chapter.source_text(), paths.source_audio(chapter.index)),
                (chapter.repeat_text(), paths.repeat_audio(chapter.index)),
            ];

            for (text, output_path) in jobs {
                progress_bar.set_message(format!("chapter {}", chapter.index));

                match synthesizer.synthesize(&text, &output_path).await {
                    Ok(()) => {
                        info!("Generated: {}", output_path.display());
                        report.produced.push(output_path);
                    }
                    Err(e) => {
                        error!(
                            "Speech synthesis failed for chapter {} ({}): {}",
                            chapter.index,
                            output_path.display(),
                            e
                        );
                        report.failed.push(output_path);
                    }
                }

                progress_bar.inc(1);
            }
        }

        progress_bar.finish_and_clear();
        report
    }
}

use anyhow::{Context, Result};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use crate::app_config::Config;
use crate::emitters::{FlashcardEmitter, NarrationEmitter, SynthesisReport, TypesetEmitter};
use crate::file_utils::{FileManager, OutputPaths};
use crate::script_parser::Script;
use crate::speech::{AzureSpeech, SpeechSynthesizer};

// @module: Application controller for script conversion

/// What a run produced
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Sentence pairs parsed from the script
    pub sentences: usize,
    /// Narration chapters
    pub chapters: usize,
    /// Distinct footnoted vocabulary terms
    pub vocabulary_terms: usize,
    /// Flashcard rows exported
    pub flashcard_rows: usize,
    /// Text artifacts written, in the order they were produced
    pub written: Vec<PathBuf>,
    /// Audio outcome, when audio generation ran
    pub audio: Option<SynthesisReport>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert `input_file`, calling the configured speech service when `audio` is set
    pub async fn run(&self, input_file: &Path, audio: bool) -> Result<RunSummary> {
        if !audio {
            return self.run_with_synthesizer(input_file, None).await;
        }

        match self.config.validate_speech() {
            Ok(()) => {
                let speech = AzureSpeech::new(&self.config.speech);
                info!("Audio generation enabled: {} via {}", self.config.speech.voice, speech.endpoint());
                let synthesizer: &dyn SpeechSynthesizer = &speech;
                self.run_with_synthesizer(input_file, Some(synthesizer)).await
            }
            Err(e) => {
                error!("Audio generation skipped: {:#}", e);
                self.run_with_synthesizer(input_file, None).await
            }
        }
    }

    /// Run the full pipeline: parse, typeset, narration, optional audio, flashcards
    pub async fn run_with_synthesizer(
        &self,
        input_file: &Path,
        synthesizer: Option<&dyn SpeechSynthesizer>,
    ) -> Result<RunSummary> {
        let start_time = std::time::Instant::now();

        let script = Script::from_file(input_file)?;
        if script.is_empty() {
            warn!("No sentence pairs found in {}", input_file.display());
        }
        info!("Parsed {} sentence pair(s) from {}", script.len(), input_file.display());

        let paths = OutputPaths::for_input(input_file);
        let mut summary = RunSummary {
            sentences: script.len(),
            ..Default::default()
        };

        // Typeset document
        let document = TypesetEmitter::new(self.config.typeset.clone()).render(&script.sentences);
        let typeset_path = paths.typeset();
        FileManager::write_to_file(&typeset_path, &document.content)?;
        info!("Generated: {}", typeset_path.display());
        summary.vocabulary_terms = document.registry.len();
        summary.written.push(typeset_path);

        // Narration text, then audio
        let chapters = NarrationEmitter::chapters(&script.sentences);
        let narration_files = NarrationEmitter::write(&chapters, &paths)?;
        for path in &narration_files {
            info!("Generated: {}", path.display());
        }
        summary.chapters = chapters.len();
        summary.written.extend(narration_files);

        if let Some(synthesizer) = synthesizer {
            let report = NarrationEmitter::synthesize(&chapters, &paths, synthesizer).await;
            if !report.is_complete() {
                warn!(
                    "{} of {} audio file(s) could not be generated",
                    report.failed.len(),
                    report.failed.len() + report.produced.len()
                );
            }
            summary.audio = Some(report);
        }

        // Flashcards
        let rows = FlashcardEmitter::rows(&script.sentences);
        let flashcards_path = paths.flashcards();
        FlashcardEmitter::write_file(&rows, &flashcards_path)
            .with_context(|| format!("Failed to write flashcards: {}", flashcards_path.display()))?;
        info!("Generated: {}", flashcards_path.display());
        summary.flashcard_rows = rows.len();
        summary.written.push(flashcards_path);

        info!(
            "Done in {}: {} sentence(s), {} chapter(s), {} vocabulary term(s), {} flashcard(s)",
            Self::format_duration(start_time.elapsed()),
            summary.sentences,
            summary.chapters,
            summary.vocabulary_terms,
            summary.flashcard_rows
        );

        Ok(summary)
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

use std::io::Write;
use std::path::Path;
use anyhow::Context;
use serde::Serialize;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::markup::MarkupTransformer;
use crate::script_parser::SentencePair;

// @module: Anki flashcard export

/// Column names of the exported CSV
pub const FLASHCARD_HEADER: [&str; 4] = ["zh_vocab", "zh_sentence", "en_vocab", "en_sentence"];

/// One flashcard: a vocabulary word in the context of its sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlashcardRow {
    pub zh_vocab: String,
    pub zh_sentence: String,
    pub en_vocab: String,
    pub en_sentence: String,
}

pub struct FlashcardEmitter;

impl FlashcardEmitter {
    /// One row per gloss occurrence, in document order.
    ///
    /// Terms are not deduplicated: a word glossed in three sentences yields
    /// three cards, each with its own sentence context.
    pub fn rows(sentences: &[SentencePair]) -> Vec<FlashcardRow> {
        let mut rows = Vec::new();

        for pair in sentences {
            let glosses = MarkupTransformer::extract_glosses(&pair.source_text);
            if glosses.is_empty() {
                continue;
            }

            let cleaned = MarkupTransformer::clean(&pair.source_text);
            rows.extend(glosses.into_iter().map(|gloss| FlashcardRow {
                zh_vocab: gloss.term,
                zh_sentence: cleaned.clone(),
                en_vocab: gloss.meaning,
                en_sentence: pair.target_text.clone(),
            }));
        }

        rows
    }

    /// Write the header and all rows as CSV
    pub fn write_csv<W: Write>(rows: &[FlashcardRow], writer: W) -> Result<(), AppError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        // Written explicitly so an export without rows still carries the header
        csv_writer.write_record(FLASHCARD_HEADER)?;
        for row in rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;

        Ok(())
    }

    /// Write the CSV to `path`, creating parent directories as needed
    pub fn write_file<P: AsRef<Path>>(rows: &[FlashcardRow], path: P) -> anyhow::Result<()> {
        let mut buffer = Vec::new();
        Self::write_csv(rows, &mut buffer)?;
        let content = String::from_utf8(buffer).context("Flashcard CSV is not valid UTF-8")?;

        FileManager::write_to_file(path, &content)
    }
}

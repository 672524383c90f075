use std::path::{Path, PathBuf};
use anyhow::Result;
use log::debug;
use crate::errors::ScriptError;
use crate::file_utils::FileManager;

// @module: Sentence-pair script parsing

// @struct: One annotated sentence and its translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePair {
    // @field: Annotated source sentence (may carry markup)
    pub source_text: String,

    // @field: Plain target-language translation
    pub target_text: String,
}

impl SentencePair {
    pub fn new(source_text: impl Into<String>, target_text: impl Into<String>) -> Self {
        SentencePair {
            source_text: source_text.into(),
            target_text: target_text.into(),
        }
    }
}

/// Parsed script with its sentence pairs in document order
#[derive(Debug, Clone)]
pub struct Script {
    /// Source filename
    pub source_file: PathBuf,

    /// Sentence pairs in document order
    pub sentences: Vec<SentencePair>,
}

impl Script {
    /// Create an empty script
    pub fn new(source_file: PathBuf) -> Self {
        Script {
            source_file,
            sentences: Vec::new(),
        }
    }

    /// Read and parse a UTF-8 script file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(ScriptError::NotFound(path.display().to_string()).into());
        }

        let content = FileManager::read_to_string(path).map_err(|e| ScriptError::Unreadable {
            path: path.display().to_string(),
            message: format!("{:#}", e),
        })?;

        Ok(Script {
            source_file: path.to_path_buf(),
            sentences: Self::parse_str(&content),
        })
    }

    /// Parse raw script text into sentence pairs.
    ///
    /// Blocks are separated by one or more blank lines. The first line of a
    /// block is the annotated sentence, the second its translation; extra
    /// lines are ignored and blocks with a single line are skipped.
    pub fn parse_str(content: &str) -> Vec<SentencePair> {
        let mut sentences = Vec::new();
        let mut block: Vec<&str> = Vec::new();
        let mut skipped = 0;

        // `lines()` also strips the '\r' of CRLF endings
        for line in content.lines() {
            if line.trim().is_empty() {
                if !finish_block(&mut block, &mut sentences) {
                    skipped += 1;
                }
            } else {
                block.push(line);
            }
        }
        if !finish_block(&mut block, &mut sentences) {
            skipped += 1;
        }

        if skipped > 0 {
            debug!("Skipped {} malformed block(s)", skipped);
        }

        sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

// @returns: false when the block was malformed and dropped
fn finish_block(block: &mut Vec<&str>, sentences: &mut Vec<SentencePair>) -> bool {
    let well_formed = match block.as_slice() {
        [] => true,
        [single] => {
            debug!("Skipping malformed block with a single line: {:?}", single);
            false
        }
        [source, target, ..] => {
            sentences.push(SentencePair::new(source.trim(), target.trim()));
            true
        }
    };
    block.clear();
    well_formed
}

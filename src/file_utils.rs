use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File utilities and output naming

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}

/// Names of every artifact produced for one input script.
///
/// All outputs sit next to the input and share its path minus the extension,
/// e.g. `story.txt` gives `story.tex`, `story_chinese_1.txt`, `story_anki.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    base: PathBuf,
}

impl OutputPaths {
    pub fn for_input<P: AsRef<Path>>(input_file: P) -> Self {
        Self {
            base: input_file.as_ref().with_extension(""),
        }
    }

    pub fn typeset(&self) -> PathBuf {
        self.with_suffix(".tex")
    }

    pub fn source_text(&self, chapter: usize) -> PathBuf {
        self.with_suffix(&format!("_chinese_{}.txt", chapter))
    }

    pub fn repeat_text(&self, chapter: usize) -> PathBuf {
        self.with_suffix(&format!("_chinese_english_repeat_{}.txt", chapter))
    }

    pub fn source_audio(&self, chapter: usize) -> PathBuf {
        self.with_suffix(&format!("_chinese_{}.mp3", chapter))
    }

    pub fn repeat_audio(&self, chapter: usize) -> PathBuf {
        self.with_suffix(&format!("_chinese_english_repeat_{}.mp3", chapter))
    }

    pub fn flashcards(&self) -> PathBuf {
        self.with_suffix("_anki.csv")
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = self.base.clone().into_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }
}

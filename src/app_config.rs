use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles loading, overriding and validating configuration settings.
/// Configuration is optional: a missing file yields the defaults.

// @const: Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "graded_reader.json";

// @const: Environment variable overriding the configuration file path
pub const CONFIG_PATH_ENV: &str = "GRADED_READER_CONFIG";

// @const: Environment variable overriding the log level
pub const LOG_LEVEL_ENV: &str = "GRADED_READER_LOG";

// @const: Environment variables carrying the speech credentials
pub const SPEECH_KEY_ENV: &str = "SPEECH_KEY";
pub const SPEECH_REGION_ENV: &str = "SPEECH_REGION";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Typeset document template settings
    #[serde(default)]
    pub typeset: TypesetConfig,

    /// Speech synthesis settings
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Static values written into the LaTeX document template
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TypesetConfig {
    /// Heading printed at the top of the document
    #[serde(default = "default_title")]
    pub title: String,

    /// Base font size in points
    #[serde(default = "default_font_size_pt")]
    pub font_size_pt: u32,

    /// Value for `\baselinestretch`
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f32,

    /// reledmac footnote arrangement (`threecol`, `twocol`, `paragraph`, ...)
    #[serde(default = "default_footnote_layout")]
    pub footnote_layout: String,
}

impl Default for TypesetConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            font_size_pt: default_font_size_pt(),
            line_spacing: default_line_spacing(),
            footnote_layout: default_footnote_layout(),
        }
    }
}

/// Speech synthesis service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    /// Subscription key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service region (e.g. "eastus"); used to build the default endpoint
    #[serde(default = "String::new")]
    pub region: String,

    /// Full endpoint URL, overrides the region-derived one when set
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Voice used for every chapter
    #[serde(default = "default_voice")]
    pub voice: String,

    /// `xml:lang` of the generated SSML
    #[serde(default = "default_voice_language")]
    pub language: String,

    /// Audio encoding requested from the service
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            region: String::new(),
            endpoint: String::new(),
            voice: default_voice(),
            language: default_voice_language(),
            output_format: default_output_format(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SpeechConfig {
    /// Get the endpoint, derived from the region unless set explicitly
    pub fn get_endpoint(&self) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.clone();
        }
        format!(
            "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
            self.region
        )
    }

    /// Replace the credentials with values from the environment when present
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(SPEECH_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api_key = key.trim().to_string();
            }
        }
        if let Ok(region) = std::env::var(SPEECH_REGION_ENV) {
            if !region.trim().is_empty() {
                self.region = region.trim().to_string();
            }
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(anyhow!("Invalid log level: {}", s)),
        }
    }
}

fn default_title() -> String {
    "Generated Graded Reader".to_string()
}

fn default_font_size_pt() -> u32 {
    16
}

fn default_line_spacing() -> f32 {
    2.0
}

fn default_footnote_layout() -> String {
    "threecol".to_string()
}

fn default_voice() -> String {
    // Multilingual neural voice, reads both the Chinese and English lines
    "zh-CN-XiaochenMultilingualNeural".to_string()
}

fn default_voice_language() -> String {
    "zh-CN".to_string()
}

fn default_output_format() -> String {
    "audio-16khz-32kbitrate-mono-mp3".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Config {
    /// Path of the configuration file: `$GRADED_READER_CONFIG` or the default name
    pub fn default_path() -> PathBuf {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
            _ => PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load the configuration file if it exists, otherwise use defaults,
    /// then apply environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };

        config.speech.apply_env_overrides();

        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            match level.parse::<LogLevel>() {
                Ok(level) => config.log_level = level,
                Err(e) => log::warn!("Ignoring {}: {}", LOG_LEVEL_ENV, e),
            }
        }

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.typeset.font_size_pt == 0 {
            return Err(anyhow!("Font size must be greater than zero"));
        }

        if !(self.typeset.line_spacing.is_finite() && self.typeset.line_spacing > 0.0) {
            return Err(anyhow!(
                "Line spacing must be a positive number, got {}",
                self.typeset.line_spacing
            ));
        }

        if self.typeset.footnote_layout.trim().is_empty() {
            return Err(anyhow!("Footnote layout must not be empty"));
        }

        if self.speech.voice.trim().is_empty() {
            return Err(anyhow!("Speech voice must not be empty"));
        }

        Ok(())
    }

    /// Validate the settings needed to call the speech service
    pub fn validate_speech(&self) -> Result<()> {
        if self.speech.api_key.is_empty() {
            return Err(anyhow!(
                "Speech API key is required for audio generation (set {} or speech.api_key)",
                SPEECH_KEY_ENV
            ));
        }

        if self.speech.region.is_empty() && self.speech.endpoint.is_empty() {
            return Err(anyhow!(
                "Speech region or endpoint is required for audio generation (set {} or speech.region)",
                SPEECH_REGION_ENV
            ));
        }

        url::Url::parse(&self.speech.get_endpoint())
            .with_context(|| format!("Invalid speech endpoint: {}", self.speech.get_endpoint()))?;

        Ok(())
    }
}

#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap::error::ErrorKind;
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use graded_reader::app_config::Config;
use graded_reader::app_controller::Controller;

/// graded-reader - build a graded reader from an annotated script
///
/// Produces a LaTeX document, narration text files and an Anki flashcard CSV
/// next to the input file.
#[derive(Parser, Debug)]
#[command(name = "graded-reader")]
#[command(version)]
#[command(about = "Graded reader builder for annotated Chinese scripts")]
#[command(long_about = "graded-reader turns an annotated script of Chinese/English sentence pairs into a
LaTeX document, per-chapter narration text and an Anki flashcard CSV.

EXAMPLES:
    graded-reader story.txt            # story.tex, story_chinese_1.txt, story_anki.csv, ...
    graded-reader --audio story.txt    # also synthesize story_chinese_1.mp3, ...

CONFIGURATION:
    Settings are read from graded_reader.json in the working directory when present
    (override the path with GRADED_READER_CONFIG). Speech credentials can be given with
    the SPEECH_KEY and SPEECH_REGION environment variables; GRADED_READER_LOG sets the
    log level.")]
struct CommandLineOptions {
    /// Annotated script to convert
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Generate narration audio through the speech service (billed per character)
    #[arg(short, long)]
    audio: bool,
}

impl CommandLineOptions {
    // @validates: INPUT_FILE names an existing file
    fn validate_input(&self) -> Result<(), clap::Error> {
        if !self.input_file.is_file() {
            return Err(Self::command().error(
                ErrorKind::ValueValidation,
                format!("input file does not exist: {}", self.input_file.display()),
            ));
        }
        Ok(())
    }
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set from the config below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let options = CommandLineOptions::parse();
    if let Err(error) = options.validate_input() {
        error.exit();
    }

    let config = Config::load(Config::default_path())?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    controller.run(&options.input_file, options.audio).await?;

    Ok(())
}

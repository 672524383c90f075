/*!
 * # graded-reader - Graded reader builder for annotated Chinese scripts
 *
 * Converts a script of Chinese/English sentence pairs with inline vocabulary
 * glosses into study material.
 *
 * ## Features
 *
 * - LaTeX document with pinyin over every character (`xpinyin`), bold names
 *   and numbered vocabulary footnotes, each word footnoted once
 * - Per-chapter narration text files, including a "say it, translate it,
 *   repeat it" drill
 * - Optional MP3 narration through a text-to-speech service
 * - Anki flashcard CSV with one card per vocabulary gloss
 *
 * ## Script format
 *
 * ```text
 * ==Chapter One==你好(小明)！
 * Hello Xiaoming!
 *
 * \p他[很][very]高兴。
 * He is very happy.
 * ```
 *
 * ## Architecture
 *
 * - `script_parser`: splits the script into sentence pairs
 * - `markup`: annotation rewriting and the vocabulary registry
 * - `emitters`: typeset, narration and flashcard outputs
 * - `speech`: speech synthesis backends
 * - `file_utils`: output naming and file operations
 * - `app_controller`: runs the whole pipeline
 * - `app_config`: configuration management
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]

pub mod app_config;
pub mod app_controller;
pub mod emitters;
pub mod errors;
pub mod file_utils;
pub mod markup;
pub mod script_parser;
pub mod speech;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use markup::{MarkupTransformer, TransformedSentence, VocabularyGloss, VocabularyRegistry};
pub use script_parser::{Script, SentencePair};
pub use errors::{AppError, ScriptError, SynthesisError};

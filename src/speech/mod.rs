/*!
 * Speech synthesis backends for chapter narration.
 *
 * The narration emitter only depends on the `SpeechSynthesizer` trait;
 * `azure` is the HTTP implementation used by the command-line tool.
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::SynthesisError;

/// Converts text to an audio file
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + Debug {
    /// Synthesize `text` and write the audio to `output_path`
    ///
    /// # Returns
    /// * `Result<(), SynthesisError>` - Ok once the file is written, or the reason it was not
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<(), SynthesisError>;
}

pub mod azure;

pub use azure::AzureSpeech;

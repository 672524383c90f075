/*!
 * Output projections of a parsed script.
 *
 * Each emitter consumes the same sentence pairs independently:
 * - `typeset`: LaTeX document with pinyin, emphasis and vocabulary footnotes
 * - `narration`: per-chapter text files for text-to-speech, plus optional audio
 * - `flashcards`: Anki CSV export, one row per vocabulary gloss
 */

pub mod flashcards;
pub mod narration;
pub mod typeset;

pub use flashcards::{FlashcardEmitter, FlashcardRow};
pub use narration::{Chapter, NarrationEmitter, NarrationLine, SynthesisReport};
pub use typeset::{TypesetDocument, TypesetEmitter};

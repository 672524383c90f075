/*!
 * Inline annotation handling for script sentences.
 *
 * Four annotation kinds are recognised, applied as successive regex passes
 * in this order:
 *
 * - `\p` paragraph marker: removed, reported as a paragraph break
 * - `==title==` chapter header: becomes a section heading (typeset) or plain title text
 * - `(text)` emphasis: bold in the typeset output, parentheses dropped otherwise
 * - `[term][meaning]` vocabulary gloss: footnoted (typeset) or collapsed to `term`
 *
 * Matching is non-greedy and leftmost-first. Nested or overlapping spans are
 * not supported; unmatched syntax is left in place.
 */

pub mod registry;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub use registry::{GlossLabel, VocabularyRegistry};

static PARAGRAPH_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\p").unwrap());

static CHAPTER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"==(.+?)==").unwrap());

static EMPHASIS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((.*?)\)").unwrap());

// Plain output drops every parenthesis, paired or not
static EMPHASIS_DELIMITERS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[()]").unwrap());

static GLOSS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]\[(.*?)\]").unwrap());

static LATEX_SPECIAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[%&#_$]").unwrap());

/// A vocabulary word and its definition, as written in `[term][meaning]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyGloss {
    pub term: String,
    pub meaning: String,
}

impl VocabularyGloss {
    pub fn new(term: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            meaning: meaning.into(),
        }
    }
}

/// Result of transforming one source sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedSentence {
    /// Rewritten sentence text
    pub text: String,

    /// A `\p` marker asked for a paragraph break before this sentence
    pub paragraph_break: bool,

    /// Title of the chapter header carried by this sentence, if any
    pub chapter_title: Option<String>,
}

/// Rewrites annotated sentences for each output target
pub struct MarkupTransformer;

impl MarkupTransformer {
    /// Rewrite a sentence as LaTeX, threading vocabulary labels through `registry`.
    ///
    /// The first occurrence of a term becomes `\underword{term}{label}{meaning}`,
    /// later occurrences become `\underref{term}{label}`. The first chapter
    /// header is removed from the text and returned in `chapter_title`; any
    /// further header in the same sentence keeps its title inline. LaTeX
    /// special characters in the sentence are escaped.
    pub fn typeset(source: &str, registry: &mut VocabularyRegistry) -> TransformedSentence {
        let paragraph_break = PARAGRAPH_REGEX.is_match(source);
        let text = Self::escape_latex(&PARAGRAPH_REGEX.replace_all(source, ""));

        let chapter_title = Self::chapter_title(&text);
        let text = CHAPTER_REGEX.replace(&text, "");
        let text = CHAPTER_REGEX.replace_all(&text, "${1}");

        let text = EMPHASIS_REGEX.replace_all(&text, r"\textbf{${1}}");

        let text = GLOSS_REGEX.replace_all(&text, |caps: &Captures| {
            let term = &caps[1];
            let meaning = &caps[2];
            let gloss = registry.register(term);
            match gloss {
                GlossLabel::First(_) => {
                    format!(r"\underword{{{}}}{{{}}}{{{}}}", term, gloss.label(), meaning)
                }
                GlossLabel::Repeat(_) => format!(r"\underref{{{}}}{{{}}}", term, gloss.label()),
            }
        });

        TransformedSentence {
            text: text.trim().to_string(),
            paragraph_break,
            chapter_title,
        }
    }

    /// Strip every annotation, keeping chapter titles and gloss terms as plain text.
    ///
    /// Passes repeat until nothing matches, so cleaning an already clean
    /// sentence is a no-op.
    pub fn plain(source: &str) -> TransformedSentence {
        let paragraph_break = PARAGRAPH_REGEX.is_match(source);
        let chapter_title = Self::chapter_title(&PARAGRAPH_REGEX.replace_all(source, ""));

        let mut text = source.to_string();
        loop {
            let next = Self::strip_once(&text);
            if next == text {
                break;
            }
            text = next;
        }

        TransformedSentence {
            text: text.trim().to_string(),
            paragraph_break,
            chapter_title,
        }
    }

    /// Plain text of a sentence with all annotation syntax removed
    pub fn clean(source: &str) -> String {
        Self::plain(source).text
    }

    /// Every gloss in the sentence, left to right, duplicates included
    pub fn extract_glosses(source: &str) -> Vec<VocabularyGloss> {
        let text = PARAGRAPH_REGEX.replace_all(source, "");
        GLOSS_REGEX
            .captures_iter(&text)
            .map(|caps| VocabularyGloss::new(Self::clean(&caps[1]), &caps[2]))
            .collect()
    }

    /// Title of the first `==title==` header in the sentence
    pub fn chapter_title(source: &str) -> Option<String> {
        CHAPTER_REGEX
            .captures(source)
            .map(|caps| caps[1].trim().to_string())
    }

    pub fn has_chapter_marker(source: &str) -> bool {
        CHAPTER_REGEX.is_match(&PARAGRAPH_REGEX.replace_all(source, ""))
    }

    /// Escape `% & # _ $` so free text cannot break out of a LaTeX group
    pub fn escape_latex(text: &str) -> String {
        LATEX_SPECIAL_REGEX.replace_all(text, r"\${0}").into_owned()
    }

    fn strip_once(text: &str) -> String {
        let text = PARAGRAPH_REGEX.replace_all(text, "");
        let text = CHAPTER_REGEX.replace_all(&text, "${1}");
        let text = EMPHASIS_DELIMITERS_REGEX.replace_all(&text, "");
        GLOSS_REGEX.replace_all(&text, "${1}").into_owned()
    }
}

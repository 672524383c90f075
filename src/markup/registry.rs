/*!
 * First-occurrence vocabulary bookkeeping.
 *
 * A registry lives for exactly one typeset pass. The first time a term is
 * seen it receives the next label (1, 2, 3, ...); every later occurrence of
 * the same term reads that label back.
 */

use std::collections::HashMap;

/// Outcome of registering a term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlossLabel {
    /// The term was new and has just been assigned this label
    First(usize),
    /// The term was already known under this label
    Repeat(usize),
}

impl GlossLabel {
    pub fn label(&self) -> usize {
        match self {
            GlossLabel::First(label) | GlossLabel::Repeat(label) => *label,
        }
    }
}

/// Mapping from vocabulary term to its footnote label
#[derive(Debug, Clone, Default)]
pub struct VocabularyRegistry {
    labels: HashMap<String, usize>,
    terms: Vec<String>,
}

impl VocabularyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `term`, assigning the next label if it has not been seen yet
    pub fn register(&mut self, term: &str) -> GlossLabel {
        if let Some(&label) = self.labels.get(term) {
            return GlossLabel::Repeat(label);
        }

        let label = self.terms.len() + 1;
        self.labels.insert(term.to_string(), label);
        self.terms.push(term.to_string());
        GlossLabel::First(label)
    }

    pub fn label_of(&self, term: &str) -> Option<usize> {
        self.labels.get(term).copied()
    }

    /// Registered terms in label order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

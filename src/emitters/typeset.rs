use log::debug;
use crate::app_config::TypesetConfig;
use crate::markup::{MarkupTransformer, VocabularyRegistry};
use crate::script_parser::SentencePair;

// @module: LaTeX document emission

const LATEX_FOOTER: &str = "\n\\end{document}\n";

/// Rendered document together with the vocabulary labels it assigned
#[derive(Debug, Clone)]
pub struct TypesetDocument {
    /// Full LaTeX source
    pub content: String,

    /// Terms footnoted in this document, in label order
    pub registry: VocabularyRegistry,
}

/// Builds the `ctexart` document with pinyin, bold names and vocabulary footnotes
pub struct TypesetEmitter {
    config: TypesetConfig,
}

impl TypesetEmitter {
    pub fn new(config: TypesetConfig) -> Self {
        Self { config }
    }

    /// Render every sentence in document order.
    ///
    /// One registry covers the whole document, so footnote labels keep
    /// increasing across chapter headings.
    pub fn render(&self, sentences: &[SentencePair]) -> TypesetDocument {
        let mut registry = VocabularyRegistry::new();
        let mut body = String::new();

        for pair in sentences {
            let sentence = MarkupTransformer::typeset(&pair.source_text, &mut registry);

            if sentence.paragraph_break {
                body.push('\n');
            }

            if let Some(title) = &sentence.chapter_title {
                body.push_str(&format!("\\section*{{{}}}\n", title));
            }

            if !sentence.text.is_empty() {
                body.push_str(&format!("\\xpinyin*{{{}}}\n", sentence.text));
            }
        }

        debug!(
            "Typeset {} sentence(s) with {} footnoted term(s)",
            sentences.len(),
            registry.len()
        );

        let mut content = self.header();
        content.push('\n');
        content.push_str(&body);
        content.push_str(LATEX_FOOTER);

        TypesetDocument { content, registry }
    }

    /// Document preamble built from the configured template values
    pub fn header(&self) -> String {
        let font = self.config.font_size_pt;
        format!(
            r"\documentclass[{font}pt]{{ctexart}}
\usepackage{{xpinyin}}
\usepackage{{setspace}}
\usepackage{{reledmac}}
\arrangementX[A]{{{layout}}}
\let\footnote\footnoteA
\renewcommand{{\baselinestretch}}{{{spacing}}}

\makeatletter
\renewcommand{{\normalsize}}{{\@setfontsize{{\normalsize}}{{{font}pt}}{{{font}pt}}}}
\makeatother

\newcommand{{\underword}}[3]{{\underline{{#1}}\footnote{{#2: #3}}}}
\newcommand{{\underref}}[2]{{\underline{{#1}}\textsuperscript{{#2}}}}

\begin{{document}}

\section*{{{title}}}
",
            font = font,
            layout = self.config.footnote_layout,
            spacing = self.config.line_spacing,
            title = MarkupTransformer::escape_latex(&self.config.title),
        )
    }
}

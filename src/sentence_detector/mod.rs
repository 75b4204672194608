// WHY: public splitter interface; owns the read-only honorific set and compiled rules
// Splitting is pure and synchronous, so one instance can be shared across threads.

use std::path::Path;

use tracing::{debug, info};

use crate::error::SplitterError;

pub mod abbreviations;
pub mod boundary;
pub mod context;
pub mod lexical;
pub mod paragraph;

pub use abbreviations::{AbbreviationChecker, HonorificSet};
pub use boundary::{BoundaryClassifier, Decision, Verdict};
pub use context::{Capitalization, ContextWindow, Mark, Slot, Side};
pub use paragraph::ParagraphAssembler;

/// Counters describing one split run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitStats {
    pub paragraphs: usize,
    pub candidates: usize,
    pub boundaries: usize,
}

/// Rule-based sentence splitter
pub struct SentenceSplitter {
    classifier: BoundaryClassifier,
}

impl SentenceSplitter {
    /// Create a splitter around an already loaded honorific set
    pub fn new(honorifics: HonorificSet) -> Result<Self, SplitterError> {
        let classifier = BoundaryClassifier::new(AbbreviationChecker::new(honorifics))?;
        Ok(Self { classifier })
    }

    /// Create a splitter from an honorific list file, one entry per line
    pub fn from_honorifics_file<P: AsRef<Path>>(path: P) -> Result<Self, SplitterError> {
        Self::new(HonorificSet::load(path)?)
    }

    pub fn honorifics(&self) -> &HonorificSet {
        self.classifier.abbreviations().honorifics()
    }

    /// Split a whole document into sentences, in document order
    pub fn split(&self, document: &str) -> Vec<String> {
        self.split_lines(document.lines())
    }

    /// Split a document already broken into lines
    pub fn split_lines<I, S>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.split_lines_with_stats(lines).0
    }

    /// Split and report paragraph, candidate and boundary counts
    pub fn split_lines_with_stats<I, S>(&self, lines: I) -> (Vec<String>, SplitStats)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sentences = Vec::new();
        let mut stats = SplitStats::default();
        let mut assembler = ParagraphAssembler::new();

        for line in lines {
            if let Some(paragraph) = assembler.push_line(line.as_ref()) {
                self.process_paragraph(&paragraph, &mut sentences, &mut stats);
            }
        }
        if let Some(paragraph) = assembler.finish() {
            self.process_paragraph(&paragraph, &mut sentences, &mut stats);
        }

        info!(
            paragraphs = stats.paragraphs,
            sentences = sentences.len(),
            "Split document"
        );
        (sentences, stats)
    }

    /// Classify the candidate mark of `words[index]`, if it has one
    pub fn classify(&self, words: &[&str], index: usize) -> Option<Decision> {
        ContextWindow::extract(words, index).map(|window| self.classifier.classify(&window))
    }

    fn process_paragraph(&self, paragraph: &str, sentences: &mut Vec<String>, stats: &mut SplitStats) {
        let counts = paragraph::segment_paragraph(&self.classifier, paragraph, sentences);
        stats.paragraphs += 1;
        stats.candidates += counts.candidates;
        stats.boundaries += counts.boundaries;
        debug!(paragraph = stats.paragraphs, total_sentences = sentences.len(), "Processed paragraph");
    }
}

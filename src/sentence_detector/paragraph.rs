// WHY: joins raw lines into paragraphs and cuts each paragraph into sentences
// Every word lands in exactly one sentence, in input order.

use tracing::debug;

use super::boundary::{BoundaryClassifier, Verdict};
use super::context::ContextWindow;

/// Accumulates lines until a blank line closes the paragraph
#[derive(Debug, Default)]
pub struct ParagraphAssembler {
    paragraph: String,
}

impl ParagraphAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one input line; returns the finished paragraph when the line is blank
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        if line.trim().is_empty() {
            return self.take();
        }

        let line = line.trim_start();
        let kept = self.paragraph.trim_end().len();
        self.paragraph.truncate(kept);

        if self.paragraph.is_empty() {
            self.paragraph.push_str(line);
        } else if ends_with_soft_hyphen(&self.paragraph) {
            // Word continues on the next line: drop the hyphen, no space
            self.paragraph.pop();
            self.paragraph.push_str(line);
        } else {
            self.paragraph.push(' ');
            self.paragraph.push_str(line);
        }
        None
    }

    /// Flush whatever is left at end of input
    pub fn finish(mut self) -> Option<String> {
        self.take()
    }

    fn take(&mut self) -> Option<String> {
        if self.paragraph.trim().is_empty() {
            self.paragraph.clear();
            None
        } else {
            Some(std::mem::take(&mut self.paragraph))
        }
    }
}

/// Single trailing hyphen that is not part of a "--" dash
fn ends_with_soft_hyphen(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 2 && bytes[bytes.len() - 1] == b'-' && bytes[bytes.len() - 2] != b'-'
}

/// Candidate and boundary counts for one segmentation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentCounts {
    pub candidates: usize,
    pub boundaries: usize,
}

/// Split one paragraph into sentences, appending them to `sentences`
pub fn segment_paragraph(
    classifier: &BoundaryClassifier,
    paragraph: &str,
    sentences: &mut Vec<String>,
) -> SegmentCounts {
    let words: Vec<&str> = paragraph.split_whitespace().collect();
    let mut counts = SegmentCounts::default();
    let mut start = 0;

    for index in 0..words.len() {
        let Some(window) = ContextWindow::extract(&words, index) else {
            continue;
        };
        counts.candidates += 1;

        if classifier.verdict(&window) == Verdict::Boundary {
            sentences.push(words[start..=index].join(" "));
            counts.boundaries += 1;
            start = index + 1;
        }
    }

    if start < words.len() {
        sentences.push(words[start..].join(" "));
    }

    debug!(
        words = words.len(),
        candidates = counts.candidates,
        boundaries = counts.boundaries,
        "Segmented paragraph"
    );
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence_detector::abbreviations::{AbbreviationChecker, HonorificSet};

    fn assemble(lines: &[&str]) -> Vec<String> {
        let mut assembler = ParagraphAssembler::new();
        let mut paragraphs: Vec<String> = lines.iter().filter_map(|line| assembler.push_line(line)).collect();
        paragraphs.extend(assembler.finish());
        paragraphs
    }

    fn classifier() -> BoundaryClassifier {
        let honorifics = HonorificSet::from_lines(["Mr.", "Dr."]);
        BoundaryClassifier::new(AbbreviationChecker::new(honorifics)).unwrap()
    }

    #[test]
    fn test_lines_join_with_single_space() {
        let paragraphs = assemble(&["First line", "   second line  ", "third"]);
        assert_eq!(paragraphs, vec!["First line second line third"]);
    }

    #[test]
    fn test_blank_lines_separate_paragraphs() {
        let paragraphs = assemble(&["One.", "", "Two.", "  \t ", "", "Three."]);
        assert_eq!(paragraphs, vec!["One.", "Two.", "Three."]);
    }

    #[test]
    fn test_hyphenated_line_break_joins_word() {
        let paragraphs = assemble(&["exam-", "ple sentence."]);
        assert_eq!(paragraphs, vec!["example sentence."]);

        // Trailing whitespace after the hyphen does not block the join
        let paragraphs = assemble(&["well-   ", "known"]);
        assert_eq!(paragraphs, vec!["wellknown"]);
    }

    #[test]
    fn test_double_hyphen_dash_keeps_space() {
        let paragraphs = assemble(&["He paused --", "then spoke."]);
        assert_eq!(paragraphs, vec!["He paused -- then spoke."]);

        let paragraphs = assemble(&["-", "alone"]);
        assert_eq!(paragraphs, vec!["- alone"]);
    }

    #[test]
    fn test_blank_input_yields_no_paragraph() {
        assert!(assemble(&[]).is_empty());
        assert!(assemble(&["", "   ", ""]).is_empty());
    }

    #[test]
    fn test_segment_paragraph_splits_and_flushes() {
        let classifier = classifier();
        let mut sentences = Vec::new();

        let counts = segment_paragraph(&classifier, "He left. She stayed. Then nothing", &mut sentences);
        assert_eq!(sentences, vec!["He left.", "She stayed.", "Then nothing"]);
        assert_eq!(counts, SegmentCounts { candidates: 2, boundaries: 2 });
    }

    #[test]
    fn test_segment_paragraph_without_punctuation() {
        let classifier = classifier();
        let mut sentences = Vec::new();

        let counts = segment_paragraph(&classifier, "no  terminal\tpunctuation here", &mut sentences);
        assert_eq!(sentences, vec!["no terminal punctuation here"]);
        assert_eq!(counts.candidates, 0);
    }

    #[test]
    fn test_segment_paragraph_keeps_honorific_inside() {
        let classifier = classifier();
        let mut sentences = vec!["earlier.".to_string()];

        segment_paragraph(&classifier, "I saw Dr. Who today.", &mut sentences);
        assert_eq!(sentences, vec!["earlier.", "I saw Dr. Who today."]);
    }
}

// WHY: bounded lexical context around one candidate mark
// Two words back, two words forward, and the candidate word split at its mark.

use super::lexical;

/// Punctuation mark under consideration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Period,
    Question,
    Exclamation,
}

impl Mark {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Period),
            '?' => Some(Self::Question),
            '!' => Some(Self::Exclamation),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Period => '.',
            Self::Question => '?',
            Self::Exclamation => '!',
        }
    }
}

/// Three-valued capitalization signal of a context slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capitalization {
    /// First character is an ASCII uppercase letter
    Upper,
    /// Present, but not starting with an ASCII uppercase letter
    Lower,
    /// Slot lies outside the paragraph
    Absent,
}

impl Capitalization {
    pub fn of(word: &str) -> Self {
        if lexical::is_capitalized(word) {
            Self::Upper
        } else {
            Self::Lower
        }
    }
}

/// Neighbouring word, or `Absent` past either end of the paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a> {
    Word(&'a str),
    Absent,
}

impl<'a> Slot<'a> {
    pub fn word(self) -> Option<&'a str> {
        match self {
            Self::Word(word) => Some(word),
            Self::Absent => None,
        }
    }

    pub fn is_absent(self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Exact token match; never true for an absent slot
    pub fn is(self, token: &str) -> bool {
        self.word() == Some(token)
    }

    pub fn capitalization(self) -> Capitalization {
        match self {
            Self::Word(word) => Capitalization::of(word),
            Self::Absent => Capitalization::Absent,
        }
    }

    pub fn is_capitalized(self) -> bool {
        self.capitalization() == Capitalization::Upper
    }

    /// Apply a lexical predicate to the word; absent slots always fail
    pub fn test(self, predicate: fn(&str) -> bool) -> bool {
        self.word().is_some_and(predicate)
    }
}

/// Text on one side of the mark inside the candidate word, `Empty` when nothing is there
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side<'a> {
    Text(&'a str),
    Empty,
}

impl<'a> Side<'a> {
    fn from_part(part: &'a str) -> Self {
        if part.is_empty() {
            Self::Empty
        } else {
            Self::Text(part)
        }
    }

    pub fn text(self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Empty sides are never capitalized
    pub fn capitalization(self) -> Capitalization {
        self.text().map_or(Capitalization::Lower, Capitalization::of)
    }

    /// Apply a lexical predicate to the text; empty sides always fail
    pub fn test(self, predicate: fn(&str) -> bool) -> bool {
        self.text().is_some_and(predicate)
    }
}

/// Rightmost `.`, `?` or `!` in a word, with the word split around it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub mark: Mark,
    pub prefix: Side<'a>,
    pub suffix: Side<'a>,
}

impl<'a> Candidate<'a> {
    /// Locate the candidate mark, if the word contains one
    pub fn find(word: &'a str) -> Option<Self> {
        let pos = word.rfind(|ch: char| matches!(ch, '.' | '?' | '!'))?;
        let mark = word[pos..].chars().next().and_then(Mark::from_char)?;

        Some(Self {
            mark,
            prefix: Side::from_part(&word[..pos]),
            suffix: Side::from_part(&word[pos + 1..]),
        })
    }
}

/// Everything the decision cascade may look at for one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow<'a> {
    pub mark: Mark,
    pub minus2: Slot<'a>,
    pub minus1: Slot<'a>,
    pub prefix: Side<'a>,
    pub suffix: Side<'a>,
    pub plus1: Slot<'a>,
    pub plus2: Slot<'a>,
}

impl<'a> ContextWindow<'a> {
    /// Build the window for `words[index]`; `None` when that word carries no candidate
    pub fn extract(words: &[&'a str], index: usize) -> Option<Self> {
        let candidate = Candidate::find(*words.get(index)?)?;

        let (minus2, minus1) = match index {
            0 => (Slot::Absent, Slot::Absent),
            1 => (Slot::Absent, Slot::Word(words[0])),
            _ => (Slot::Word(words[index - 2]), Slot::Word(words[index - 1])),
        };
        let plus1 = words.get(index + 1).copied().map_or(Slot::Absent, Slot::Word);
        let plus2 = if plus1.is_absent() {
            Slot::Absent
        } else {
            words.get(index + 2).copied().map_or(Slot::Absent, Slot::Word)
        };

        Some(Self {
            mark: candidate.mark,
            minus2,
            minus1,
            prefix: candidate.prefix,
            suffix: candidate.suffix,
            plus1,
            plus2,
        })
    }

    /// Capitalization of each slot in window order: minus2, minus1, prefix, suffix, plus1, plus2
    pub fn capitalization(&self) -> [Capitalization; 6] {
        [
            self.minus2.capitalization(),
            self.minus1.capitalization(),
            self.prefix.capitalization(),
            self.suffix.capitalization(),
            self.plus1.capitalization(),
            self.plus2.capitalization(),
        ]
    }

    /// Nothing follows the candidate word inside the paragraph
    pub fn at_paragraph_end(&self) -> bool {
        self.plus1.is_absent() && self.plus2.is_absent()
    }
}

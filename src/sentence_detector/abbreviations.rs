// WHY: closed lexical sets consulted by the period cascade
// Honorifics come from a user-supplied list; terminals and timezones are fixed.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use crate::error::SplitterError;

/// Suffix titles that end a sentence even when a capitalized word follows
pub const TERMINAL_ABBREVIATIONS: &[&str] = &["Esq", "Jr", "Sr", "M.D"];

/// Common timezone abbreviations that may follow "a.m." / "p.m." mid-sentence
pub const TIME_ZONES: &[&str] = &[
    "UTC", "UT", "TAI", "GMT", "BST", "IST", "WET", "WEST", "CET", "CEST", "EET", "EEST",
    "MSK", "MSD", "AST", "ADT", "EST", "EDT", "ET", "CST", "CDT", "CT", "MST", "MDT", "MT",
    "PST", "PDT", "PT", "HST", "AKST", "AKDT", "AEST", "AEDT", "ACST", "ACDT", "AWST",
];

/// Title abbreviations, each stored with its trailing period (e.g. "Mr.")
#[derive(Debug, Clone, Default)]
pub struct HonorificSet {
    entries: HashSet<String>,
}

impl HonorificSet {
    /// Build from in-memory lines; surrounding whitespace is trimmed and blank lines skipped
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        Self { entries }
    }

    /// Load the honorific list from a file, one entry per line
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SplitterError> {
        let path = path.as_ref();
        debug!("Loading honorifics from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| SplitterError::Configuration {
            path: path.to_path_buf(),
            source,
        })?;

        let set = Self::from_lines(content.lines());
        info!("Loaded {} honorifics from {}", set.len(), path.display());
        Ok(set)
    }

    /// Exact-string membership, period included
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lookup over every abbreviation set the boundary rules consult
pub struct AbbreviationChecker {
    honorifics: HonorificSet,
    terminals: HashSet<&'static str>,
    time_zones: HashSet<&'static str>,
}

impl AbbreviationChecker {
    pub fn new(honorifics: HonorificSet) -> Self {
        Self {
            honorifics,
            terminals: TERMINAL_ABBREVIATIONS.iter().copied().collect(),
            time_zones: TIME_ZONES.iter().copied().collect(),
        }
    }

    /// Check whether `stem` followed by a period is a known honorific
    pub fn is_honorific_stem(&self, stem: &str) -> bool {
        let mut probe = String::with_capacity(stem.len() + 1);
        probe.push_str(stem);
        probe.push('.');
        self.honorifics.contains(&probe)
    }

    /// Check whether a period prefix is a suffix title such as "Jr"
    pub fn is_terminal(&self, prefix: &str) -> bool {
        self.terminals.contains(prefix)
    }

    pub fn is_time_zone(&self, word: &str) -> bool {
        self.time_zones.contains(word)
    }

    pub fn honorifics(&self) -> &HonorificSet {
        &self.honorifics
    }
}

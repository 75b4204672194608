// WHY: construction is the only fallible step of the splitter; classification itself never errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a [`crate::SentenceSplitter`]
#[derive(Error, Debug)]
pub enum SplitterError {
    /// Honorific list is missing or unreadable
    #[error("honorific list {} is unavailable: {source}", .path.display())]
    Configuration {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Initials pattern failed to compile into a DFA
    #[error("failed to compile initials pattern: {0}")]
    Pattern(#[from] regex_automata::dfa::dense::BuildError),
}

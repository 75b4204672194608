pub mod error;
pub mod output;
pub mod pipeline;
pub mod reader;
pub mod sentence_detector;

// Re-export main types for convenient access
pub use error::SplitterError;
pub use sentence_detector::{
    Decision,
    HonorificSet,
    SentenceSplitter,
    SplitStats,
    Verdict,
};

// Re-export batch processing types for the CLI and benchmarks
pub use output::OutputLayout;
pub use pipeline::{process_files, FileStats, PipelineConfig, RunStats};

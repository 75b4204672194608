// WHY: batch driver; each document is read, split and written independently
// Documents share one read-only splitter; results come back in input order.

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tracing::{info, warn};

use crate::output::{self, OutputLayout};
use crate::reader::{Document, DocumentReader, ReadStats, ReaderConfig};
use crate::sentence_detector::{SentenceSplitter, SplitStats};

/// Batch processing options
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum documents in flight at once
    pub jobs: usize,
    /// Abort the run on the first failed document
    pub fail_fast: bool,
    /// Directory for sentence files; defaults to each input's directory
    pub output_dir: Option<PathBuf>,
    pub layout: OutputLayout,
    /// Print sentences to stdout instead of writing sentence files
    pub to_stdout: bool,
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            jobs: num_cpus::get().max(1),
            fail_fast: false,
            output_dir: None,
            layout: OutputLayout::default(),
            to_stdout: false,
            show_progress: false,
        }
    }
}

/// Per-document processing statistics
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FileStats {
    /// Input path as given, or `<stdin>`
    pub path: String,
    /// Where the sentences went, if written to a file
    pub output_path: Option<String>,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub read_time_ms: u64,
    pub paragraphs: usize,
    pub candidates: usize,
    pub sentences: usize,
    pub processing_time_ms: u64,
    /// success or failed
    pub status: String,
    pub error: Option<String>,
}

/// Whole-run report, serialized by `--stats-out`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RunStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_sentences: usize,
    pub total_time_ms: u64,
    pub files: Vec<FileStats>,
}

impl FileStats {
    fn record_read(&mut self, read_stats: &ReadStats) {
        self.lines_read = read_stats.lines_read;
        self.bytes_read = read_stats.bytes_read;
        self.read_time_ms = read_stats.duration_ms;
    }
}

impl RunStats {
    fn from_files(files: Vec<FileStats>, total_time_ms: u64) -> Self {
        let files_failed = files.iter().filter(|f| f.error.is_some()).count();
        Self {
            files_processed: files.len() - files_failed,
            files_failed,
            total_sentences: files.iter().map(|f| f.sentences).sum(),
            total_time_ms,
            files,
        }
    }

    /// Write the report as pretty JSON
    pub async fn write_json(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write stats file {}", path.display()))?;
        Ok(())
    }
}

/// Split a document that is already in memory, off the async executor
pub async fn split_document(splitter: Arc<SentenceSplitter>, lines: Vec<String>) -> Result<(Vec<String>, SplitStats)> {
    let result = tokio::task::spawn_blocking(move || splitter.split_lines_with_stats(&lines)).await?;
    Ok(result)
}

/// Process every input path and return the run report
pub async fn process_files(
    splitter: Arc<SentenceSplitter>,
    inputs: &[PathBuf],
    config: &PipelineConfig,
) -> Result<RunStats> {
    let start_time = Instant::now();
    // stdout output must not interleave between documents
    let jobs = if config.to_stdout { 1 } else { config.jobs.max(1) };
    info!("Processing {} documents with {} jobs", inputs.len(), jobs);

    let progress = if config.show_progress {
        let bar = ProgressBar::new(inputs.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Some(bar)
    } else {
        None
    };

    let reader = Arc::new(DocumentReader::new(ReaderConfig {
        fail_fast: config.fail_fast,
        ..ReaderConfig::default()
    }));

    let files: Vec<FileStats> = stream::iter(inputs.iter().cloned())
        .map(|path| {
            let splitter = Arc::clone(&splitter);
            let reader = Arc::clone(&reader);
            let progress = progress.clone();
            async move {
                let stats = process_file(splitter, &reader, &path, config).await;
                if let Some(bar) = &progress {
                    bar.set_message(path.display().to_string());
                    bar.inc(1);
                }
                stats
            }
        })
        .buffered(jobs)
        .try_collect()
        .await?;

    if let Some(bar) = progress {
        bar.finish_with_message("done");
    }

    let run = RunStats::from_files(files, start_time.elapsed().as_millis() as u64);
    info!(
        "Processed {} documents ({} failed), {} sentences in {}ms",
        run.files_processed, run.files_failed, run.total_sentences, run.total_time_ms
    );
    Ok(run)
}

/// Split standard input and print its sentences to standard output
pub async fn process_stdin(splitter: Arc<SentenceSplitter>, config: &PipelineConfig) -> Result<RunStats> {
    let input = BufReader::with_capacity(ReaderConfig::default().buffer_size, tokio::io::stdin());
    process_stream(splitter, input, "<stdin>", tokio::io::stdout(), config).await
}

/// Split one document read from `input` and write its sentences to `output`
/// Read and write failures abort regardless of fail_fast.
pub async fn process_stream<R, W>(
    splitter: Arc<SentenceSplitter>,
    input: R,
    source: &str,
    output: W,
    config: &PipelineConfig,
) -> Result<RunStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let start_time = Instant::now();
    let reader = DocumentReader::new(ReaderConfig { fail_fast: true, ..ReaderConfig::default() });
    let document = reader.read_from(input, source.to_string()).await?;

    let mut stats = FileStats {
        path: document.stats.source.clone(),
        ..FileStats::default()
    };
    stats.record_read(&document.stats);

    let (sentences, split_stats) = split_document(splitter, document.lines).await?;
    output::write_sentences(output, &sentences, config.layout).await?;

    stats.paragraphs = split_stats.paragraphs;
    stats.candidates = split_stats.candidates;
    stats.sentences = sentences.len();
    stats.processing_time_ms = start_time.elapsed().as_millis() as u64;
    stats.status = "success".to_string();

    Ok(RunStats::from_files(vec![stats], start_time.elapsed().as_millis() as u64))
}

/// Read, split and write one document
/// Without fail_fast, errors are recorded in the returned stats instead of propagated.
pub async fn process_file(
    splitter: Arc<SentenceSplitter>,
    reader: &DocumentReader,
    path: &Path,
    config: &PipelineConfig,
) -> Result<FileStats> {
    let start_time = Instant::now();
    let mut stats = FileStats {
        path: path.display().to_string(),
        ..FileStats::default()
    };

    let outcome = run_document(splitter, reader, path, config, &mut stats).await;
    stats.processing_time_ms = start_time.elapsed().as_millis() as u64;

    match outcome {
        Ok(()) => {
            stats.status = "success".to_string();
            Ok(stats)
        }
        Err(e) if !config.fail_fast => {
            warn!("Failed to process {}: {:#}", path.display(), e);
            stats.status = "failed".to_string();
            stats.error = Some(format!("{e:#}"));
            Ok(stats)
        }
        Err(e) => Err(e),
    }
}

async fn run_document(
    splitter: Arc<SentenceSplitter>,
    reader: &DocumentReader,
    path: &Path,
    config: &PipelineConfig,
    stats: &mut FileStats,
) -> Result<()> {
    let Document { lines, stats: read_stats } = reader.read_path(path).await?;
    stats.record_read(&read_stats);
    if let Some(error) = read_stats.read_error {
        anyhow::bail!(error);
    }

    let (sentences, split_stats) = split_document(splitter, lines).await?;
    stats.paragraphs = split_stats.paragraphs;
    stats.candidates = split_stats.candidates;
    stats.sentences = sentences.len();

    if config.to_stdout {
        output::write_sentences(tokio::io::stdout(), &sentences, config.layout).await?;
    } else {
        let output_path = output::generate_output_path(path, config.output_dir.as_deref());
        output::write_sentence_file(&output_path, &sentences, config.layout).await?;
        stats.output_path = Some(output_path.display().to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence_detector::HonorificSet;
    use tempfile::TempDir;

    fn splitter() -> Arc<SentenceSplitter> {
        Arc::new(SentenceSplitter::new(HonorificSet::from_lines(["Mr."])).unwrap())
    }

    #[tokio::test]
    async fn test_split_document_off_executor() {
        let lines = vec!["Mr. Smith came.".to_string(), "He sat.".to_string()];
        let (sentences, stats) = split_document(splitter(), lines).await.unwrap();
        assert_eq!(sentences, vec!["Mr. Smith came.", "He sat."]);
        assert_eq!(stats.paragraphs, 1);
    }

    #[tokio::test]
    async fn test_run_stats_totals() {
        let files = vec![
            FileStats { sentences: 3, status: "success".into(), ..Default::default() },
            FileStats { sentences: 0, status: "failed".into(), error: Some("boom".into()), ..Default::default() },
        ];
        let run = RunStats::from_files(files, 12);
        assert_eq!(run.files_processed, 1);
        assert_eq!(run.files_failed, 1);
        assert_eq!(run.total_sentences, 3);

        let temp_dir = TempDir::new().unwrap();
        let stats_path = temp_dir.path().join("stats.json");
        run.write_json(&stats_path).await.unwrap();
        let parsed: RunStats = serde_json::from_str(&std::fs::read_to_string(&stats_path).unwrap()).unwrap();
        assert_eq!(parsed.files.len(), 2);
        assert_eq!(parsed.total_time_ms, 12);
    }

    #[tokio::test]
    async fn test_process_stream_writes_sentences_to_sink() {
        let mut sink: Vec<u8> = Vec::new();
        let input = &b"Mr. Smith came.\r\nHe sat.\n\nThen rain"[..];

        let config = PipelineConfig { layout: OutputLayout::Blocks, ..PipelineConfig::default() };
        let run = process_stream(splitter(), input, "memory", &mut sink, &config).await.unwrap();

        assert_eq!(String::from_utf8(sink).unwrap(), "Mr. Smith came.\n\nHe sat.\n\nThen rain\n\n");
        assert_eq!(run.files_processed, 1);
        assert_eq!(run.total_sentences, 3);

        let stats = &run.files[0];
        assert_eq!(stats.path, "memory");
        assert_eq!(stats.lines_read, 4);
        assert_eq!(stats.bytes_read, input.len() as u64);
        assert_eq!(stats.paragraphs, 2);
        assert!(stats.read_time_ms <= stats.processing_time_ms);
        assert!(stats.output_path.is_none());
        assert_eq!(stats.status, "success");
    }

    #[tokio::test]
    async fn test_process_stream_rejects_invalid_utf8() {
        let mut sink: Vec<u8> = Vec::new();
        let result = process_stream(splitter(), &b"ok\n\xFF\n"[..], "memory", &mut sink, &PipelineConfig::default()).await;

        assert!(result.is_err());
        assert!(sink.is_empty());
    }
}

use anyhow::Result;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// Configuration for document reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether to fail fast on first error or record it and continue
    pub fail_fast: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics for one document read
#[derive(Debug, Clone, Default)]
pub struct ReadStats {
    pub source: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

/// A document held fully in memory as lines, line terminators removed
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub lines: Vec<String>,
    pub stats: ReadStats,
}

/// Async reader that loads whole documents line by line
pub struct DocumentReader {
    config: ReaderConfig,
}

impl DocumentReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a document from disk
    /// Without fail_fast, open and decode errors are recorded in the returned stats
    pub async fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let path = path.as_ref();
        let source = path.display().to_string();

        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) => {
                let error_msg = format!("Failed to open file {source}: {e}");
                return self.failed(Document::default(), source, error_msg);
            }
        };

        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        self.read_from(reader, source).await
    }

    /// Read every line from any buffered async source
    pub async fn read_from<R>(&self, mut reader: R, source: String) -> Result<Document>
    where
        R: AsyncBufRead + Unpin,
    {
        let start_time = std::time::Instant::now();
        debug!("Starting async read of {}", source);

        let mut document = Document::default();
        let mut line = String::new();

        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => break,
                Ok(byte_count) => {
                    document.stats.bytes_read += byte_count as u64;
                    document.stats.lines_read += 1;
                    document.lines.push(strip_line_ending(&line).to_string());
                }
                Err(e) => {
                    let error_msg = format!(
                        "Read error in {} at line {}: {}",
                        source,
                        document.stats.lines_read + 1,
                        e
                    );
                    document.stats.duration_ms = start_time.elapsed().as_millis() as u64;
                    return self.failed(document, source, error_msg);
                }
            }
        }

        document.stats.source = source;
        document.stats.duration_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Read {}: {} lines, {} bytes in {}ms",
            document.stats.source,
            document.stats.lines_read,
            document.stats.bytes_read,
            document.stats.duration_ms
        );
        Ok(document)
    }

    fn failed(&self, mut document: Document, source: String, error_msg: String) -> Result<Document> {
        warn!("{}", error_msg);
        if self.config.fail_fast {
            anyhow::bail!(error_msg);
        }
        document.stats.source = source;
        document.stats.read_error = Some(error_msg);
        Ok(document)
    }
}

/// Drop a trailing "\n" or "\r\n"; a lone "\r" is line content
fn strip_line_ending(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::fs;

    async fn create_test_file(dir: &Path, name: &str, content: &[u8]) -> std::path::PathBuf {
        let file_path = dir.join(name);
        fs::write(&file_path, content).await.expect("Failed to write test file");
        file_path
    }

    #[tokio::test]
    async fn test_read_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader = DocumentReader::new(ReaderConfig::default());

        let file_path = create_test_file(temp_dir.path(), "doc.txt", b"Line 1\r\nLine 2\n\nLine 4").await;
        let document = reader.read_path(&file_path).await.unwrap();

        assert_eq!(document.lines, vec!["Line 1", "Line 2", "", "Line 4"]);
        assert_eq!(document.stats.lines_read, 4);
        assert!(document.stats.read_error.is_none());
    }

    #[tokio::test]
    async fn test_read_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader = DocumentReader::new(ReaderConfig::default());

        let file_path = create_test_file(temp_dir.path(), "empty.txt", b"").await;
        let document = reader.read_path(&file_path).await.unwrap();

        assert!(document.lines.is_empty());
        assert_eq!(document.stats.bytes_read, 0);
        assert!(document.stats.read_error.is_none());
    }

    #[tokio::test]
    async fn test_read_nonexistent_file_records_error() {
        let temp_dir = TempDir::new().unwrap();
        let reader = DocumentReader::new(ReaderConfig { fail_fast: false, ..Default::default() });

        let document = reader.read_path(temp_dir.path().join("missing.txt")).await.unwrap();
        assert!(document.lines.is_empty());
        assert!(document.stats.read_error.is_some());
        assert!(document.stats.source.ends_with("missing.txt"));
    }

    #[tokio::test]
    async fn test_read_nonexistent_file_fail_fast() {
        let temp_dir = TempDir::new().unwrap();
        let reader = DocumentReader::new(ReaderConfig { fail_fast: true, ..Default::default() });

        let result = reader.read_path(temp_dir.path().join("missing.txt")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_utf8_keeps_partial_lines() {
        let temp_dir = TempDir::new().unwrap();
        let reader = DocumentReader::new(ReaderConfig::default());

        let file_path = create_test_file(temp_dir.path(), "bad.txt", b"Good line.\n\xFF\xFE bad\n").await;
        let document = reader.read_path(&file_path).await.unwrap();

        assert_eq!(document.lines, vec!["Good line."]);
        let error = document.stats.read_error.expect("decode error should be recorded");
        assert!(error.contains("line 2"), "got: {error}");
    }

    #[tokio::test]
    async fn test_read_from_in_memory_source() {
        let reader = DocumentReader::new(ReaderConfig::default());

        let document = reader
            .read_from(&b"first\nsecond line\n"[..], "memory".to_string())
            .await
            .unwrap();
        assert_eq!(document.lines, vec!["first", "second line"]);
        assert_eq!(document.stats.source, "memory");
    }

    #[tokio::test]
    async fn test_bytes_read_counts_consumed_bytes() {
        let reader = DocumentReader::new(ReaderConfig::default());

        for content in [
            &b"Line 1\r\nLine 2\n\nLine 4"[..],
            &b"crlf\r\nonly\r\n"[..],
            &b"no newline"[..],
            &b"\n\n"[..],
        ] {
            let document = reader.read_from(content, "memory".to_string()).await.unwrap();
            assert_eq!(document.stats.bytes_read, content.len() as u64, "for {content:?}");
        }
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("text\r\n"), "text");
        assert_eq!(strip_line_ending("text\n"), "text");
        assert_eq!(strip_line_ending("text"), "text");
        assert_eq!(strip_line_ending("text\r"), "text\r");
    }
}

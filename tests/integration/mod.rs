// Integration test utilities and common code
// WHY: shared fixtures keep document and honorific setup identical across tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Honorifics used by every integration test
pub const TEST_HONORIFICS: &[&str] = &["Mr.", "Mrs.", "Ms.", "Dr.", "Prof.", "St.", "Gen."];

/// Test fixture helper for creating temporary directories with documents
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self { temp_dir, root_path }
    }

    /// Create a document with given content
    pub fn create_document<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test document");
        file_path
    }

    /// Write the standard honorific list and return its path
    pub fn create_honorifics(&self) -> PathBuf {
        self.create_document("honorifics.txt", &TEST_HONORIFICS.join("\n"))
    }

    /// Read the sentence file produced for a source document
    pub fn read_output<P: AsRef<Path>>(&self, source_path: P) -> String {
        let source_path = source_path.as_ref();
        let stem = source_path.file_stem().and_then(|s| s.to_str()).unwrap_or("unknown");
        let output_path = source_path.with_file_name(format!("{stem}_sentences.txt"));
        fs::read_to_string(&output_path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", output_path.display()))
    }
}

/// Compare two strings line by line, providing detailed diff on mismatch
pub fn assert_golden_lines(actual: &str, expected: &str, context: &str) {
    let actual_lines: Vec<&str> = actual.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();

    if actual_lines.len() != expected_lines.len() {
        panic!(
            "{}: Line count mismatch. Expected {} lines, got {} lines\nActual:\n{}",
            context,
            expected_lines.len(),
            actual_lines.len(),
            actual
        );
    }

    for (i, (actual_line, expected_line)) in actual_lines.iter().zip(expected_lines.iter()).enumerate() {
        if actual_line != expected_line {
            panic!(
                "{}: Line {} mismatch\nExpected: {}\nActual:   {}",
                context,
                i + 1,
                expected_line,
                actual_line
            );
        }
    }
}

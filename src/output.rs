//! Result types returned by the conversion driver.

use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Statistics for one successfully written PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Blocks produced by the parser.
    pub blocks: usize,
    /// Pages in the written PDF.
    pub pages: usize,
    /// Size of the written PDF.
    pub bytes: u64,
    pub duration_ms: u64,
}

/// Outcome for one file of a folder batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Set when the PDF was written.
    pub report: Option<FileReport>,
    /// The output already existed and `skip_existing` was on.
    pub skipped: bool,
    /// Set when the file failed.
    pub error: Option<FileError>,
}

impl FileResult {
    pub fn is_success(&self) -> bool {
        self.report.is_some()
    }
}

/// Aggregate statistics for a folder batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Files discovered in the input folder.
    pub total_files: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total_pages: usize,
    pub total_bytes: u64,
    pub duration_ms: u64,
}

/// Everything a folder conversion produced, sorted by input path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    pub files: Vec<FileResult>,
    pub stats: BatchStats,
}

impl BatchOutput {
    /// Files that failed, in input order.
    pub fn failures(&self) -> impl Iterator<Item = &FileResult> {
        self.files.iter().filter(|f| f.error.is_some())
    }
}

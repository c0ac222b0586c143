//! Error types for the summary2pdf library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Summary2PdfError`]: **Fatal**: the document (or the whole batch)
//!   cannot be produced. Missing style entries and unresolvable layout
//!   conflicts land here, as do unreadable inputs and failed writes.
//!
//! * [`FileError`]: **Non-fatal**: a single file in a folder batch failed
//!   but the others are fine. Stored inside [`crate::output::FileResult`]
//!   so callers can inspect partial success.
//!
//! The parser has no error type at all: malformed markup always degrades to
//! paragraph text.

use crate::block::BlockKind;
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the summary2pdf library.
#[derive(Debug, Error)]
pub enum Summary2PdfError {
    // ── Configuration errors ──────────────────────────────────────────────
    /// A block kind present in the input has no style and no fallback is set.
    #[error("No style defined for block kind '{kind}' and no fallback style is configured")]
    MissingStyle { kind: BlockKind },

    /// Builder or style validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A style file could not be parsed.
    #[error("Failed to parse style file '{path}': {source}")]
    StyleParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // ── Render errors ─────────────────────────────────────────────────────
    /// Block content cannot be laid out under the configured constraints.
    #[error("Block {block} ({kind}) cannot be laid out: {detail}")]
    LayoutOverflow {
        block: usize,
        kind: BlockKind,
        detail: String,
    },

    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Summary file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file is not valid UTF-8 text.
    #[error("Summary file '{path}' is not valid UTF-8 text")]
    InvalidUtf8 { path: PathBuf },

    /// The folder to scan for summaries does not exist.
    #[error("Input folder '{path}' does not exist.\nCreate it and add your summary files.")]
    InputDirNotFound { path: PathBuf },

    /// The folder exists but holds no matching summary files.
    #[error("No .{extension} files found in '{path}'")]
    NoInputFiles { path: PathBuf, extension: String },

    /// Every file in a batch failed; nothing was written.
    #[error("All {total} files failed.\nFirst error: {first_error}")]
    AllFilesFailed { total: usize, first_error: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// lopdf refused to serialise the document.
    #[error("Failed to serialise PDF: {0}")]
    PdfWrite(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Summary2PdfError {
    /// True for caller-supplied configuration mistakes (bad or incomplete style).
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Summary2PdfError::MissingStyle { .. }
                | Summary2PdfError::InvalidConfig(_)
                | Summary2PdfError::StyleParse { .. }
        )
    }

    /// True when content could not be laid out on the page.
    pub fn is_render_error(&self) -> bool {
        matches!(self, Summary2PdfError::LayoutOverflow { .. })
    }
}

/// A non-fatal error for a single file in a folder batch.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum FileError {
    /// Reading the summary failed.
    #[error("{input}: read failed: {detail}")]
    ReadFailed { input: PathBuf, detail: String },

    /// Style resolution or layout failed.
    #[error("{input}: render failed: {detail}")]
    RenderFailed { input: PathBuf, detail: String },

    /// The PDF could not be written.
    #[error("{input}: write failed: {detail}")]
    WriteFailed { input: PathBuf, detail: String },
}

impl FileError {
    /// Classify a fatal per-file error into its batch-level form.
    pub fn from_fatal(input: PathBuf, err: &Summary2PdfError) -> Self {
        let detail = err.to_string();
        match err {
            Summary2PdfError::FileNotFound { .. }
            | Summary2PdfError::PermissionDenied { .. }
            | Summary2PdfError::InvalidUtf8 { .. } => FileError::ReadFailed { input, detail },
            Summary2PdfError::OutputWriteFailed { .. } | Summary2PdfError::PdfWrite(_) => {
                FileError::WriteFailed { input, detail }
            }
            _ => FileError::RenderFailed { input, detail },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_style_display_names_kind() {
        let e = Summary2PdfError::MissingStyle {
            kind: BlockKind::Heading(2),
        };
        assert!(e.to_string().contains("'h2'"), "got: {e}");
        assert!(e.is_configuration_error());
        assert!(!e.is_render_error());
    }

    #[test]
    fn layout_overflow_is_render_error() {
        let e = Summary2PdfError::LayoutOverflow {
            block: 4,
            kind: BlockKind::Quote,
            detail: "word too wide".into(),
        };
        assert!(e.is_render_error());
        assert!(e.to_string().contains("Block 4 (quote)"));
    }

    #[test]
    fn all_files_failed_display() {
        let e = Summary2PdfError::AllFilesFailed {
            total: 3,
            first_error: "boom".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("All 3 files"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn file_error_classification() {
        let input = PathBuf::from("a.txt");
        let read = FileError::from_fatal(
            input.clone(),
            &Summary2PdfError::InvalidUtf8 {
                path: input.clone(),
            },
        );
        assert!(matches!(read, FileError::ReadFailed { .. }));

        let render = FileError::from_fatal(
            input.clone(),
            &Summary2PdfError::MissingStyle {
                kind: BlockKind::Quote,
            },
        );
        assert!(matches!(render, FileError::RenderFailed { .. }));

        let write = FileError::from_fatal(input, &Summary2PdfError::PdfWrite("x".into()));
        assert!(matches!(write, FileError::WriteFailed { .. }));
    }
}

//! Conversion entry points: text, single file and whole folder.
//!
//! [`convert_text`] is the pure core (normalise → parse → render).
//! [`convert_file`] adds reading and an atomic PDF write. [`convert_folder`]
//! discovers summaries and converts them concurrently, recording per-file
//! failures instead of aborting the batch.

use crate::config::ConversionConfig;
use crate::document::Document;
use crate::error::{FileError, Summary2PdfError};
use crate::output::{BatchOutput, BatchStats, FileReport, FileResult};
use crate::pipeline::{parse, pdf, render};
use crate::style::StyleConfig;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Stem suffix the summariser scripts append to raw output files.
pub const DEFAULT_RAW_SUFFIX: &str = "_raw";

/// Convert summary text to a rendered document.
pub fn convert_text(raw: &str, style: &StyleConfig) -> Result<Document, Summary2PdfError> {
    let blocks = parse::parse_document(raw);
    debug!("Parsed {} blocks", blocks.len());
    render::render(&blocks, style)
}

/// Read a summary file as UTF-8 text.
pub fn read_summary(path: &Path) -> Result<String, Summary2PdfError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Summary2PdfError::FileNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => Summary2PdfError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Summary2PdfError::Internal(format!("reading {}: {e}", path.display())),
    })?;
    String::from_utf8(bytes).map_err(|_| Summary2PdfError::InvalidUtf8 {
        path: path.to_path_buf(),
    })
}

/// Convert one summary file and write the PDF atomically.
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    style: &StyleConfig,
) -> Result<FileReport, Summary2PdfError> {
    let start = Instant::now();
    let (input, output) = (input.as_ref(), output.as_ref());

    let raw = read_summary(input)?;
    let blocks = parse::parse_document(&raw);
    let doc = render::render(&blocks, style)?;
    let bytes = pdf::write_pdf(&doc, output)?;

    let report = FileReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        blocks: blocks.len(),
        pages: doc.page_count(),
        bytes,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Converted {} → {} ({} blocks, {} pages, {} bytes)",
        input.display(),
        output.display(),
        report.blocks,
        report.pages,
        report.bytes
    );
    Ok(report)
}

/// Output path for `input`: its stem without a trailing `_raw`, plus `.pdf`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    output_path_with_suffix(input, output_dir, DEFAULT_RAW_SUFFIX)
}

/// Like [`output_path_for`] with a custom stem suffix.
pub fn output_path_with_suffix(input: &Path, output_dir: &Path, raw_suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "summary".to_string());
    let stem = match stem.strip_suffix(raw_suffix) {
        Some(base) if !raw_suffix.is_empty() && !base.is_empty() => base.to_string(),
        _ => stem,
    };
    output_dir.join(format!("{stem}.pdf"))
}

/// Files in `dir` with the given extension (case-insensitive), sorted by path.
pub async fn discover_inputs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, Summary2PdfError> {
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Summary2PdfError::InputDirNotFound {
            path: dir.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => Summary2PdfError::PermissionDenied {
            path: dir.to_path_buf(),
        },
        std::io::ErrorKind::NotADirectory => Summary2PdfError::InvalidConfig(format!(
            "input path {} is not a folder",
            dir.display()
        )),
        _ => Summary2PdfError::Internal(format!("listing {}: {e}", dir.display())),
    })?;
    let mut inputs = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Summary2PdfError::Internal(format!("listing {}: {e}", dir.display())))?
    {
        let path = entry.path();
        let matches = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension));
        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        if matches && is_file {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Convert every summary in `config.input_dir` into `config.output_dir`.
///
/// Returns `Ok` when at least one file converted (or every file was
/// skipped); check [`BatchOutput::failures`] for partial failure.
///
/// # Errors
/// - [`Summary2PdfError::InputDirNotFound`] / [`Summary2PdfError::NoInputFiles`]
/// - [`Summary2PdfError::OutputWriteFailed`] when the output folder cannot be created
/// - [`Summary2PdfError::AllFilesFailed`] when nothing converted
pub async fn convert_folder(config: &ConversionConfig) -> Result<BatchOutput, Summary2PdfError> {
    let start = Instant::now();
    info!(
        "Converting summaries: {} → {}",
        config.input_dir.display(),
        config.output_dir.display()
    );

    let inputs = discover_inputs(&config.input_dir, &config.extension).await?;
    if inputs.is_empty() {
        return Err(Summary2PdfError::NoInputFiles {
            path: config.input_dir.clone(),
            extension: config.extension.clone(),
        });
    }
    let total_files = inputs.len();
    debug!("Found {} summary file(s)", total_files);

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|e| Summary2PdfError::OutputWriteFailed {
            path: config.output_dir.clone(),
            source: e,
        })?;

    let mut results = Vec::with_capacity(total_files);
    let mut pending = Vec::new();
    let mut collisions = Vec::new();
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    for input in inputs {
        let output = output_path_with_suffix(&input, &config.output_dir, &config.raw_suffix);
        if let Some(first) = claimed.get(&output) {
            let detail = format!(
                "output {} collides with {}",
                output.display(),
                first.display()
            );
            warn!("Not converting {}: {}", input.display(), detail);
            collisions.push(FileResult {
                error: Some(FileError::WriteFailed {
                    input: input.clone(),
                    detail,
                }),
                input,
                output,
                report: None,
                skipped: false,
            });
            continue;
        }
        claimed.insert(output.clone(), input.clone());
        if config.skip_existing && tokio::fs::try_exists(&output).await.unwrap_or(false) {
            debug!("Skipping {}: output exists", input.display());
            results.push(FileResult {
                input,
                output,
                report: None,
                skipped: true,
                error: None,
            });
        } else {
            pending.push((input, output));
        }
    }

    let attempted = pending.len() + collisions.len();
    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(attempted);
        for c in &collisions {
            if let Some(ref e) = c.error {
                cb.on_file_error(&c.input, &e.to_string());
            }
        }
    }
    results.extend(collisions);

    let style = Arc::new(config.style.clone());
    let converted: Vec<FileResult> = stream::iter(pending.into_iter().map(|(input, output)| {
        let style = Arc::clone(&style);
        let cb = config.progress_callback.clone();
        async move {
            if let Some(ref cb) = cb {
                cb.on_file_start(&input);
            }
            let task = {
                let (input, output) = (input.clone(), output.clone());
                tokio::task::spawn_blocking(move || convert_file(&input, &output, &style))
            };
            let outcome = task
                .await
                .map_err(|e| Summary2PdfError::Internal(format!("Conversion task panicked: {e}")))
                .and_then(|r| r);

            match outcome {
                Ok(report) => {
                    if let Some(ref cb) = cb {
                        cb.on_file_complete(&input, report.pages);
                    }
                    FileResult {
                        input,
                        output,
                        report: Some(report),
                        skipped: false,
                        error: None,
                    }
                }
                Err(e) => {
                    warn!("Failed to convert {}: {}", input.display(), e);
                    if let Some(ref cb) = cb {
                        cb.on_file_error(&input, &e.to_string());
                    }
                    FileResult {
                        error: Some(FileError::from_fatal(input.clone(), &e)),
                        input,
                        output,
                        report: None,
                        skipped: false,
                    }
                }
            }
        }
    }))
    .buffer_unordered(config.concurrency)
    .collect()
    .await;

    results.extend(converted);
    results.sort_by(|a, b| a.input.cmp(&b.input));

    let reports = || results.iter().filter_map(|r| r.report.as_ref());
    let stats = BatchStats {
        total_files,
        converted: reports().count(),
        skipped: results.iter().filter(|r| r.skipped).count(),
        failed: results.iter().filter(|r| r.error.is_some()).count(),
        total_pages: reports().map(|r| r.pages).sum(),
        total_bytes: reports().map(|r| r.bytes).sum(),
        duration_ms: start.elapsed().as_millis() as u64,
    };

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(attempted, stats.converted);
    }

    if attempted > 0 && stats.converted == 0 {
        let first_error = results
            .iter()
            .find_map(|r| r.error.as_ref())
            .map(|e| e.to_string())
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(Summary2PdfError::AllFilesFailed {
            total: attempted,
            first_error,
        });
    }

    info!(
        "Batch complete: {} converted, {} skipped, {} failed, {}ms",
        stats.converted, stats.skipped, stats.failed, stats.duration_ms
    );

    Ok(BatchOutput {
        files: results,
        stats,
    })
}

/// Synchronous wrapper around [`convert_folder`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_folder_sync(config: &ConversionConfig) -> Result<BatchOutput, Summary2PdfError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Summary2PdfError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert_folder(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;
    use crate::style::Theme;
    use tempfile::TempDir;

    #[test]
    fn output_name_strips_raw_suffix() {
        let out = Path::new("formatted_summaries");
        assert_eq!(
            output_path_for(Path::new("raw_summaries/dune_raw.txt"), out),
            out.join("dune.pdf")
        );
        assert_eq!(
            output_path_for(Path::new("emma.txt"), out),
            out.join("emma.pdf")
        );
        // a stem that is only the suffix keeps it
        assert_eq!(output_path_for(Path::new("_raw.txt"), out), out.join("_raw.pdf"));
        assert_eq!(
            output_path_with_suffix(Path::new("a-draft.txt"), out, "-draft"),
            out.join("a.pdf")
        );
    }

    #[test]
    fn convert_text_runs_whole_pipeline() {
        let doc = convert_text(
            "```markdown\n# BOOK SUMMARY: Dune\n\nIntro.\n- one\n- two\n```",
            &StyleConfig::preset(Theme::Standard),
        )
        .unwrap();
        assert_eq!(doc.title.as_deref(), Some("Dune"));
        assert_eq!(doc.page_count(), 1);
        let kinds: Vec<_> = doc.placed_blocks().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Heading(1),
                BlockKind::Paragraph,
                BlockKind::BulletItem,
                BlockKind::BulletItem
            ]
        );
    }

    #[test]
    fn read_summary_classifies_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.txt");
        assert!(matches!(
            read_summary(&missing),
            Err(Summary2PdfError::FileNotFound { .. })
        ));

        let binary = dir.path().join("bin.txt");
        std::fs::write(&binary, [0xFF, 0xFE, 0x00, 0xC3]).unwrap();
        assert!(matches!(
            read_summary(&binary),
            Err(Summary2PdfError::InvalidUtf8 { .. })
        ));
    }

    #[test]
    fn convert_file_writes_pdf_and_reports() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("dune_raw.txt");
        std::fs::write(&input, "# Dune\n\nA desert planet.\n").unwrap();
        let output = output_path_for(&input, &dir.path().join("out"));

        let report = convert_file(&input, &output, &StyleConfig::default()).unwrap();
        assert_eq!(report.blocks, 2);
        assert_eq!(report.pages, 1);
        assert!(report.bytes > 0);
        assert!(output.ends_with("out/dune.pdf"));
        assert!(std::fs::read(&output).unwrap().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn discover_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.txt", "a.TXT", "c.md", "d.txt.bak"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.txt")).unwrap();

        let found = discover_inputs(dir.path(), "txt").await.unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.TXT", "b.txt"]);
    }

    #[test]
    fn discover_on_a_file_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("dune.txt");
        std::fs::write(&file, "x").unwrap();
        let err = tokio_test::block_on(discover_inputs(&file, "txt")).unwrap_err();
        assert!(
            matches!(err, Summary2PdfError::InvalidConfig(ref m) if m.contains("not a folder")),
            "got: {err}"
        );
    }

    #[test]
    fn discover_missing_dir_is_fatal() {
        let err = tokio_test::block_on(discover_inputs(Path::new("/definitely/not/here"), "txt"))
            .unwrap_err();
        assert!(matches!(err, Summary2PdfError::InputDirNotFound { .. }));
    }
}

//! # summary2pdf
//!
//! Turn AI-generated book summaries (plain text with light Markdown) into
//! consistently styled, paginated PDF documents.
//!
//! ## Pipeline Overview
//!
//! ```text
//! summary.txt
//!  │
//!  ├─ 1. Normalise  strip fences, CRLF, invisible Unicode
//!  ├─ 2. Parse      lines → Heading / Paragraph / BulletItem / Quote / Divider
//!  ├─ 3. Render     wrap + paginate under a StyleConfig → Document
//!  └─ 4. Write      Document → PDF bytes (lopdf, standard-14 fonts)
//! ```
//!
//! Stages 1–3 are pure and synchronous. Only the folder driver
//! ([`convert_folder`]) is async, converting several files at once.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use summary2pdf::{convert_folder, ConversionConfig, Theme};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .input_dir("raw_summaries")
//!         .output_dir("formatted_summaries")
//!         .theme(Theme::Standard)
//!         .build()?;
//!     let batch = convert_folder(&config).await?;
//!     eprintln!("{} PDFs, {} pages", batch.stats.converted, batch.stats.total_pages);
//!     Ok(())
//! }
//! ```
//!
//! Or work with blocks directly:
//!
//! ```rust
//! use summary2pdf::{parse, render, StyleConfig};
//!
//! let blocks = parse("# Dune\n\nThe spice must flow.\n\n- Arrakis\n- Caladan");
//! let doc = render(&blocks, &StyleConfig::default()).unwrap();
//! assert_eq!(doc.page_count(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `summary2pdf` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! summary2pdf = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod block;
pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod style;

pub use pipeline::{metrics, pdf};

// ── Re-exports ───────────────────────────────────────────────────────────

pub use block::{Block, BlockKind};
pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{
    convert_file, convert_folder, convert_folder_sync, convert_text, discover_inputs,
    output_path_for,
};
pub use document::{Document, Page, PlacedBlock, Primitive, Rect};
pub use error::{FileError, Summary2PdfError};
pub use output::{BatchOutput, BatchStats, FileReport, FileResult};
pub use pipeline::normalise::clean_text;
pub use pipeline::parse::{extract_title, parse, parse_document};
pub use pipeline::pdf::{to_pdf_bytes, write_pdf};
pub use pipeline::render::render;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use style::{
    Align, BlockStyle, Font, Furniture, ListStyle, OverflowPolicy, PageSetup, PageSize, Rgb,
    StyleConfig, StyleConfigBuilder, Theme,
};

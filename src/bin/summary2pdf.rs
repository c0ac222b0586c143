//! CLI binary for summary2pdf.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `StyleConfig` / `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use summary2pdf::{
    convert_file, convert_folder, convert_text, output_path_for, parse_document,
    ConversionConfig, ConversionProgressCallback, OverflowPolicy, PageSize, ProgressCallback,
    StyleConfig, Theme,
};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar for the batch plus a log line per
/// file. Files finish out of order when converted concurrently.
struct CliProgressCallback {
    bar: ProgressBar,
    start_times: Mutex<HashMap<PathBuf, Instant>>,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    /// Spinner until `on_batch_start` reports the file count.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);

        bar.set_style(spinner_style);
        bar.set_prefix("Scanning");
        bar.set_message("Looking for summaries…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
            errors: AtomicUsize::new(0),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Typesetting");
        self.bar.reset_eta();
    }

    fn elapsed_secs(&self, input: &Path) -> f64 {
        self.start_times
            .lock()
            .ok()
            .and_then(|mut m| m.remove(input))
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

fn file_label(input: &Path) -> String {
    input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string())
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_files: usize) {
        self.activate_bar(total_files);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Typesetting {total_files} summaries…"))
        ));
    }

    fn on_file_start(&self, input: &Path) {
        if let Ok(mut m) = self.start_times.lock() {
            m.insert(input.to_path_buf(), Instant::now());
        }
        self.bar.set_message(file_label(input));
    }

    fn on_file_complete(&self, input: &Path, pages: usize) {
        let secs = self.elapsed_secs(input);
        self.bar.println(format!(
            "  {} {:<40}  {:<9}  {}",
            green("✓"),
            file_label(input),
            dim(&format!("{pages:>3} pages")),
            dim(&format!("{secs:.2}s")),
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, input: &Path, error: &str) {
        let secs = self.elapsed_secs(input);
        self.errors.fetch_add(1, Ordering::SeqCst);

        let msg: String = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} {:<40}  {}  {}",
            red("✗"),
            file_label(input),
            red(&msg),
            dim(&format!("{secs:.2}s")),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        let failed = total_files.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} summaries typeset successfully",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} summaries typeset  ({} failed)",
                if failed == total_files {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&success_count.to_string()),
                total_files,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert every raw_summaries/*.txt into formatted_summaries/*.pdf
  summary2pdf

  # Same, with explicit folders and the magazine layout
  summary2pdf --folder --input-dir drafts --output-dir pdfs --theme magazine

  # One file (output defaults to dune.pdf next to dune_raw.txt)
  summary2pdf raw_summaries/dune_raw.txt

  # One file to a chosen path on US Letter paper
  summary2pdf dune_raw.txt out/dune.pdf --page-size letter

  # Custom style from JSON, failing instead of truncating oversize text
  summary2pdf --style house.json --overflow fail

  # Inspect what the parser sees
  summary2pdf --dump-blocks dune_raw.txt

  # Layout as JSON (pages, frames, primitives)
  summary2pdf --json dune_raw.txt > layout.json

THEMES:
  standard        Nord palette, Helvetica, "Page N of M" footer
  high-contrast   Black and grey headings, same layout as standard
  magazine        Navy title band, Times body, boxed quotes, running header

ENVIRONMENT VARIABLES:
  SUMMARY2PDF_INPUT_DIR     Folder scanned in folder mode
  SUMMARY2PDF_OUTPUT_DIR    Folder PDFs are written to
  SUMMARY2PDF_THEME         Built-in theme
  SUMMARY2PDF_STYLE         JSON style file (overrides the theme)
  SUMMARY2PDF_CONCURRENCY   Files converted at once
  RUST_LOG                  Overrides the log filter (e.g. summary2pdf=debug)
"#;

/// Typeset AI-generated book summaries as styled PDFs.
#[derive(Parser, Debug)]
#[command(
    name = "summary2pdf",
    version,
    about = "Typeset AI-generated book summaries as styled PDFs",
    long_about = "Convert plain-text book summaries with light Markdown (headings, bullets, \
quotes, dividers) into consistently styled, paginated PDF documents. Without an INPUT the \
whole input folder is converted.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Summary text file to convert. Omit to convert a whole folder.
    input: Option<PathBuf>,

    /// PDF path for single-file mode (default: <stem>.pdf beside INPUT).
    output: Option<PathBuf>,

    /// Convert every summary in --input-dir.
    #[arg(long, env = "SUMMARY2PDF_FOLDER", conflicts_with = "input")]
    folder: bool,

    /// Folder scanned for summaries in folder mode.
    #[arg(long, env = "SUMMARY2PDF_INPUT_DIR", default_value = "raw_summaries")]
    input_dir: PathBuf,

    /// Folder PDFs are written to in folder mode.
    #[arg(long, env = "SUMMARY2PDF_OUTPUT_DIR", default_value = "formatted_summaries")]
    output_dir: PathBuf,

    /// Built-in style preset.
    #[arg(long, env = "SUMMARY2PDF_THEME", value_enum, default_value = "standard")]
    theme: ThemeArg,

    /// JSON style file; replaces the theme.
    #[arg(long, env = "SUMMARY2PDF_STYLE")]
    style: Option<PathBuf>,

    /// Override the page size of the chosen style.
    #[arg(long, env = "SUMMARY2PDF_PAGE_SIZE", value_enum)]
    page_size: Option<PageSizeArg>,

    /// Override what happens when text cannot fit at the minimum font size.
    #[arg(long, env = "SUMMARY2PDF_OVERFLOW", value_enum)]
    overflow: Option<OverflowArg>,

    /// Number of files converted concurrently.
    #[arg(short, long, env = "SUMMARY2PDF_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Leave summaries whose PDF already exists untouched.
    #[arg(long, env = "SUMMARY2PDF_SKIP_EXISTING")]
    skip_existing: bool,

    /// Print the parsed blocks of INPUT as JSON and exit.
    #[arg(long, env = "SUMMARY2PDF_DUMP_BLOCKS", requires = "input")]
    dump_blocks: bool,

    /// Print JSON: the layout of INPUT (no PDF written), or the batch report after a folder run.
    #[arg(long, env = "SUMMARY2PDF_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "SUMMARY2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "SUMMARY2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "SUMMARY2PDF_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ThemeArg {
    Standard,
    HighContrast,
    Magazine,
}

impl From<ThemeArg> for Theme {
    fn from(v: ThemeArg) -> Self {
        match v {
            ThemeArg::Standard => Theme::Standard,
            ThemeArg::HighContrast => Theme::HighContrast,
            ThemeArg::Magazine => Theme::Magazine,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PageSizeArg {
    A4,
    Letter,
}

impl From<PageSizeArg> for PageSize {
    fn from(v: PageSizeArg) -> Self {
        match v {
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Letter => PageSize::Letter,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OverflowArg {
    Ellipsis,
    Fail,
}

impl From<OverflowArg> for OverflowPolicy {
    fn from(v: OverflowArg) -> Self {
        match v {
            OverflowArg::Ellipsis => OverflowPolicy::Ellipsis,
            OverflowArg::Fail => OverflowPolicy::Fail,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let single = cli.input.is_some() && !cli.folder;

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO logs in folder mode.
    let show_progress = !single && !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let style = build_style(&cli)?;

    match cli.input {
        Some(ref input) if single => run_single(&cli, input, &style),
        _ => run_folder(&cli, style, show_progress).await,
    }
}

/// Theme or JSON style, with the page-size and overflow overrides applied.
fn build_style(cli: &Cli) -> Result<StyleConfig> {
    let base = match cli.style {
        Some(ref path) => StyleConfig::from_path(path)
            .with_context(|| format!("Failed to load style from {}", path.display()))?,
        None => StyleConfig::preset(cli.theme.into()),
    };

    let mut builder = base.into_builder();
    if let Some(size) = cli.page_size {
        builder = builder.page_size(size.into());
    }
    if let Some(policy) = cli.overflow {
        builder = builder.overflow(policy.into());
    }
    builder.build().context("Invalid style configuration")
}

fn run_single(cli: &Cli, input: &Path, style: &StyleConfig) -> Result<()> {
    if cli.dump_blocks || cli.json {
        let raw = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        let json = if cli.dump_blocks {
            serde_json::to_string_pretty(&parse_document(&raw))
                .context("Failed to serialise blocks")?
        } else {
            let doc = convert_text(&raw, style).context("Rendering failed")?;
            serde_json::to_string_pretty(&doc).context("Failed to serialise layout")?
        };
        println!("{json}");
        return Ok(());
    }

    let output = match cli.output {
        Some(ref path) => path.clone(),
        None => output_path_for(input, input.parent().unwrap_or_else(|| Path::new("."))),
    };
    let report = convert_file(input, &output, style).context("Conversion failed")?;

    if !cli.quiet {
        eprintln!(
            "{}  {} pages  {} bytes  {}ms  →  {}",
            green("✔"),
            report.pages,
            report.bytes,
            report.duration_ms,
            bold(&output.display().to_string()),
        );
    }
    Ok(())
}

async fn run_folder(cli: &Cli, style: StyleConfig, show_progress: bool) -> Result<()> {
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let mut builder = ConversionConfig::builder()
        .input_dir(&cli.input_dir)
        .output_dir(&cli.output_dir)
        .style(style)
        .concurrency(cli.concurrency)
        .skip_existing(cli.skip_existing);
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    let batch = convert_folder(&config).await.context("Conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&batch).context("Failed to serialise report")?;
        println!("{json}");
    } else if !cli.quiet {
        let s = &batch.stats;
        if !show_progress {
            eprintln!(
                "Converted {}/{} summaries in {}ms",
                s.converted, s.total_files, s.duration_ms
            );
            for failure in batch.failures() {
                if let Some(ref e) = failure.error {
                    eprintln!("  {} {}", red("✗"), e);
                }
            }
        }
        eprintln!(
            "   {} pages  /  {} bytes  /  {} skipped  →  {}",
            dim(&s.total_pages.to_string()),
            dim(&s.total_bytes.to_string()),
            dim(&s.skipped.to_string()),
            bold(&cli.output_dir.display().to_string()),
        );
    }

    if batch.stats.failed > 0 {
        std::process::exit(2);
    }
    Ok(())
}

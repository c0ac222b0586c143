//! Configuration for folder and file conversion.
//!
//! All driver behaviour is controlled through [`ConversionConfig`], built via
//! its [`ConversionConfigBuilder`]. The visual side lives in a
//! [`StyleConfig`], which the config carries by value and hands to the
//! renderer by reference.

use crate::error::Summary2PdfError;
use crate::progress::ProgressCallback;
use crate::style::{StyleConfig, Theme};
use std::fmt;
use std::path::PathBuf;

/// Configuration for a batch (or single-file) conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use summary2pdf::{ConversionConfig, Theme};
///
/// let config = ConversionConfig::builder()
///     .input_dir("raw_summaries")
///     .output_dir("formatted_summaries")
///     .theme(Theme::Magazine)
///     .concurrency(4)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Folder scanned for summaries. Default: `raw_summaries`.
    pub input_dir: PathBuf,

    /// Folder the PDFs are written to. Created if missing.
    /// Default: `formatted_summaries`.
    pub output_dir: PathBuf,

    /// Rendering style. Default: the `standard` theme.
    pub style: StyleConfig,

    /// Number of files converted at once. Default: 4.
    ///
    /// Each conversion is CPU-bound and runs on a blocking thread, so values
    /// above the core count buy nothing.
    pub concurrency: usize,

    /// Leave existing output files untouched. Default: false.
    pub skip_existing: bool,

    /// Extension of summary files, without the dot. Default: `txt`.
    pub extension: String,

    /// Stem suffix removed when naming outputs (`dune_raw.txt` → `dune.pdf`).
    /// Default: `_raw`.
    pub raw_suffix: String,

    /// Optional per-file progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("raw_summaries"),
            output_dir: PathBuf::from("formatted_summaries"),
            style: StyleConfig::default(),
            concurrency: 4,
            skip_existing: false,
            extension: "txt".into(),
            raw_suffix: "_raw".into(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("input_dir", &self.input_dir)
            .field("output_dir", &self.output_dir)
            .field("concurrency", &self.concurrency)
            .field("skip_existing", &self.skip_existing)
            .field("extension", &self.extension)
            .field("raw_suffix", &self.raw_suffix)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish_non_exhaustive()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn style(mut self, style: StyleConfig) -> Self {
        self.config.style = style;
        self
    }

    /// Shorthand for `style(StyleConfig::preset(theme))`.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.config.style = StyleConfig::preset(theme);
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn skip_existing(mut self, v: bool) -> Self {
        self.config.skip_existing = v;
        self
    }

    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.config.extension = ext.into().trim_start_matches('.').to_string();
        self
    }

    pub fn raw_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.raw_suffix = suffix.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Summary2PdfError> {
        let c = &self.config;
        if c.concurrency == 0 {
            return Err(Summary2PdfError::InvalidConfig(
                "Concurrency must be ≥ 1".into(),
            ));
        }
        if c.extension.is_empty() {
            return Err(Summary2PdfError::InvalidConfig(
                "Input extension must not be empty".into(),
            ));
        }
        if c.input_dir == c.output_dir && c.extension.eq_ignore_ascii_case("pdf") {
            return Err(Summary2PdfError::InvalidConfig(
                "Input and output folders are the same and inputs are .pdf files".into(),
            ));
        }
        c.style.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoopProgressCallback;
    use std::sync::Arc;

    #[test]
    fn defaults_follow_folder_convention() {
        let c = ConversionConfig::default();
        assert_eq!(c.input_dir, PathBuf::from("raw_summaries"));
        assert_eq!(c.output_dir, PathBuf::from("formatted_summaries"));
        assert_eq!(c.extension, "txt");
        assert_eq!(c.raw_suffix, "_raw");
        assert!(!c.skip_existing);
    }

    #[test]
    fn concurrency_is_clamped() {
        let c = ConversionConfig::builder().concurrency(0).build().unwrap();
        assert_eq!(c.concurrency, 1);
    }

    #[test]
    fn extension_dot_is_trimmed() {
        let c = ConversionConfig::builder().extension(".md").build().unwrap();
        assert_eq!(c.extension, "md");
        assert!(ConversionConfig::builder().extension("").build().is_err());
    }

    #[test]
    fn theme_sets_style() {
        let c = ConversionConfig::builder().theme(Theme::Magazine).build().unwrap();
        assert_eq!(c.style, StyleConfig::preset(Theme::Magazine));
    }

    #[test]
    fn invalid_style_rejected_at_build() {
        let mut style = StyleConfig::default();
        style.min_font_size = 0.0;
        let err = ConversionConfig::builder().style(style).build().unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn debug_hides_callback() {
        let c = ConversionConfig::builder()
            .progress_callback(Arc::new(NoopProgressCallback))
            .build()
            .unwrap();
        let dbg = format!("{c:?}");
        assert!(dbg.contains("<dyn ConversionProgressCallback>"));
    }
}

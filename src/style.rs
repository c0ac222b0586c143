//! Visual styling for rendered summaries.
//!
//! A [`StyleConfig`] maps every [`BlockKind`] to a [`BlockStyle`] and carries
//! the page geometry, list settings, overflow policy and optional running
//! header/footer. It is built once (from a [`Theme`] preset, a JSON file or
//! the [`StyleConfigBuilder`]) and then shared read-only by the renderer.
//!
//! # Themes
//!
//! | Theme | Look |
//! |-------|------|
//! | `standard` | Helvetica, Nord-style blue headings, shaded quotes (default) |
//! | `high-contrast` | As standard but black/grey headings for greyscale e-ink screens |
//! | `magazine` | Times body, navy title band, accent-barred quotes, running header |
//!
//! # Lookup rules
//!
//! [`StyleConfig::resolve`] returns the exact entry for a kind, then the
//! explicit `fallback` style if one is set, and otherwise fails with
//! [`Summary2PdfError::MissingStyle`]. Heading levels never borrow each
//! other's styles implicitly.

use crate::block::BlockKind;
use crate::error::Summary2PdfError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// ── Primitive attributes ─────────────────────────────────────────────────

/// One of the PDF standard-14 text fonts. No font files are embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl Font {
    /// PostScript name written to the `/BaseFont` entry.
    pub fn base_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
            Font::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Font::TimesRoman => "Times-Roman",
            Font::TimesBold => "Times-Bold",
            Font::TimesItalic => "Times-Italic",
            Font::TimesBoldItalic => "Times-BoldItalic",
            Font::Courier => "Courier",
            Font::CourierBold => "Courier-Bold",
            Font::CourierOblique => "Courier-Oblique",
            Font::CourierBoldOblique => "Courier-BoldOblique",
        }
    }
}

/// 8-bit RGB colour, written as `"#RRGGBB"` in style files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Components scaled to `0.0..=1.0` for PDF colour operators.
    pub fn unit(self) -> [f32; 3] {
        [
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        ]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("colour '{s}' must be #RRGGBB"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("colour '{s}' is not hex"))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

/// Horizontal alignment of wrapped lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    /// Stretch word spacing to fill the line; the last line stays left-aligned.
    Justify,
}

/// What to do when text cannot fit even at `min_font_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Truncate the offending word or line and end it with `…`. (default)
    #[default]
    Ellipsis,
    /// Abort the document with [`Summary2PdfError::LayoutOverflow`].
    Fail,
}

/// Physical page size, in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.0, 842.0),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Custom { width, height } => (width, height),
        }
    }
}

/// Page size plus margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    #[serde(default)]
    pub size: PageSize,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            margin_top: 72.0,
            margin_bottom: 72.0,
            margin_left: 72.0,
            margin_right: 72.0,
        }
    }
}

/// Visual attributes for one block kind.
///
/// All lengths are in points. `line_height` is absolute; when the renderer
/// shrinks an overflowing block it scales `line_height` by the same ratio as
/// `font_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStyle {
    pub font: Font,
    pub font_size: f32,
    pub line_height: f32,
    pub color: Rgb,
    #[serde(default)]
    pub space_before: f32,
    #[serde(default)]
    pub space_after: f32,
    #[serde(default)]
    pub indent_left: f32,
    #[serde(default)]
    pub indent_right: f32,
    #[serde(default)]
    pub align: Align,
    /// Fill behind the padded block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgb>,
    /// Vertical bar along the left edge of the padded block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_bar: Option<Rgb>,
    /// Horizontal rule under the block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<Rgb>,
    /// Inner padding between text and background/accent bar.
    #[serde(default)]
    pub padding: f32,
    /// Stroke width for dividers, underlines and accent bars.
    #[serde(default = "default_rule_thickness")]
    pub rule_thickness: f32,
}

fn default_rule_thickness() -> f32 {
    1.0
}

impl BlockStyle {
    /// A plain style with no spacing or decoration.
    pub fn new(font: Font, font_size: f32, line_height: f32, color: Rgb) -> Self {
        Self {
            font,
            font_size,
            line_height,
            color,
            space_before: 0.0,
            space_after: 0.0,
            indent_left: 0.0,
            indent_right: 0.0,
            align: Align::Left,
            background: None,
            accent_bar: None,
            underline: None,
            padding: 0.0,
            rule_thickness: default_rule_thickness(),
        }
    }

    pub fn spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    pub fn indent(mut self, left: f32, right: f32) -> Self {
        self.indent_left = left;
        self.indent_right = right;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn background(mut self, color: Rgb) -> Self {
        self.background = Some(color);
        self
    }

    pub fn accent_bar(mut self, color: Rgb) -> Self {
        self.accent_bar = Some(color);
        self
    }

    pub fn underline(mut self, color: Rgb) -> Self {
        self.underline = Some(color);
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn rule_thickness(mut self, thickness: f32) -> Self {
        self.rule_thickness = thickness;
        self
    }

    fn validate(&self, name: &str) -> Result<(), Summary2PdfError> {
        let lengths = [
            ("font_size", self.font_size),
            ("line_height", self.line_height),
            ("rule_thickness", self.rule_thickness),
        ];
        for (field, v) in lengths {
            if !(v.is_finite() && v > 0.0) {
                return Err(Summary2PdfError::InvalidConfig(format!(
                    "{name}.{field} must be > 0, got {v}"
                )));
            }
        }
        let offsets = [
            ("space_before", self.space_before),
            ("space_after", self.space_after),
            ("indent_left", self.indent_left),
            ("indent_right", self.indent_right),
            ("padding", self.padding),
        ];
        for (field, v) in offsets {
            if !(v.is_finite() && v >= 0.0) {
                return Err(Summary2PdfError::InvalidConfig(format!(
                    "{name}.{field} must be ≥ 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Bullet-list settings shared by every nesting level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListStyle {
    /// Glyph drawn before each item.
    pub marker: char,
    /// Marker colour; defaults to the bullet text colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker_color: Option<Rgb>,
    /// Distance from the marker's left edge to the item text.
    pub marker_gap: f32,
    /// Extra left indent per nesting level.
    pub level_indent: f32,
    /// Deeper items are drawn at this level.
    pub max_level: u8,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            marker: '•',
            marker_color: None,
            marker_gap: 10.0,
            level_indent: 14.0,
            max_level: 4,
        }
    }
}

/// Running header or footer text.
///
/// `template` may contain `{page}`, `{pages}` and `{title}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Furniture {
    pub template: String,
    pub font: Font,
    pub font_size: f32,
    pub color: Rgb,
    /// Vertical band reserved inside the margin-bounded area.
    pub height: f32,
    #[serde(default)]
    pub align: Align,
    /// Skip this furniture on page 1.
    #[serde(default)]
    pub skip_first_page: bool,
}

impl Furniture {
    /// Substitute placeholders for one page.
    pub fn text_for(&self, page: usize, pages: usize, title: Option<&str>) -> String {
        self.template
            .replace("{page}", &page.to_string())
            .replace("{pages}", &pages.to_string())
            .replace("{title}", title.unwrap_or(""))
    }
}

// ── StyleConfig ──────────────────────────────────────────────────────────

/// Built-in colour schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Standard,
    HighContrast,
    Magazine,
}

/// Complete, immutable rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub page: PageSetup,
    /// Per-kind styles keyed by `h1`…`h6`, `paragraph`, `bullet`, `quote`, `divider`.
    #[serde(default)]
    pub blocks: BTreeMap<BlockKind, BlockStyle>,
    /// Used for any kind missing from `blocks`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<BlockStyle>,
    /// Replaces the `h2` style for an `h2` directly after the first `h1`.
    /// The title's `space_after` is dropped so the two form one banner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<BlockStyle>,
    #[serde(default)]
    pub list: ListStyle,
    /// Smallest font size the renderer may shrink to before applying `overflow`.
    #[serde(default = "default_min_font_size")]
    pub min_font_size: f32,
    #[serde(default)]
    pub overflow: OverflowPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Furniture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Furniture>,
}

fn default_min_font_size() -> f32 {
    6.0
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::preset(Theme::Standard)
    }
}

impl StyleConfig {
    /// Start from an empty style (no block entries, A4 with 1-inch margins).
    pub fn builder() -> StyleConfigBuilder {
        StyleConfigBuilder {
            config: StyleConfig {
                page: PageSetup::default(),
                blocks: BTreeMap::new(),
                fallback: None,
                subtitle: None,
                list: ListStyle::default(),
                min_font_size: default_min_font_size(),
                overflow: OverflowPolicy::default(),
                header: None,
                footer: None,
            },
        }
    }

    /// Continue building from this configuration.
    pub fn into_builder(self) -> StyleConfigBuilder {
        StyleConfigBuilder { config: self }
    }

    /// A complete style for one of the built-in themes.
    pub fn preset(theme: Theme) -> Self {
        match theme {
            Theme::Standard => standard_preset(Palette::nord()),
            Theme::HighContrast => standard_preset(Palette::high_contrast()),
            Theme::Magazine => magazine_preset(),
        }
    }

    /// Parse and validate a JSON style document.
    pub fn from_json_str(json: &str) -> Result<Self, Summary2PdfError> {
        let config: StyleConfig = serde_json::from_str(json).map_err(|e| {
            Summary2PdfError::StyleParse {
                path: "<inline>".into(),
                source: e,
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON style file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Summary2PdfError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Summary2PdfError::FileNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => Summary2PdfError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Summary2PdfError::Internal(format!("reading {}: {e}", path.display())),
        })?;
        let config: StyleConfig =
            serde_json::from_str(&json).map_err(|e| Summary2PdfError::StyleParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty JSON, suitable as a starting point for a custom style file.
    pub fn to_json(&self) -> Result<String, Summary2PdfError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Summary2PdfError::Internal(format!("style serialisation: {e}")))
    }

    /// Exact entry, then fallback.
    pub fn lookup(&self, kind: BlockKind) -> Option<&BlockStyle> {
        self.blocks.get(&kind).or(self.fallback.as_ref())
    }

    /// Like [`lookup`](Self::lookup) but a miss is a configuration error.
    pub fn resolve(&self, kind: BlockKind) -> Result<&BlockStyle, Summary2PdfError> {
        self.lookup(kind)
            .ok_or(Summary2PdfError::MissingStyle { kind })
    }

    /// `(width, height)` of the page in points.
    pub fn page_dimensions(&self) -> (f32, f32) {
        self.page.size.dimensions()
    }

    /// Top edge of the block flow area, below any header band.
    pub fn content_top(&self) -> f32 {
        self.page.margin_top + self.header.as_ref().map_or(0.0, |h| h.height)
    }

    /// Bottom edge of the block flow area, above any footer band.
    pub fn content_bottom(&self) -> f32 {
        let (_, height) = self.page_dimensions();
        height - self.page.margin_bottom - self.footer.as_ref().map_or(0.0, |f| f.height)
    }

    pub fn content_width(&self) -> f32 {
        let (width, _) = self.page_dimensions();
        width - self.page.margin_left - self.page.margin_right
    }

    pub fn content_height(&self) -> f32 {
        self.content_bottom() - self.content_top()
    }

    /// Check geometry and every style entry for usable values.
    pub fn validate(&self) -> Result<(), Summary2PdfError> {
        let (width, height) = self.page_dimensions();
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Summary2PdfError::InvalidConfig(format!(
                "page size must be positive, got {width}×{height}"
            )));
        }
        let margins = [
            self.page.margin_top,
            self.page.margin_bottom,
            self.page.margin_left,
            self.page.margin_right,
        ];
        if margins.iter().any(|m| !(m.is_finite() && *m >= 0.0)) {
            return Err(Summary2PdfError::InvalidConfig(
                "page margins must be ≥ 0".into(),
            ));
        }
        if self.content_width() <= 0.0 {
            return Err(Summary2PdfError::InvalidConfig(
                "left and right margins leave no room for content".into(),
            ));
        }
        if self.content_height() <= 0.0 {
            return Err(Summary2PdfError::InvalidConfig(
                "margins, header and footer leave no room for content".into(),
            ));
        }
        if !(self.min_font_size.is_finite() && self.min_font_size > 0.0) {
            return Err(Summary2PdfError::InvalidConfig(format!(
                "min_font_size must be > 0, got {}",
                self.min_font_size
            )));
        }
        if !(self.list.level_indent >= 0.0 && self.list.marker_gap >= 0.0) {
            return Err(Summary2PdfError::InvalidConfig(
                "list indents must be ≥ 0".into(),
            ));
        }
        for (kind, style) in &self.blocks {
            style.validate(&kind.to_string())?;
        }
        if let Some(ref fallback) = self.fallback {
            fallback.validate("fallback")?;
        }
        if let Some(ref subtitle) = self.subtitle {
            subtitle.validate("subtitle")?;
        }
        for (name, furniture) in [("header", &self.header), ("footer", &self.footer)] {
            if let Some(f) = furniture {
                if !(f.font_size > 0.0 && f.height >= 0.0) {
                    return Err(Summary2PdfError::InvalidConfig(format!(
                        "{name} needs a positive font size and non-negative height"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Builder for [`StyleConfig`].
#[derive(Debug)]
pub struct StyleConfigBuilder {
    config: StyleConfig,
}

impl StyleConfigBuilder {
    pub fn page_size(mut self, size: PageSize) -> Self {
        self.config.page.size = size;
        self
    }

    pub fn margins(mut self, top: f32, right: f32, bottom: f32, left: f32) -> Self {
        self.config.page.margin_top = top;
        self.config.page.margin_right = right;
        self.config.page.margin_bottom = bottom;
        self.config.page.margin_left = left;
        self
    }

    pub fn block(mut self, kind: BlockKind, style: BlockStyle) -> Self {
        self.config.blocks.insert(kind, style);
        self
    }

    pub fn without_block(mut self, kind: BlockKind) -> Self {
        self.config.blocks.remove(&kind);
        self
    }

    pub fn fallback(mut self, style: BlockStyle) -> Self {
        self.config.fallback = Some(style);
        self
    }

    pub fn subtitle(mut self, style: Option<BlockStyle>) -> Self {
        self.config.subtitle = style;
        self
    }

    pub fn list(mut self, list: ListStyle) -> Self {
        self.config.list = list;
        self
    }

    pub fn min_font_size(mut self, size: f32) -> Self {
        self.config.min_font_size = size;
        self
    }

    pub fn overflow(mut self, policy: OverflowPolicy) -> Self {
        self.config.overflow = policy;
        self
    }

    pub fn header(mut self, header: Option<Furniture>) -> Self {
        self.config.header = header;
        self
    }

    pub fn footer(mut self, footer: Option<Furniture>) -> Self {
        self.config.footer = footer;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<StyleConfig, Summary2PdfError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// ── Presets ──────────────────────────────────────────────────────────────

struct Palette {
    h1: Rgb,
    h2: Rgb,
    h3: Rgb,
    minor: Rgb,
    body: Rgb,
    quote_text: Rgb,
    quote_fill: Rgb,
    marker: Rgb,
    rule: Rgb,
    muted: Rgb,
}

impl Palette {
    fn nord() -> Self {
        Self {
            h1: Rgb(0x5E, 0x81, 0xAC),
            h2: Rgb(0x81, 0xA1, 0xC1),
            h3: Rgb(0x88, 0xC0, 0xD0),
            minor: Rgb(0x4C, 0x56, 0x6A),
            body: Rgb(0x3B, 0x42, 0x52),
            quote_text: Rgb(0x4C, 0x56, 0x6A),
            quote_fill: Rgb(0xEC, 0xEF, 0xF4),
            marker: Rgb(0x5E, 0x81, 0xAC),
            rule: Rgb(0xD8, 0xDE, 0xE9),
            muted: Rgb(0x7F, 0x8C, 0x8D),
        }
    }

    fn high_contrast() -> Self {
        Self {
            h1: Rgb(0x00, 0x00, 0x00),
            h2: Rgb(0x22, 0x22, 0x22),
            h3: Rgb(0x44, 0x44, 0x44),
            minor: Rgb(0x44, 0x44, 0x44),
            marker: Rgb(0x00, 0x00, 0x00),
            rule: Rgb(0x88, 0x88, 0x88),
            muted: Rgb(0x44, 0x44, 0x44),
            ..Self::nord()
        }
    }
}

fn standard_preset(p: Palette) -> StyleConfig {
    let heading = |size: f32, color: Rgb, before: f32, after: f32| {
        BlockStyle::new(Font::HelveticaBold, size, size * 1.25, color).spacing(before, after)
    };

    let mut blocks = BTreeMap::new();
    blocks.insert(BlockKind::Heading(1), heading(16.0, p.h1, 20.0, 12.0));
    blocks.insert(BlockKind::Heading(2), heading(14.0, p.h2, 15.0, 10.0));
    blocks.insert(BlockKind::Heading(3), heading(12.0, p.h3, 12.0, 8.0));
    for level in 4..=6 {
        blocks.insert(BlockKind::Heading(level), heading(11.0, p.minor, 10.0, 6.0));
    }
    blocks.insert(
        BlockKind::Paragraph,
        BlockStyle::new(Font::Helvetica, 11.0, 14.0, p.body)
            .spacing(6.0, 6.0)
            .align(Align::Justify),
    );
    blocks.insert(
        BlockKind::BulletItem,
        BlockStyle::new(Font::Helvetica, 11.0, 14.0, p.body)
            .spacing(4.0, 4.0)
            .indent(10.0, 0.0),
    );
    blocks.insert(
        BlockKind::Quote,
        BlockStyle::new(Font::HelveticaOblique, 11.0, 14.0, p.quote_text)
            .spacing(12.0, 12.0)
            .indent(30.0, 30.0)
            .align(Align::Justify)
            .background(p.quote_fill)
            .padding(10.0),
    );
    blocks.insert(
        BlockKind::Divider,
        BlockStyle::new(Font::Helvetica, 11.0, 14.0, p.rule).spacing(8.0, 8.0),
    );

    StyleConfig {
        page: PageSetup::default(),
        blocks,
        fallback: None,
        subtitle: None,
        list: ListStyle {
            marker_color: Some(p.marker),
            ..ListStyle::default()
        },
        min_font_size: default_min_font_size(),
        overflow: OverflowPolicy::Ellipsis,
        header: None,
        footer: Some(Furniture {
            template: "Page {page} of {pages}".into(),
            font: Font::Helvetica,
            font_size: 8.0,
            color: p.muted,
            height: 20.0,
            align: Align::Center,
            skip_first_page: false,
        }),
    }
}

fn magazine_preset() -> StyleConfig {
    let navy = Rgb(22, 46, 81);
    let text_dark = Rgb(34, 34, 34);
    let text_light = Rgb(85, 85, 85);
    let line_grey = Rgb(220, 220, 220);
    let quote_grey = Rgb(240, 240, 240);

    let mut blocks = BTreeMap::new();
    blocks.insert(
        BlockKind::Heading(1),
        BlockStyle::new(Font::HelveticaBold, 24.0, 30.0, Rgb::WHITE)
            .spacing(0.0, 18.0)
            .align(Align::Center)
            .background(navy)
            .padding(14.0),
    );
    blocks.insert(
        BlockKind::Heading(2),
        BlockStyle::new(Font::HelveticaBold, 14.0, 20.0, navy)
            .spacing(14.0, 6.0)
            .underline(line_grey),
    );
    for level in 3..=6 {
        blocks.insert(
            BlockKind::Heading(level),
            BlockStyle::new(Font::HelveticaBold, 12.0, 18.0, text_dark).spacing(8.0, 4.0),
        );
    }
    blocks.insert(
        BlockKind::Paragraph,
        BlockStyle::new(Font::TimesRoman, 12.0, 18.0, text_dark)
            .spacing(0.0, 11.0)
            .align(Align::Justify),
    );
    blocks.insert(
        BlockKind::BulletItem,
        BlockStyle::new(Font::TimesRoman, 12.0, 17.0, text_dark)
            .spacing(0.0, 4.0)
            .indent(6.0, 0.0),
    );
    blocks.insert(
        BlockKind::Quote,
        BlockStyle::new(Font::TimesItalic, 11.0, 17.0, text_light)
            .spacing(6.0, 17.0)
            .background(quote_grey)
            .accent_bar(navy)
            .padding(6.0)
            .rule_thickness(2.8),
    );
    blocks.insert(
        BlockKind::Divider,
        BlockStyle::new(Font::Helvetica, 12.0, 14.0, line_grey).spacing(14.0, 14.0),
    );

    let furniture = |template: &str, align: Align, skip_first_page: bool| Furniture {
        template: template.into(),
        font: Font::HelveticaOblique,
        font_size: 8.0,
        color: text_light,
        height: 24.0,
        align,
        skip_first_page,
    };

    StyleConfig {
        page: PageSetup {
            size: PageSize::A4,
            margin_top: 42.5,
            margin_bottom: 42.5,
            margin_left: 42.5,
            margin_right: 42.5,
        },
        blocks,
        fallback: None,
        subtitle: Some(
            BlockStyle::new(Font::HelveticaOblique, 11.0, 15.0, Rgb(200, 200, 200))
                .spacing(0.0, 18.0)
                .align(Align::Center)
                .background(navy)
                .padding(8.0),
        ),
        list: ListStyle {
            marker_color: Some(navy),
            ..ListStyle::default()
        },
        min_font_size: default_min_font_size(),
        overflow: OverflowPolicy::Ellipsis,
        header: Some(furniture("{title}", Align::Left, true)),
        footer: Some(furniture("Page {page}", Align::Center, false)),
    }
}

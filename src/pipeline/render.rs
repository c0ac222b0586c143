//! Styled renderer: blocks + [`StyleConfig`] → paginated [`Document`].
//!
//! ## Algorithm
//!
//! 1. Resolve a [`BlockStyle`] for every block up front so a missing style
//!    fails before any layout work.
//! 2. Measure each block: wrap its text at the block's font size, shrinking
//!    in 0.5 pt steps while a single word is wider than the line.
//! 3. Paginate greedily with a vertical cursor. Only paragraphs split across
//!    pages, and they split between lines.
//! 4. Draw header/footer furniture once the page count is known.
//!
//! Rendering is deterministic: identical input always produces an identical
//! [`Document`]. On error nothing is returned.

use super::layout::{self, Line};
use super::parse::extract_title;
use crate::block::{Block, BlockKind};
use crate::document::{Document, Page, PlacedBlock, Primitive, Rect};
use crate::error::Summary2PdfError;
use crate::style::{Align, BlockStyle, Furniture, OverflowPolicy, StyleConfig};
use tracing::debug;

/// Font-size decrement used when a word is too wide.
const SHRINK_STEP: f32 = 0.5;

/// Vertical tolerance when comparing accumulated heights.
const EPSILON: f32 = 1e-3;

/// Fraction of the font size below the baseline.
const DESCENT: f32 = 0.2;

/// Render `blocks` into a paginated document.
///
/// # Errors
///
/// * [`Summary2PdfError::MissingStyle`] when a block kind has no style and no
///   fallback is configured.
/// * [`Summary2PdfError::LayoutOverflow`] when content cannot be placed under
///   [`OverflowPolicy::Fail`], or cannot be placed at all.
/// * [`Summary2PdfError::InvalidConfig`] for unusable page geometry.
pub fn render(blocks: &[Block], style: &StyleConfig) -> Result<Document, Summary2PdfError> {
    style.validate()?;

    let banner = subtitle_index(blocks, style);
    let styles = blocks
        .iter()
        .enumerate()
        .map(|(i, b)| match (banner, style.subtitle.as_ref()) {
            (Some(at), Some(subtitle)) if at == i => Ok(subtitle),
            _ => style.resolve(b.kind()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut measured = Vec::with_capacity(blocks.len());
    for (index, (block, block_style)) in blocks.iter().zip(styles).enumerate() {
        let mut m = measure(index, block, block_style, style)?;
        m.joined = banner == Some(index + 1);
        measured.push(m);
    }

    let mut pages = paginate(&measured, style)?;
    let title = extract_title(blocks);
    let total = pages.len();
    for page in &mut pages {
        page.furniture = furniture(page.number, total, title.as_deref(), style);
    }

    let (width, height) = style.page_dimensions();
    debug!(
        "Rendered {} blocks onto {} page(s) ({}×{} pt)",
        blocks.len(),
        total,
        width,
        height
    );
    Ok(Document {
        width,
        height,
        title,
        pages,
    })
}

/// Index of the `h2` drawn as the title's subtitle, when the style has one.
fn subtitle_index(blocks: &[Block], style: &StyleConfig) -> Option<usize> {
    style.subtitle.as_ref()?;
    let title = blocks.iter().position(|b| b.kind() == BlockKind::Heading(1))?;
    matches!(blocks.get(title + 1), Some(Block::Heading { level: 2, .. })).then_some(title + 1)
}

// ── Measurement ──────────────────────────────────────────────────────────

/// A block after wrapping, before placement.
#[derive(Debug)]
struct Measured<'a> {
    index: usize,
    kind: BlockKind,
    style: &'a BlockStyle,
    font_size: f32,
    line_height: f32,
    lines: Vec<Line>,
    /// Left edge and width of the padded box.
    box_x: f32,
    box_width: f32,
    /// Left edge and width available to text.
    text_x: f32,
    text_width: f32,
    /// Bullet marker x position, if any.
    marker_x: Option<f32>,
    /// Followed directly by its subtitle: no `space_after`.
    joined: bool,
}

impl Measured<'_> {
    fn is_divider(&self) -> bool {
        self.kind == BlockKind::Divider
    }

    fn space_after(&self) -> f32 {
        if self.joined {
            0.0
        } else {
            self.style.space_after
        }
    }

    fn chrome(&self) -> f32 {
        self.style.space_before + 2.0 * self.style.padding + self.space_after()
    }

    fn body_height(&self, lines: usize) -> f32 {
        if self.is_divider() {
            self.style.rule_thickness
        } else {
            lines as f32 * self.line_height
        }
    }

    fn height(&self) -> f32 {
        self.chrome() + self.body_height(self.lines.len())
    }

    fn overflow(&self, detail: String) -> Summary2PdfError {
        Summary2PdfError::LayoutOverflow {
            block: self.index,
            kind: self.kind,
            detail,
        }
    }
}

fn measure<'a>(
    index: usize,
    block: &Block,
    style: &'a BlockStyle,
    config: &StyleConfig,
) -> Result<Measured<'a>, Summary2PdfError> {
    let kind = block.kind();
    let box_x = config.page.margin_left + style.indent_left;
    let box_width = config.content_width() - style.indent_left - style.indent_right;
    let mut text_x = box_x + style.padding;
    let mut text_width = box_width - 2.0 * style.padding;

    let mut marker_x = None;
    if let Block::BulletItem { indent, .. } = block {
        let level = (*indent).min(config.list.max_level);
        let x = text_x + f32::from(level) * config.list.level_indent;
        marker_x = Some(x);
        text_width -= x - text_x + config.list.marker_gap;
        text_x = x + config.list.marker_gap;
    }

    let overflow = |detail: String| Summary2PdfError::LayoutOverflow {
        block: index,
        kind,
        detail,
    };

    if text_width <= 0.0 {
        return Err(overflow(format!(
            "indents leave {text_width:.1}pt for text"
        )));
    }

    let mut measured = Measured {
        index,
        kind,
        style,
        font_size: style.font_size,
        line_height: style.line_height,
        lines: Vec::new(),
        box_x,
        box_width,
        text_x,
        text_width,
        marker_x,
        joined: false,
    };
    if block.text().is_empty() {
        return Ok(measured);
    }

    let mut size = style.font_size;
    let lines = loop {
        match layout::wrap(block.text(), style.font, size, text_width) {
            Ok(lines) => break lines,
            Err(word) => {
                let next = (size - SHRINK_STEP).max(config.min_font_size);
                if next < size {
                    size = next;
                    continue;
                }
                match config.overflow {
                    OverflowPolicy::Fail => {
                        return Err(overflow(format!(
                            "word '{word}' is wider than {text_width:.1}pt even at {size}pt"
                        )));
                    }
                    OverflowPolicy::Ellipsis => {
                        debug!("Block {index}: truncating over-wide word '{word}'");
                        break layout::wrap_truncating(block.text(), style.font, size, text_width)
                            .ok_or_else(|| {
                                overflow(format!(
                                    "not even one character fits in {text_width:.1}pt at {size}pt"
                                ))
                            })?;
                    }
                }
            }
        }
    };

    if size < style.font_size {
        debug!(
            "Block {index} ({kind}) shrunk from {}pt to {size}pt",
            style.font_size
        );
    }
    measured.font_size = size;
    measured.line_height = style.line_height * size / style.font_size;
    measured.lines = lines;
    Ok(measured)
}

// ── Pagination ───────────────────────────────────────────────────────────

struct Paginator<'c> {
    config: &'c StyleConfig,
    pages: Vec<Page>,
    current: Vec<PlacedBlock>,
    cursor: f32,
}

impl<'c> Paginator<'c> {
    fn new(config: &'c StyleConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            current: Vec::new(),
            cursor: config.content_top(),
        }
    }

    fn remaining(&self) -> f32 {
        self.config.content_bottom() - self.cursor
    }

    fn page_is_empty(&self) -> bool {
        self.current.is_empty()
    }

    fn break_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(Page {
            number,
            blocks: std::mem::take(&mut self.current),
            furniture: Vec::new(),
        });
        self.cursor = self.config.content_top();
    }

    /// Place `lines` of `m` at the cursor and advance past them.
    fn place(&mut self, m: &Measured<'_>, lines: &[Line], continued: bool, last: bool) {
        let before = if continued { 0.0 } else { m.style.space_before };
        let top = self.cursor + before;
        let frame = Rect::new(
            m.box_x,
            top,
            m.box_width,
            2.0 * m.style.padding + m.body_height(lines.len()),
        );
        let primitives = draw(m, lines, frame, continued, last, self.config);
        self.current.push(PlacedBlock {
            index: m.index,
            kind: m.kind,
            frame,
            continued,
            font_size: m.font_size,
            primitives,
        });
        let after = if last { m.space_after() } else { 0.0 };
        self.cursor = frame.bottom() + after;
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.break_page();
        }
        self.pages
    }
}

fn paginate(measured: &[Measured<'_>], config: &StyleConfig) -> Result<Vec<Page>, Summary2PdfError> {
    let page_height = config.content_height();
    let mut pager = Paginator::new(config);

    for m in measured {
        if m.kind == BlockKind::Paragraph {
            place_paragraph(&mut pager, m)?;
            continue;
        }

        let mut lines = m.lines.clone();
        if m.height() > page_height + EPSILON {
            lines = clip_to_page(m, page_height, config.overflow)?;
        }
        let height = m.chrome() + m.body_height(lines.len());
        if height > pager.remaining() + EPSILON && !pager.page_is_empty() {
            pager.break_page();
        }
        pager.place(m, &lines, false, true);
    }

    Ok(pager.finish())
}

/// Split a paragraph line by line across as many pages as it needs.
fn place_paragraph(pager: &mut Paginator<'_>, m: &Measured<'_>) -> Result<(), Summary2PdfError> {
    let pad = 2.0 * m.style.padding;
    let one_line = m.style.space_before + pad + m.line_height;
    if one_line > pager.config.content_height() + EPSILON {
        return Err(m.overflow(format!(
            "a single {:.1}pt line does not fit in the {:.1}pt content area",
            m.line_height,
            pager.config.content_height()
        )));
    }

    let mut rest: &[Line] = &m.lines;
    let mut continued = false;
    loop {
        let before = if continued { 0.0 } else { m.style.space_before };
        if m.chrome() + m.body_height(rest.len()) - (m.style.space_before - before)
            <= pager.remaining() + EPSILON
        {
            pager.place(m, rest, continued, true);
            return Ok(());
        }

        let room = pager.remaining() - before - pad;
        let fit = (((room + EPSILON) / m.line_height).floor().max(0.0)) as usize;
        if fit >= rest.len() {
            // Every line fits; only space_after spills past the page.
            pager.place(m, rest, continued, true);
            return Ok(());
        }
        if fit == 0 {
            if pager.page_is_empty() {
                return Err(m.overflow("no line fits on an empty page".into()));
            }
            pager.break_page();
            continue;
        }

        let (head, tail) = rest.split_at(fit);
        pager.place(m, head, continued, false);
        pager.break_page();
        rest = tail;
        continued = true;
    }
}

/// Keep the lines of an over-tall block that fit on one page.
fn clip_to_page(
    m: &Measured<'_>,
    page_height: f32,
    policy: OverflowPolicy,
) -> Result<Vec<Line>, Summary2PdfError> {
    let detail = format!(
        "block is {:.1}pt tall but the content area is {:.1}pt",
        m.height(),
        page_height
    );
    if policy == OverflowPolicy::Fail || m.is_divider() {
        return Err(m.overflow(detail));
    }
    let room = page_height - m.chrome();
    let keep = (((room + EPSILON) / m.line_height).floor().max(0.0)) as usize;
    if keep == 0 {
        return Err(m.overflow(detail));
    }
    debug!("Block {}: keeping {keep} of {} lines", m.index, m.lines.len());

    let mut lines: Vec<Line> = m.lines[..keep].to_vec();
    let last = &lines[keep - 1];
    let ellipsised = layout::with_ellipsis(&last.text, m.style.font, m.font_size, m.text_width)
        .ok_or_else(|| m.overflow(detail.clone()))?;
    lines[keep - 1] = ellipsised;
    Ok(lines)
}

// ── Drawing ──────────────────────────────────────────────────────────────

fn baseline(line_top: f32, line_height: f32, size: f32) -> f32 {
    line_top + (line_height + size) / 2.0 - DESCENT * size
}

fn draw(
    m: &Measured<'_>,
    lines: &[Line],
    frame: Rect,
    continued: bool,
    last: bool,
    config: &StyleConfig,
) -> Vec<Primitive> {
    let s = m.style;
    let mut out = Vec::new();

    if let Some(color) = s.background {
        out.push(Primitive::Fill { rect: frame, color });
    }
    if let Some(color) = s.accent_bar {
        let x = frame.x + s.rule_thickness / 2.0;
        out.push(Primitive::Rule {
            x1: x,
            y1: frame.y,
            x2: x,
            y2: frame.bottom(),
            thickness: s.rule_thickness,
            color,
        });
    }

    if m.is_divider() {
        let y = frame.y + s.padding + s.rule_thickness / 2.0;
        out.push(Primitive::Rule {
            x1: frame.x,
            y1: y,
            x2: frame.x + frame.width,
            y2: y,
            thickness: s.rule_thickness,
            color: s.color,
        });
        return out;
    }

    let top = frame.y + s.padding;
    if let (Some(x), false) = (m.marker_x, continued) {
        out.push(Primitive::Text {
            x,
            baseline: baseline(top, m.line_height, m.font_size),
            text: config.list.marker.to_string(),
            font: s.font,
            size: m.font_size,
            color: config.list.marker_color.unwrap_or(s.color),
            word_spacing: 0.0,
        });
    }

    for (i, line) in lines.iter().enumerate() {
        let is_final = last && i + 1 == lines.len();
        let slack = (m.text_width - line.width).max(0.0);
        let (x, word_spacing) = match s.align {
            Align::Left => (m.text_x, 0.0),
            Align::Center => (m.text_x + slack / 2.0, 0.0),
            Align::Right => (m.text_x + slack, 0.0),
            Align::Justify if is_final || line.spaces == 0 => (m.text_x, 0.0),
            Align::Justify => (m.text_x, slack / line.spaces as f32),
        };
        out.push(Primitive::Text {
            x,
            baseline: baseline(top + i as f32 * m.line_height, m.line_height, m.font_size),
            text: line.text.clone(),
            font: s.font,
            size: m.font_size,
            color: s.color,
            word_spacing,
        });
    }

    if let (Some(color), true) = (s.underline, last) {
        let y = frame.bottom() + s.rule_thickness;
        out.push(Primitive::Rule {
            x1: frame.x,
            y1: y,
            x2: frame.x + frame.width,
            y2: y,
            thickness: s.rule_thickness,
            color,
        });
    }
    out
}

// ── Furniture ────────────────────────────────────────────────────────────

fn furniture(page: usize, pages: usize, title: Option<&str>, config: &StyleConfig) -> Vec<Primitive> {
    let (_, page_height) = config.page_dimensions();
    let mut out = Vec::new();

    if let Some(ref header) = config.header {
        let band_top = config.page.margin_top;
        let y = band_top + header.font_size;
        out.extend(furniture_text(header, page, pages, title, y, config));
    }
    if let Some(ref footer) = config.footer {
        let band_bottom = page_height - config.page.margin_bottom;
        let y = band_bottom - DESCENT * footer.font_size;
        out.extend(furniture_text(footer, page, pages, title, y, config));
    }
    out
}

fn furniture_text(
    f: &Furniture,
    page: usize,
    pages: usize,
    title: Option<&str>,
    baseline: f32,
    config: &StyleConfig,
) -> Option<Primitive> {
    if f.skip_first_page && page == 1 {
        return None;
    }
    let width = config.content_width();
    let line = layout::fit_single_line(&f.text_for(page, pages, title), f.font, f.font_size, width)?;
    if line.text.is_empty() {
        return None;
    }
    let left = config.page.margin_left;
    let slack = (width - line.width).max(0.0);
    let x = match f.align {
        Align::Left | Align::Justify => left,
        Align::Center => left + slack / 2.0,
        Align::Right => left + slack,
    };
    Some(Primitive::Text {
        x,
        baseline,
        text: line.text,
        font: f.font,
        size: f.font_size,
        color: f.color,
        word_spacing: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Font, Rgb, Theme};

    /// Courier 10pt on a 12pt grid with no spacing: every glyph is 6pt wide
    /// and every line exactly 12pt tall.
    fn grid_style(content_height: f32) -> StyleConfig {
        let plain = BlockStyle::new(Font::Courier, 10.0, 12.0, Rgb::BLACK);
        StyleConfig::builder()
            .page_size(crate::style::PageSize::Custom {
                width: 120.0 + 20.0,
                height: content_height + 20.0,
            })
            .margins(10.0, 10.0, 10.0, 10.0)
            .fallback(plain)
            .build()
            .unwrap()
    }

    fn texts(doc: &Document) -> Vec<Vec<String>> {
        doc.pages
            .iter()
            .map(|p| {
                p.blocks
                    .iter()
                    .flat_map(|b| b.lines().into_iter().map(str::to_string))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn empty_input_yields_one_empty_page() {
        let doc = render(&[], &StyleConfig::default()).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert!(doc.pages[0].blocks.is_empty());
        assert_eq!(doc.title, None);
        // footer still drawn
        assert_eq!(doc.pages[0].furniture.len(), 1);
    }

    #[test]
    fn missing_style_fails_before_layout() {
        let style = StyleConfig::builder()
            .block(
                BlockKind::Paragraph,
                BlockStyle::new(Font::Helvetica, 10.0, 12.0, Rgb::BLACK),
            )
            .build()
            .unwrap();
        let err = render(&[Block::paragraph("x"), Block::quote("q")], &style).unwrap_err();
        assert!(matches!(
            err,
            Summary2PdfError::MissingStyle {
                kind: BlockKind::Quote
            }
        ));
    }

    #[test]
    fn uniform_blocks_paginate_exactly() {
        // 5 lines per page, 12 single-line headings → 3 pages
        let style = grid_style(60.0);
        let blocks: Vec<Block> = (0..12).map(|i| Block::heading(2, format!("h{i}"))).collect();
        let doc = render(&blocks, &style).unwrap();
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.pages[0].blocks.len(), 5);
        assert_eq!(doc.pages[2].blocks.len(), 2);
    }

    #[test]
    fn paragraph_splits_across_pages() {
        let style = grid_style(36.0); // 3 lines per page
        // Each word fills a 120pt line (20 glyphs).
        let word = "x".repeat(20);
        let text = vec![word.as_str(); 7].join(" ");
        let doc = render(&[Block::paragraph(text)], &style).unwrap();
        assert_eq!(doc.page_count(), 3);
        let frags: Vec<_> = doc.placed_blocks().collect();
        assert_eq!(frags.len(), 3);
        assert!(!frags[0].continued);
        assert!(frags[1].continued && frags[2].continued);
        assert_eq!(frags[2].lines().len(), 1);
        assert!(frags.iter().all(|f| f.index == 0));
    }

    #[test]
    fn non_paragraph_moves_to_next_page_whole() {
        let style = grid_style(36.0);
        let two_lines = format!("{} {}", "a".repeat(20), "b".repeat(20));
        let blocks = vec![
            Block::paragraph("one"),
            Block::paragraph("two"),
            Block::quote(two_lines),
        ];
        let doc = render(&blocks, &style).unwrap();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[1].blocks[0].kind, BlockKind::Quote);
        assert_eq!(doc.pages[1].blocks[0].lines().len(), 2);
    }

    #[test]
    fn overwide_word_shrinks_font_first() {
        let style = grid_style(100.0);
        // 21 glyphs: 126pt at 10pt, 119.7pt at 9.5pt.
        let doc = render(&[Block::paragraph("y".repeat(21))], &style).unwrap();
        let placed = doc.placed_blocks().next().unwrap();
        assert_eq!(placed.font_size, 9.5);
        assert_eq!(placed.lines(), vec!["y".repeat(21)]);
    }

    #[test]
    fn overflow_policy_fail_and_ellipsis() {
        let long = "z".repeat(60);
        let fail = grid_style(100.0).into_builder().overflow(OverflowPolicy::Fail).build().unwrap();
        let err = render(&[Block::paragraph(long.clone())], &fail).unwrap_err();
        assert!(err.is_render_error());

        let doc = render(&[Block::paragraph(long)], &grid_style(100.0)).unwrap();
        let placed = doc.placed_blocks().next().unwrap();
        assert_eq!(placed.font_size, 6.0);
        let line = placed.lines()[0];
        assert!(line.ends_with('…'));
        assert!(line.len() < 60 + '…'.len_utf8());
    }

    #[test]
    fn tall_quote_is_clipped_with_ellipsis_or_fails() {
        let style = grid_style(36.0);
        let text = vec!["q".repeat(20); 5].join(" ");
        let doc = render(&[Block::quote(text.clone())], &style).unwrap();
        let placed = doc.placed_blocks().next().unwrap();
        assert_eq!(placed.lines().len(), 3);
        assert!(placed.lines()[2].ends_with('…'));

        let fail = style.into_builder().overflow(OverflowPolicy::Fail).build().unwrap();
        assert!(render(&[Block::quote(text)], &fail).unwrap_err().is_render_error());
    }

    #[test]
    fn justify_spreads_all_but_last_line() {
        let style = grid_style(100.0)
            .into_builder()
            .block(
                BlockKind::Paragraph,
                BlockStyle::new(Font::Courier, 10.0, 12.0, Rgb::BLACK).align(Align::Justify),
            )
            .build()
            .unwrap();
        // "aaaaaaaa bbbbbbbb" = 102pt, leaving 18pt of slack on line 1.
        let doc = render(&[Block::paragraph("aaaaaaaa bbbbbbbb cccc")], &style).unwrap();
        let spacings: Vec<f32> = doc
            .placed_blocks()
            .flat_map(|b| b.primitives.iter())
            .filter_map(|p| match p {
                Primitive::Text { word_spacing, .. } => Some(*word_spacing),
                _ => None,
            })
            .collect();
        assert_eq!(spacings, vec![18.0, 0.0]);
    }

    #[test]
    fn center_and_right_offset_lines() {
        let base = grid_style(100.0);
        let x_of = |align: Align| {
            let style = base
                .clone()
                .into_builder()
                .block(
                    BlockKind::Paragraph,
                    BlockStyle::new(Font::Courier, 10.0, 12.0, Rgb::BLACK).align(align),
                )
                .build()
                .unwrap();
            let doc = render(&[Block::paragraph("abcd")], &style).unwrap();
            match doc.pages[0].blocks[0].primitives[0] {
                Primitive::Text { x, .. } => x,
                _ => panic!("expected text"),
            }
        };
        assert_eq!(x_of(Align::Left), 10.0);
        assert_eq!(x_of(Align::Center), 10.0 + 48.0);
        assert_eq!(x_of(Align::Right), 10.0 + 96.0);
    }

    #[test]
    fn bullets_hang_after_marker() {
        let style = grid_style(100.0);
        let doc = render(&[Block::bullet("item", 0), Block::bullet("deep", 9)], &style).unwrap();
        let list = &style.list;
        let xs: Vec<Vec<(String, f32)>> = doc
            .placed_blocks()
            .map(|b| {
                b.primitives
                    .iter()
                    .filter_map(|p| match p {
                        Primitive::Text { x, text, .. } => Some((text.clone(), *x)),
                        _ => None,
                    })
                    .collect()
            })
            .collect();
        assert_eq!(xs[0][0], ("•".to_string(), 10.0));
        assert_eq!(xs[0][1], ("item".to_string(), 10.0 + list.marker_gap));
        let capped = 10.0 + f32::from(list.max_level) * list.level_indent;
        assert_eq!(xs[1][0].1, capped);
    }

    #[test]
    fn divider_draws_rule_across_box() {
        let doc = render(&[Block::Divider], &grid_style(100.0)).unwrap();
        let placed = doc.placed_blocks().next().unwrap();
        assert!(matches!(
            placed.primitives[0],
            Primitive::Rule { x1, x2, .. } if x1 == 10.0 && x2 == 130.0
        ));
    }

    #[test]
    fn quote_and_heading_decorations() {
        let style = StyleConfig::preset(Theme::Magazine);
        let doc = render(&[Block::heading(2, "Part"), Block::quote("Said.")], &style).unwrap();
        let blocks: Vec<_> = doc.placed_blocks().collect();
        assert!(blocks[0]
            .primitives
            .iter()
            .any(|p| matches!(p, Primitive::Rule { .. })));
        assert!(matches!(blocks[1].primitives[0], Primitive::Fill { .. }));
        assert!(matches!(blocks[1].primitives[1], Primitive::Rule { .. }));
    }

    #[test]
    fn subtitle_joins_the_title_banner() {
        let style = StyleConfig::preset(Theme::Magazine);
        let subtitle = style.subtitle.clone().unwrap();
        let doc = render(
            &[
                Block::heading(1, "Dune"),
                Block::heading(2, "A novel of Arrakis"),
                Block::heading(2, "Overview"),
            ],
            &style,
        )
        .unwrap();
        let blocks: Vec<_> = doc.placed_blocks().collect();

        // banner: no gap between title and subtitle
        assert!((blocks[0].frame.bottom() - blocks[1].frame.y).abs() < EPSILON);
        assert_eq!(blocks[1].kind, BlockKind::Heading(2));
        assert_eq!(blocks[1].font_size, subtitle.font_size);
        assert!(matches!(
            blocks[1].primitives[0],
            Primitive::Fill { color, .. } if Some(color) == subtitle.background
        ));

        // later h2s keep the section style
        assert_eq!(blocks[2].font_size, style.blocks[&BlockKind::Heading(2)].font_size);
        assert!(blocks[2]
            .primitives
            .iter()
            .all(|p| !matches!(p, Primitive::Fill { .. })));
    }

    #[test]
    fn title_without_subtitle_keeps_its_spacing() {
        let style = StyleConfig::preset(Theme::Magazine);
        let h1 = &style.blocks[&BlockKind::Heading(1)];
        let doc = render(&[Block::heading(1, "Dune"), Block::paragraph("Text.")], &style).unwrap();
        let blocks: Vec<_> = doc.placed_blocks().collect();
        let gap = blocks[1].frame.y - blocks[0].frame.bottom();
        assert!((gap - h1.space_after).abs() < EPSILON, "gap {gap}");
    }

    #[test]
    fn furniture_filled_after_pagination() {
        let style = grid_style(36.0)
            .into_builder()
            .margins(10.0, 10.0, 10.0, 10.0)
            .footer(Some(Furniture {
                template: "{title} {page}/{pages}".into(),
                font: Font::Courier,
                font_size: 5.0,
                color: Rgb::BLACK,
                height: 0.0,
                align: Align::Left,
                skip_first_page: false,
            }))
            .build()
            .unwrap();
        let blocks: Vec<Block> = std::iter::once(Block::heading(1, "BOOK SUMMARY: Dune"))
            .chain((0..4).map(|i| Block::paragraph(format!("p{i}"))))
            .collect();
        let doc = render(&blocks, &style).unwrap();
        assert_eq!(doc.title.as_deref(), Some("Dune"));
        assert_eq!(doc.page_count(), 2);
        let footer: Vec<_> = doc
            .pages
            .iter()
            .map(|p| match &p.furniture[0] {
                Primitive::Text { text, .. } => text.clone(),
                _ => String::new(),
            })
            .collect();
        assert_eq!(footer, vec!["Dune 1/2", "Dune 2/2"]);
    }

    #[test]
    fn render_is_deterministic() {
        let blocks = vec![
            Block::heading(1, "T"),
            Block::paragraph("alpha beta gamma"),
            Block::bullet("b", 1),
            Block::Divider,
        ];
        let style = StyleConfig::preset(Theme::Standard);
        assert_eq!(render(&blocks, &style).unwrap(), render(&blocks, &style).unwrap());
        assert_eq!(texts(&render(&blocks, &style).unwrap())[0][0], "T");
    }
}

//! The paginated, abstract output of rendering.
//!
//! Coordinates are PDF points with the origin at the **top-left** corner of
//! the page and `y` growing downwards; the PDF writer flips them. A
//! [`Document`] is fully positioned: every glyph run already knows its font,
//! size, colour and baseline, so serialisation is a straight walk.

use crate::block::BlockKind;
use crate::style::{Font, Rgb};
use serde::Serialize;

/// Axis-aligned rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Primitive {
    /// A single line of text starting at `(x, baseline)`.
    Text {
        x: f32,
        baseline: f32,
        text: String,
        font: Font,
        size: f32,
        color: Rgb,
        /// Extra space added to every ASCII space (justification).
        word_spacing: f32,
    },
    /// Solid rectangle.
    Fill { rect: Rect, color: Rgb },
    /// Straight line from `(x1, y1)` to `(x2, y2)`.
    Rule {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
        color: Rgb,
    },
}

/// A block (or a fragment of a split paragraph) positioned on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBlock {
    /// Index into the rendered block slice.
    pub index: usize,
    pub kind: BlockKind,
    /// Frame excluding `space_before`/`space_after`.
    pub frame: Rect,
    /// `true` for every paragraph fragment after the first.
    pub continued: bool,
    /// Effective font size after any overflow shrinking.
    pub font_size: f32,
    pub primitives: Vec<Primitive>,
}

impl PlacedBlock {
    /// Concatenated text of the block's glyph runs, one line per run.
    pub fn lines(&self) -> Vec<&str> {
        self.primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// One physical page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based.
    pub number: usize,
    pub blocks: Vec<PlacedBlock>,
    /// Header and footer primitives, drawn after the blocks.
    pub furniture: Vec<Primitive>,
}

/// Rendered summary, ready for serialisation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub width: f32,
    pub height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All placed blocks in document order, across pages.
    pub fn placed_blocks(&self) -> impl Iterator<Item = &PlacedBlock> {
        self.pages.iter().flat_map(|p| p.blocks.iter())
    }

    /// Every font referenced by any primitive, sorted and deduplicated.
    pub fn fonts(&self) -> Vec<Font> {
        let mut fonts: Vec<Font> = self
            .pages
            .iter()
            .flat_map(|p| {
                p.blocks
                    .iter()
                    .flat_map(|b| b.primitives.iter())
                    .chain(p.furniture.iter())
            })
            .filter_map(|prim| match prim {
                Primitive::Text { font, .. } => Some(*font),
                _ => None,
            })
            .collect();
        fonts.sort();
        fonts.dedup();
        fonts
    }

    /// Page text joined per line; handy for tests and `--dump` output.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for block in self.placed_blocks() {
            for line in block.lines() {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str, font: Font) -> Primitive {
        Primitive::Text {
            x: 0.0,
            baseline: 10.0,
            text: s.into(),
            font,
            size: 10.0,
            color: Rgb::BLACK,
            word_spacing: 0.0,
        }
    }

    fn doc() -> Document {
        let block = |index, prims| PlacedBlock {
            index,
            kind: BlockKind::Paragraph,
            frame: Rect::new(0.0, 0.0, 100.0, 12.0),
            continued: false,
            font_size: 10.0,
            primitives: prims,
        };
        Document {
            width: 595.0,
            height: 842.0,
            title: None,
            pages: vec![
                Page {
                    number: 1,
                    blocks: vec![block(0, vec![text("one", Font::TimesRoman)])],
                    furniture: vec![text("Page 1", Font::Helvetica)],
                },
                Page {
                    number: 2,
                    blocks: vec![block(
                        1,
                        vec![
                            Primitive::Fill {
                                rect: Rect::new(0.0, 0.0, 1.0, 1.0),
                                color: Rgb::WHITE,
                            },
                            text("two", Font::TimesRoman),
                        ],
                    )],
                    furniture: vec![],
                },
            ],
        }
    }

    #[test]
    fn fonts_are_deduplicated_and_include_furniture() {
        assert_eq!(doc().fonts(), vec![Font::Helvetica, Font::TimesRoman]);
    }

    #[test]
    fn plain_text_skips_non_text_primitives() {
        assert_eq!(doc().plain_text(), "one\ntwo\n");
        assert_eq!(doc().page_count(), 2);
    }

    #[test]
    fn serialises_with_op_tags() {
        let json = serde_json::to_string(&doc()).unwrap();
        assert!(json.contains("\"op\":\"fill\""));
        assert!(json.contains("\"kind\":\"paragraph\""));
    }
}

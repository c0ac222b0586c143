//! Typed content blocks produced by the parser and consumed by the renderer.
//!
//! A summary document is a flat, ordered list of [`Block`]s. There is no
//! nesting: bullet depth is carried as an `indent` number rather than as
//! child blocks, and every `text` is a plain string with inline markup
//! already removed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deepest heading level the parser recognises (`######`).
pub const MAX_HEADING_LEVEL: u8 = 6;

/// One semantic unit of a summary document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// `#`…`######` heading. `level` is always in `1..=6`.
    Heading { level: u8, text: String },
    /// Running prose; consecutive source lines are joined with one space.
    Paragraph { text: String },
    /// List item. `indent` is the nesting depth, 0 for top-level items.
    BulletItem { text: String, indent: u8 },
    /// `>` block quote.
    Quote { text: String },
    /// Thematic break (`---`, `***`, `___`).
    Divider,
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, MAX_HEADING_LEVEL),
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    pub fn bullet(text: impl Into<String>, indent: u8) -> Self {
        Block::BulletItem {
            text: text.into(),
            indent,
        }
    }

    pub fn quote(text: impl Into<String>) -> Self {
        Block::Quote { text: text.into() }
    }

    /// The style-lookup key for this block.
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { level, .. } => BlockKind::Heading(*level),
            Block::Paragraph { .. } => BlockKind::Paragraph,
            Block::BulletItem { .. } => BlockKind::BulletItem,
            Block::Quote { .. } => BlockKind::Quote,
            Block::Divider => BlockKind::Divider,
        }
    }

    /// Text content, or `""` for a divider.
    pub fn text(&self) -> &str {
        match self {
            Block::Heading { text, .. }
            | Block::Paragraph { text }
            | Block::BulletItem { text, .. }
            | Block::Quote { text } => text,
            Block::Divider => "",
        }
    }
}

/// Style-lookup key: the block variant plus the heading level.
///
/// Serialises as a short string (`h1`…`h6`, `paragraph`, `bullet`, `quote`,
/// `divider`) so it can key a JSON object in a style file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    BulletItem,
    Quote,
    Divider,
}

impl BlockKind {
    /// Every kind the parser can emit, in a stable order.
    pub fn all() -> Vec<BlockKind> {
        let mut kinds: Vec<BlockKind> = (1..=MAX_HEADING_LEVEL).map(BlockKind::Heading).collect();
        kinds.extend([
            BlockKind::Paragraph,
            BlockKind::BulletItem,
            BlockKind::Quote,
            BlockKind::Divider,
        ]);
        kinds
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Heading(level) => write!(f, "h{level}"),
            BlockKind::Paragraph => f.write_str("paragraph"),
            BlockKind::BulletItem => f.write_str("bullet"),
            BlockKind::Quote => f.write_str("quote"),
            BlockKind::Divider => f.write_str("divider"),
        }
    }
}

impl FromStr for BlockKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paragraph" | "body" => Ok(BlockKind::Paragraph),
            "bullet" | "bullet_item" => Ok(BlockKind::BulletItem),
            "quote" => Ok(BlockKind::Quote),
            "divider" => Ok(BlockKind::Divider),
            other => {
                let level = other
                    .strip_prefix('h')
                    .and_then(|n| n.parse::<u8>().ok())
                    .filter(|n| (1..=MAX_HEADING_LEVEL).contains(n));
                level
                    .map(BlockKind::Heading)
                    .ok_or_else(|| format!("unknown block kind '{s}'"))
            }
        }
    }
}

impl TryFrom<String> for BlockKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        kind.to_string()
    }
}

//! Block parser: semi-structured summary text → ordered [`Block`]s.
//!
//! The grammar is a small, forgiving subset of Markdown as produced by the
//! summarisation prompts. Parsing is total: any line the rules do not
//! recognise becomes paragraph text, so nothing but the markers themselves is
//! ever dropped.
//!
//! Line classification, first match wins:
//!
//! | Marker | Block |
//! |--------|-------|
//! | `#`…`######` + space + text | [`Block::Heading`] |
//! | `>` | [`Block::Quote`] (a bare `>` ends the quote) |
//! | `---`, `* * *`, `___` | [`Block::Divider`] |
//! | `-`, `*`, `+`, `•` + space + text | [`Block::BulletItem`] |
//! | anything else | [`Block::Paragraph`] |
//!
//! Consecutive paragraph lines (and consecutive quote lines) are joined with
//! a single space. Blank lines only end the current run.

use crate::block::{Block, MAX_HEADING_LEVEL};
use crate::pipeline::normalise::clean_text;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#+)\s+(.*)$").unwrap());

static RE_CLOSING_HASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+#+$").unwrap());

static RE_DIVIDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})$").unwrap()
});

static RE_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)[-*+•][ \t]+(\S.*)$").unwrap());

static RE_STRONG_STARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

static RE_STRONG_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.+?)__").unwrap());

static RE_TITLE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*book\s+summary\s*:\s*").unwrap());

/// Columns a tab advances when measuring bullet indentation.
const TAB_WIDTH: usize = 4;

/// Columns per bullet nesting level.
const INDENT_STEP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunKind {
    Paragraph,
    Quote,
}

/// Lines accumulated for the block currently being built.
#[derive(Debug)]
struct Run {
    kind: RunKind,
    parts: Vec<String>,
}

#[derive(Debug, Default)]
struct Parser {
    blocks: Vec<Block>,
    run: Option<Run>,
}

impl Parser {
    fn push_line(&mut self, kind: RunKind, text: &str) {
        match self.run {
            Some(ref mut run) if run.kind == kind => run.parts.push(text.to_string()),
            _ => {
                self.flush();
                self.run = Some(Run {
                    kind,
                    parts: vec![text.to_string()],
                });
            }
        }
    }

    fn flush(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        let text = strip_inline(&run.parts.join(" "));
        if text.is_empty() {
            return;
        }
        self.blocks.push(match run.kind {
            RunKind::Paragraph => Block::paragraph(text),
            RunKind::Quote => Block::quote(text),
        });
    }

    fn emit(&mut self, block: Block) {
        self.flush();
        if block.text().is_empty() && block != Block::Divider {
            return;
        }
        self.blocks.push(block);
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

/// Parse summary text into blocks. Never fails; empty input yields no blocks.
pub fn parse(raw: &str) -> Vec<Block> {
    let mut parser = Parser::default();

    for line in raw.split('\n') {
        let line = line.trim_end();
        let content = line.trim_start();

        if content.is_empty() {
            parser.flush();
            continue;
        }

        if let Some(heading) = heading(content) {
            parser.emit(heading);
        } else if let Some(rest) = content.strip_prefix('>') {
            let rest = rest.trim();
            if rest.is_empty() {
                parser.flush();
            } else {
                parser.push_line(RunKind::Quote, rest);
            }
        } else if RE_DIVIDER.is_match(content) {
            parser.emit(Block::Divider);
        } else if let Some(bullet) = bullet(line) {
            parser.emit(bullet);
        } else {
            parser.push_line(RunKind::Paragraph, content);
        }
    }

    parser.finish()
}

/// Normalise then parse.
pub fn parse_document(raw: &str) -> Vec<Block> {
    parse(&clean_text(raw))
}

/// First level-1 heading, without any `BOOK SUMMARY:` prefix.
pub fn extract_title(blocks: &[Block]) -> Option<String> {
    blocks.iter().find_map(|b| match b {
        Block::Heading { level: 1, text } => {
            let title = RE_TITLE_PREFIX.replace(text, "").trim().to_string();
            (!title.is_empty()).then_some(title)
        }
        _ => None,
    })
}

fn heading(content: &str) -> Option<Block> {
    let caps = RE_HEADING.captures(content)?;
    let level = caps[1].len();
    if level > usize::from(MAX_HEADING_LEVEL) {
        return None;
    }
    let closed = RE_CLOSING_HASHES.replace(caps[2].trim(), "");
    let text = closed.trim();
    if text.is_empty() {
        return None;
    }
    Some(Block::heading(level as u8, strip_inline(text)))
}

fn bullet(line: &str) -> Option<Block> {
    let caps = RE_BULLET.captures(line)?;
    let columns: usize = caps[1]
        .chars()
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum();
    let indent = u8::try_from(columns / INDENT_STEP).unwrap_or(u8::MAX);
    Some(Block::bullet(strip_inline(caps[2].trim()), indent))
}

/// Remove `**strong**` and `__strong__` markers, keeping the inner text.
pub(crate) fn strip_inline(text: &str) -> String {
    let s = RE_STRONG_STARS.replace_all(text, "$1");
    let s = RE_STRONG_UNDERSCORES.replace_all(&s, "$1");
    s.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(parse("").is_empty());
        assert!(parse("   \n\t\n\n").is_empty());
    }

    #[test]
    fn test_heading_levels() {
        let blocks = parse("# One\n### Three\n###### Six");
        assert_eq!(
            blocks,
            vec![
                Block::heading(1, "One"),
                Block::heading(3, "Three"),
                Block::heading(6, "Six"),
            ]
        );
    }

    #[test]
    fn test_seven_hashes_is_paragraph() {
        assert_eq!(parse("####### deep"), vec![Block::paragraph("####### deep")]);
        assert_eq!(parse("#"), vec![Block::paragraph("#")]);
        assert_eq!(parse("#hashtag"), vec![Block::paragraph("#hashtag")]);
    }

    #[test]
    fn test_closing_hashes_removed() {
        assert_eq!(parse("## Title ##"), vec![Block::heading(2, "Title")]);
        assert_eq!(parse("## C# basics"), vec![Block::heading(2, "C# basics")]);
    }

    #[test]
    fn test_paragraph_lines_joined() {
        let blocks = parse("first line\nsecond line\n\nnext para");
        assert_eq!(
            blocks,
            vec![
                Block::paragraph("first line second line"),
                Block::paragraph("next para"),
            ]
        );
    }

    #[test]
    fn test_blank_lines_collapse() {
        let blocks = parse("a\n\n\n\n\nb");
        assert_eq!(blocks, vec![Block::paragraph("a"), Block::paragraph("b")]);
    }

    #[test]
    fn test_trailing_whitespace_ignored() {
        assert_eq!(parse("# Head   \t"), vec![Block::heading(1, "Head")]);
        assert_eq!(parse("text   \nmore  "), vec![Block::paragraph("text more")]);
    }

    #[test]
    fn test_bullet_markers_and_indent() {
        let blocks = parse("- a\n* b\n+ c\n• d\n  - e\n    * f\n\t- g");
        assert_eq!(
            blocks,
            vec![
                Block::bullet("a", 0),
                Block::bullet("b", 0),
                Block::bullet("c", 0),
                Block::bullet("d", 0),
                Block::bullet("e", 1),
                Block::bullet("f", 2),
                Block::bullet("g", 2),
            ]
        );
    }

    #[test]
    fn test_divider_beats_bullet() {
        assert_eq!(parse("* * *"), vec![Block::Divider]);
        assert_eq!(parse("---"), vec![Block::Divider]);
        assert_eq!(parse("___"), vec![Block::Divider]);
        assert_eq!(parse("- - -"), vec![Block::Divider]);
        assert_eq!(parse("--"), vec![Block::paragraph("--")]);
        assert_eq!(parse("-*-"), vec![Block::paragraph("-*-")]);
    }

    #[test]
    fn test_heading_beats_quote_beats_bullet() {
        assert_eq!(parse("# > not a quote"), vec![Block::heading(1, "> not a quote")]);
        assert_eq!(parse("> - not a bullet"), vec![Block::quote("- not a bullet")]);
    }

    #[test]
    fn test_quote_lines_merge_and_bare_marker_breaks() {
        let blocks = parse("> one\n> two\n>\n> three");
        assert_eq!(
            blocks,
            vec![Block::quote("one two"), Block::quote("three")]
        );
    }

    #[test]
    fn test_paragraph_ends_at_other_kinds() {
        let blocks = parse("intro\n- item\ntail\n> q\nafter");
        assert_eq!(
            blocks,
            vec![
                Block::paragraph("intro"),
                Block::bullet("item", 0),
                Block::paragraph("tail"),
                Block::quote("q"),
                Block::paragraph("after"),
            ]
        );
    }

    #[test]
    fn test_strong_markers_stripped() {
        let blocks = parse("**Key idea:** spice\n- __bold__ point\n## **Part** One");
        assert_eq!(
            blocks,
            vec![
                Block::paragraph("Key idea: spice"),
                Block::bullet("bold point", 0),
                Block::heading(2, "Part One"),
            ]
        );
    }

    #[test]
    fn test_strong_spanning_joined_lines() {
        assert_eq!(
            parse("**a\nb** c"),
            vec![Block::paragraph("a b c")]
        );
    }

    #[test]
    fn test_unmatched_markers_kept() {
        assert_eq!(parse("2 ** 3"), vec![Block::paragraph("2 ** 3")]);
    }

    #[test]
    fn test_crlf_lines() {
        assert_eq!(
            parse("# T\r\n\r\nbody\r\n"),
            vec![Block::heading(1, "T"), Block::paragraph("body")]
        );
    }

    #[test]
    fn test_parse_document_strips_fence() {
        let blocks = parse_document("```markdown\n# Dune\n\nSpice.\n```");
        assert_eq!(blocks, vec![Block::heading(1, "Dune"), Block::paragraph("Spice.")]);
    }

    #[test]
    fn test_extract_title() {
        let blocks = parse("## Sub\n# BOOK SUMMARY: Dune\n# Other");
        assert_eq!(extract_title(&blocks).as_deref(), Some("Dune"));
        assert_eq!(extract_title(&parse("## only h2")), None);
        assert_eq!(
            extract_title(&parse("# Book summary:   Emma")).as_deref(),
            Some("Emma")
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let input = "# T\n\npara one\n- b\n  - c\n> q\n---\nend";
        assert_eq!(parse(input), parse(input));
    }
}

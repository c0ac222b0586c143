//! Normalisation: deterministic cleanup of AI-generated summary text.
//!
//! Summaries come straight out of a chat model and carry the usual artefacts:
//! an outer ```` ```markdown ```` fence the prompt asked it not to add,
//! Windows line endings, trailing blanks and zero-width characters pasted in
//! from web sources. None of these should influence block detection, so they
//! are removed before parsing.
//!
//! ## Rule Order
//!
//! Fences are stripped first so the fence lines never reach the parser, then
//! line endings are unified before per-line trimming. Invisible characters go
//! last because a ZWSP can hide at the end of an otherwise blank line.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all normalisation rules to raw summary text.
///
/// Rules (applied in order):
/// 1. Strip an outer markdown fence that wraps the whole text
/// 2. Normalise line endings (CRLF/CR → LF)
/// 3. Trim trailing whitespace per line
/// 4. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens, joiners)
pub fn clean_text(input: &str) -> String {
    let s = strip_outer_fence(input);
    let s = normalise_line_endings(&s);
    let s = trim_trailing_whitespace(&s);
    remove_invisible_chars(&s)
}

// ── Rule 1: Strip outer markdown fence ───────────────────────────────────────

static RE_OUTER_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:markdown|md)?\r?\n(.*)\r?\n```\s*$").unwrap());

fn strip_outer_fence(input: &str) -> String {
    match RE_OUTER_FENCE.captures(input.trim()) {
        Some(caps) => caps[1].to_string(),
        None => input.to_string(),
    }
}

// ── Rule 2: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 3: Trim trailing whitespace per line ────────────────────────────────

fn trim_trailing_whitespace(input: &str) -> String {
    input
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Rule 4: Remove invisible Unicode characters ──────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fence() {
        let input = "```markdown\n# Dune\nSpice.\n```";
        assert_eq!(strip_outer_fence(input), "# Dune\nSpice.");
    }

    #[test]
    fn test_strip_fence_no_lang() {
        assert_eq!(strip_outer_fence("```\nbody\n```\n"), "body");
    }

    #[test]
    fn test_inner_fence_is_kept() {
        let input = "intro\n```\ncode\n```";
        assert_eq!(strip_outer_fence(input), input);
    }

    #[test]
    fn test_normalise_line_endings() {
        assert_eq!(normalise_line_endings("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_trim_trailing_whitespace() {
        assert_eq!(trim_trailing_whitespace("a  \n  b\t\n"), "a\n  b");
    }

    #[test]
    fn test_remove_invisible() {
        let input = "hello\u{200B}world\u{FEFF}foo\u{00AD}bar\u{2060}";
        assert_eq!(remove_invisible_chars(input), "helloworldfoobar");
    }

    #[test]
    fn test_clean_text_full() {
        let input = "```markdown\r\n# BOOK SUMMARY: Dune   \r\n\r\nSpice\u{200B} must flow.\r\n```";
        assert_eq!(
            clean_text(input),
            "# BOOK SUMMARY: Dune\n\nSpice must flow."
        );
    }

    #[test]
    fn test_clean_text_idempotent() {
        let input = "```\n# T \r\n\n- a\u{FEFF}\n```";
        let once = clean_text(input);
        assert_eq!(clean_text(&once), once);
    }
}

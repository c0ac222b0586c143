//! Greedy word wrapping on top of [`metrics`](super::metrics).
//!
//! Words are whitespace-separated runs; runs of whitespace collapse to one
//! space. A line never exceeds `max_width`: a single word wider than the
//! line is reported to the caller, which decides whether to shrink the font,
//! truncate, or fail.

use super::metrics::{space_width, text_width, ELLIPSIS};
use crate::style::Font;

/// Width tolerance for float accumulation.
const EPSILON: f32 = 0.01;

/// One wrapped line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    /// Natural width at the wrap size, in points.
    pub width: f32,
    /// Number of inter-word spaces (justification gaps).
    pub spaces: usize,
}

impl Line {
    fn measured(text: String, font: Font, size: f32) -> Self {
        let width = text_width(font, size, &text);
        let spaces = text.matches(' ').count();
        Self {
            text,
            width,
            spaces,
        }
    }
}

/// Wrap `text` into lines no wider than `max_width`.
///
/// Returns the first word that cannot fit on a line of its own as `Err`.
pub fn wrap(text: &str, font: Font, size: f32, max_width: f32) -> Result<Vec<Line>, String> {
    let space = space_width(font, size);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let w = text_width(font, size, word);
        if w > max_width + EPSILON {
            return Err(word.to_string());
        }
        if current.is_empty() {
            current.push_str(word);
            current_width = w;
        } else if current_width + space + w <= max_width + EPSILON {
            current.push(' ');
            current.push_str(word);
            current_width += space + w;
        } else {
            lines.push(Line::measured(std::mem::take(&mut current), font, size));
            current.push_str(word);
            current_width = w;
        }
    }
    if !current.is_empty() {
        lines.push(Line::measured(current, font, size));
    }
    Ok(lines)
}

/// Wrap, cutting over-wide words down to a prefix plus `…`.
///
/// `None` when even one character plus `…` cannot fit.
pub fn wrap_truncating(text: &str, font: Font, size: f32, max_width: f32) -> Option<Vec<Line>> {
    let mut words = Vec::new();
    for word in text.split_whitespace() {
        if text_width(font, size, word) > max_width + EPSILON {
            words.push(truncate_word(word, font, size, max_width)?);
        } else {
            words.push(word.to_string());
        }
    }
    wrap(&words.join(" "), font, size, max_width).ok()
}

/// Longest prefix of `word` that fits together with a trailing `…`.
pub fn truncate_word(word: &str, font: Font, size: f32, max_width: f32) -> Option<String> {
    let budget = max_width - text_width(font, size, &ELLIPSIS.to_string()) + EPSILON;
    let mut width = 0.0;
    let mut prefix = String::new();
    for c in word.chars() {
        let w = text_width(font, size, c.encode_utf8(&mut [0; 4]));
        if width + w > budget {
            break;
        }
        width += w;
        prefix.push(c);
    }
    if prefix.is_empty() {
        return None;
    }
    prefix.push(ELLIPSIS);
    Some(prefix)
}

/// `line` ending in `…`, shortened as needed to stay within `max_width`.
pub fn with_ellipsis(line: &str, font: Font, size: f32, max_width: f32) -> Option<Line> {
    let mut chars: Vec<char> = line.chars().collect();
    loop {
        while chars.last().is_some_and(|c| c.is_whitespace()) {
            chars.pop();
        }
        let mut candidate: String = chars.iter().collect();
        candidate.push(ELLIPSIS);
        if text_width(font, size, &candidate) <= max_width + EPSILON {
            return Some(Line::measured(candidate, font, size));
        }
        chars.pop()?;
    }
}

/// Fit a single line of furniture text, ellipsising when too wide.
pub fn fit_single_line(text: &str, font: Font, size: f32, max_width: f32) -> Option<Line> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text_width(font, size, &collapsed) <= max_width + EPSILON {
        return Some(Line::measured(collapsed, font, size));
    }
    with_ellipsis(&collapsed, font, size, max_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    const F: Font = Font::Courier;

    // Courier at 10pt: every glyph is exactly 6pt wide.

    #[test]
    fn wraps_greedily() {
        let lines = wrap("aaa bbb ccc dd", F, 10.0, 42.0).unwrap();
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["aaa bbb", "ccc dd"]);
        assert_eq!(lines[0].width, 42.0);
        assert_eq!(lines[0].spaces, 1);
    }

    #[test]
    fn collapses_whitespace_and_keeps_words() {
        let lines = wrap("  a \t b\n c  ", F, 10.0, 1000.0).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "a b c");
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap("   ", F, 10.0, 100.0).unwrap().is_empty());
    }

    #[test]
    fn reports_overwide_word() {
        let err = wrap("ok enormousword", F, 10.0, 30.0).unwrap_err();
        assert_eq!(err, "enormousword");
    }

    #[test]
    fn truncates_overwide_word() {
        // 30pt fits four glyphs plus the ellipsis
        assert_eq!(truncate_word("abcdefgh", F, 10.0, 30.0).as_deref(), Some("abcd…"));
        assert_eq!(truncate_word("abc", F, 10.0, 6.0), None);
        let lines = wrap_truncating("hi abcdefgh", F, 10.0, 30.0).unwrap();
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["hi", "abcd…"]);
    }

    #[test]
    fn ellipsis_shortens_line() {
        let line = with_ellipsis("abc def", F, 10.0, 30.0).unwrap();
        assert_eq!(line.text, "abc…");
        let line = with_ellipsis("ab", F, 10.0, 30.0).unwrap();
        assert_eq!(line.text, "ab…");
        assert!(with_ellipsis("ab", F, 10.0, 5.0).is_none());
    }

    #[test]
    fn furniture_line_fits_or_ellipsises() {
        assert_eq!(fit_single_line("Page 1", F, 10.0, 100.0).unwrap().text, "Page 1");
        assert_eq!(
            fit_single_line("A long running title", F, 10.0, 36.0).unwrap().text,
            "A lon…"
        );
    }
}

//! Standard-14 font metrics and WinAnsi encoding.
//!
//! Widths come from the Adobe AFM files (units of 1/1000 em) for the printable
//! ASCII range. Oblique faces share their upright widths. Times-Italic is
//! measured with Times-Roman widths, which are never narrower for prose, and
//! the Times bold faces scale Times-Roman up by [`TIMES_BOLD_SCALE`] so wrapped
//! lines never overrun.
//!
//! Measurement and encoding agree: a character that [`winansi`] cannot map is
//! drawn as `?` and therefore measured as `?`.

use crate::style::Font;

/// The replacement glyph for characters outside WinAnsi.
pub const REPLACEMENT: char = '?';

/// The ellipsis used for truncated text.
pub const ELLIPSIS: char = '…';

const TIMES_BOLD_SCALE: f32 = 1.1;

const FIRST: u32 = 32;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,                               // 0..9
    278, 278, 584, 584, 584, 556, 1015,                                             // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,                // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,                // N..Z
    278, 278, 278, 469, 556, 333,                                                   // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,                // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,                // n..z
    334, 260, 334, 584,                                                             // {..~
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    278, 278, 564, 564, 564, 444, 921,
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    333, 278, 333, 469, 500, 333,
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    480, 200, 480, 541,
];

#[derive(Clone, Copy)]
enum Family {
    Helvetica,
    HelveticaBold,
    Times,
    TimesBold,
    Courier,
}

fn family(font: Font) -> Family {
    match font {
        Font::Helvetica | Font::HelveticaOblique => Family::Helvetica,
        Font::HelveticaBold | Font::HelveticaBoldOblique => Family::HelveticaBold,
        Font::TimesRoman | Font::TimesItalic => Family::Times,
        Font::TimesBold | Font::TimesBoldItalic => Family::TimesBold,
        Font::Courier | Font::CourierBold | Font::CourierOblique | Font::CourierBoldOblique => {
            Family::Courier
        }
    }
}

/// Advance width of the glyph actually drawn for `c`, in 1/1000 em.
pub fn char_width(font: Font, c: char) -> f32 {
    let drawn = if winansi(c).is_some() { c } else { REPLACEMENT };
    match family(font) {
        Family::Courier => 600.0,
        Family::Helvetica => lookup(&HELVETICA, drawn, Extras::REGULAR),
        Family::HelveticaBold => lookup(&HELVETICA_BOLD, drawn, Extras::BOLD),
        Family::Times => lookup(&TIMES_ROMAN, drawn, Extras::TIMES),
        Family::TimesBold => {
            lookup(&TIMES_ROMAN, drawn, Extras::TIMES) * TIMES_BOLD_SCALE
        }
    }
}

/// Widths for the non-ASCII glyphs WinAnsi adds, plus the fallback.
struct Extras {
    bullet: u16,
    en_dash: u16,
    single_quote: u16,
    double_quote: u16,
    average: u16,
}

impl Extras {
    const REGULAR: Self = Self {
        bullet: 350,
        en_dash: 556,
        single_quote: 222,
        double_quote: 333,
        average: 556,
    };
    const BOLD: Self = Self {
        bullet: 350,
        en_dash: 556,
        single_quote: 278,
        double_quote: 500,
        average: 611,
    };
    const TIMES: Self = Self {
        bullet: 350,
        en_dash: 500,
        single_quote: 333,
        double_quote: 444,
        average: 500,
    };
}

fn lookup(table: &[u16; 95], c: char, extras: Extras) -> f32 {
    let code = c as u32;
    let w = if (FIRST..FIRST + 95).contains(&code) {
        table[(code - FIRST) as usize]
    } else {
        match c {
            '•' => extras.bullet,
            '–' => extras.en_dash,
            '—' | '…' | '‰' => 1000,
            '‘' | '’' | '‚' => extras.single_quote,
            '“' | '”' | '„' => extras.double_quote,
            '\u{A0}' => table[0],
            _ => extras.average,
        }
    };
    f32::from(w)
}

/// Width of `text` set in `font` at `size` points.
pub fn text_width(font: Font, size: f32, text: &str) -> f32 {
    text.chars().map(|c| char_width(font, c)).sum::<f32>() * size / 1000.0
}

/// Width of one ASCII space at `size` points.
pub fn space_width(font: Font, size: f32) -> f32 {
    char_width(font, ' ') * size / 1000.0
}

/// WinAnsiEncoding code for `c`, if the encoding has it.
pub fn winansi(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => {
            let mapped = match c {
                '€' => 0x80,
                '‚' => 0x82,
                'ƒ' => 0x83,
                '„' => 0x84,
                '…' => 0x85,
                '†' => 0x86,
                '‡' => 0x87,
                'ˆ' => 0x88,
                '‰' => 0x89,
                'Š' => 0x8A,
                '‹' => 0x8B,
                'Œ' => 0x8C,
                'Ž' => 0x8E,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                '˜' => 0x98,
                '™' => 0x99,
                'š' => 0x9A,
                '›' => 0x9B,
                'œ' => 0x9C,
                'ž' => 0x9E,
                'Ÿ' => 0x9F,
                _ => return None,
            };
            Some(mapped)
        }
    }
}

/// Encode a string for a WinAnsi Type1 font; unmapped characters become `?`.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| winansi(c).unwrap_or(REPLACEMENT as u8))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_known_widths() {
        assert_eq!(char_width(Font::Helvetica, ' '), 278.0);
        assert_eq!(char_width(Font::Helvetica, 'W'), 944.0);
        assert_eq!(char_width(Font::Helvetica, 'i'), 222.0);
        assert_eq!(char_width(Font::HelveticaBold, 'm'), 889.0);
        assert_eq!(char_width(Font::TimesRoman, 'a'), 444.0);
        assert_eq!(char_width(Font::Helvetica, '~'), 584.0);
    }

    #[test]
    fn oblique_matches_upright() {
        for c in ['a', 'Q', '7', '•'] {
            assert_eq!(
                char_width(Font::Helvetica, c),
                char_width(Font::HelveticaOblique, c)
            );
        }
    }

    #[test]
    fn courier_is_monospaced() {
        assert_eq!(text_width(Font::Courier, 10.0, "iiii"), 24.0);
        assert_eq!(text_width(Font::CourierBold, 10.0, "WWWW"), 24.0);
    }

    #[test]
    fn times_bold_is_never_narrower() {
        let s = "The quick brown fox";
        assert!(text_width(Font::TimesBold, 12.0, s) > text_width(Font::TimesRoman, 12.0, s));
    }

    #[test]
    fn text_width_scales_with_size() {
        let w10 = text_width(Font::Helvetica, 10.0, "abc");
        let w20 = text_width(Font::Helvetica, 20.0, "abc");
        assert!((w20 - 2.0 * w10).abs() < 1e-4);
        assert_eq!(text_width(Font::Helvetica, 10.0, ""), 0.0);
    }

    #[test]
    fn unmapped_chars_measure_as_replacement() {
        assert_eq!(
            char_width(Font::Helvetica, '漢'),
            char_width(Font::Helvetica, '?')
        );
    }

    #[test]
    fn winansi_mapping() {
        assert_eq!(winansi('A'), Some(b'A'));
        assert_eq!(winansi('é'), Some(0xE9));
        assert_eq!(winansi('•'), Some(0x95));
        assert_eq!(winansi('…'), Some(0x85));
        assert_eq!(winansi('“'), Some(0x93));
        assert_eq!(winansi('—'), Some(0x97));
        assert_eq!(winansi('\u{1F600}'), None);
        assert_eq!(encode_winansi("a—b😀"), vec![b'a', 0x97, b'b', b'?']);
    }
}

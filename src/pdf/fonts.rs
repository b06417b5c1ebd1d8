/// The two standard PDF fonts an invoice uses. Neither is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    pub const ALL: [Font; 2] = [Font::Regular, Font::Bold];

    /// Resource name used in content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    /// PDF BaseFont name.
    pub fn base_name(&self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    /// Width of `text` in points at `size`, measured on the bytes
    /// [`encode_win_ansi`] produces for it.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|byte| self.byte_width(byte) as u32)
            .sum();
        units as f32 * size / 1000.0
    }

    /// Glyph advance of a WinAnsi code in 1/1000 em.
    fn byte_width(&self, byte: u8) -> u16 {
        let (ascii, latin1, punct) = match self {
            Font::Regular => (&HELVETICA_WIDTHS, &HELVETICA_LATIN1_WIDTHS, HELVETICA_PUNCT_WIDTHS),
            Font::Bold => (
                &HELVETICA_BOLD_WIDTHS,
                &HELVETICA_BOLD_LATIN1_WIDTHS,
                HELVETICA_BOLD_PUNCT_WIDTHS,
            ),
        };
        match byte {
            32..=126 => ascii[(byte - 32) as usize],
            0xA0..=0xFF => latin1[(byte - 0xA0) as usize],
            0x80 => punct[0],
            0x91..=0x97 => punct[(byte - 0x90) as usize],
            _ => DEFAULT_WIDTH,
        }
    }
}

/// Width for codes the encoder never emits.
const DEFAULT_WIDTH: u16 = 556;

/// Euro sign, then 0x91..=0x97: quotes, bullet, en and em dash.
const HELVETICA_PUNCT_WIDTHS: [u16; 8] = [556, 222, 222, 333, 333, 350, 556, 1000];
const HELVETICA_BOLD_PUNCT_WIDTHS: [u16; 8] = [556, 278, 278, 500, 500, 350, 556, 1000];

/// Helvetica advances for ASCII 32..=126 (Adobe AFM).
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advances for ASCII 32..=126 (Adobe AFM).
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Helvetica advances for Latin-1 0xA0..=0xFF (Adobe AFM).
#[rustfmt::skip]
const HELVETICA_LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Helvetica-Bold advances for Latin-1 0xA0..=0xFF (Adobe AFM).
#[rustfmt::skip]
const HELVETICA_BOLD_LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

/// Encode text for a WinAnsiEncoding simple font.
///
/// Latin-1 passes through, the typographic characters WinAnsi places in
/// 0x80..=0x9F are mapped, the rupee sign becomes "Rs." and anything else
/// becomes '?'.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let code = ch as u32;
        match ch {
            '\u{20B9}' => out.extend_from_slice(b"Rs."),
            '\u{20AC}' => out.push(0x80),
            '\u{2018}' => out.push(0x91),
            '\u{2019}' => out.push(0x92),
            '\u{201C}' => out.push(0x93),
            '\u{201D}' => out.push(0x94),
            '\u{2022}' => out.push(0x95),
            '\u{2013}' => out.push(0x96),
            '\u{2014}' => out.push(0x97),
            _ if code < 0x20 => out.push(b' '),
            _ if code < 0x80 || (0xA0..=0xFF).contains(&code) => out.push(code as u8),
            _ => out.push(b'?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_known_strings() {
        // "INVOICE": I=278 N=722 V=667 O=778 I=278 C=722 E=667 → 4112
        let w = Font::Regular.text_width("INVOICE", 10.0);
        assert!((w - 41.12).abs() < 1e-3);
        assert!(Font::Bold.text_width("Grand Total", 10.0) > Font::Regular.text_width("Grand Total", 10.0));
    }

    #[test]
    fn latin1_letters_use_their_own_advance() {
        assert_eq!(Font::Regular.text_width("é", 1000.0), Font::Regular.text_width("e", 1000.0));
        assert_eq!(Font::Regular.text_width("í", 1000.0), 278.0);
        assert_eq!(Font::Bold.text_width("Ü", 1000.0), 722.0);
        assert_eq!(Font::Regular.text_width("\u{a0}", 1000.0), Font::Regular.text_width(" ", 1000.0));
    }

    #[test]
    fn substituted_characters_measure_as_drawn() {
        assert_eq!(Font::Regular.text_width("₹", 10.0), Font::Regular.text_width("Rs.", 10.0));
        assert_eq!(Font::Bold.text_width("पुणे", 10.0), Font::Bold.text_width("????", 10.0));
        assert_eq!(Font::Regular.text_width("–", 1000.0), 556.0);
    }

    #[test]
    fn empty_text_has_zero_width() {
        assert_eq!(Font::Bold.text_width("", 12.0), 0.0);
    }

    #[test]
    fn win_ansi_mapping() {
        assert_eq!(encode_win_ansi("Baner, Pune"), b"Baner, Pune".to_vec());
        assert_eq!(encode_win_ansi("₹100"), b"Rs.100".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("a–b"), vec![b'a', 0x96, b'b']);
        assert_eq!(encode_win_ansi("पुणे"), b"????".to_vec());
        assert_eq!(encode_win_ansi("a\tb"), b"a b".to_vec());
    }
}

//! Static font-metric tables for the three preview type families.
//!
//! Character widths are in em units (relative to font size). This is an
//! approximation of real glyph shapes, but it is exact for what matters
//! here: the same table measures a string off-screen and sizes it on the
//! page, so a shrink ratio computed from it is consistent with what gets drawn.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font description
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Humanist sans-serif. Body text for Modern, Minimal and Creative.
    Sans,
    /// Old-style serif. Creative's quote block.
    Serif,
    /// Fixed pitch. Dates, contact lines and Cyber's terminal text.
    Mono,
}

impl FontFamily {
    /// CSS font stack written into the SVG.
    pub fn css_stack(self) -> &'static str {
        match self {
            FontFamily::Sans => "Inter, 'Helvetica Neue', Arial, sans-serif",
            FontFamily::Serif => "'EB Garamond', Georgia, 'Times New Roman', serif",
            FontFamily::Mono => "'JetBrains Mono', 'DejaVu Sans Mono', monospace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    Regular,
    Medium,
    Bold,
    Black,
}

impl FontWeight {
    pub fn css_value(self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Bold => 700,
            FontWeight::Black => 900,
        }
    }

    /// Heavier strokes widen the advance. Factors are relative to Regular.
    fn width_factor(self) -> f32 {
        match self {
            FontWeight::Regular => 1.0,
            FontWeight::Medium => 1.03,
            FontWeight::Bold => 1.07,
            FontWeight::Black => 1.11,
        }
    }
}

/// The exact typography a piece of text is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: FontFamily,
    /// Font size in logical pixels.
    pub size: f32,
    pub weight: FontWeight,
}

impl FontSpec {
    pub const fn new(family: FontFamily, size: f32, weight: FontWeight) -> Self {
        Self { family, size, weight }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub family: FontFamily,
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (Thai, accented Latin, symbols).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Width of `s` in em units. Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_em(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else if is_zero_width(c) {
                    0.0
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }
}

/// Thai vowel and tone marks stack above or below the base consonant.
fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{0E31}' | '\u{0E34}'..='\u{0E3A}' | '\u{0E47}'..='\u{0E4E}' | '\u{200B}')
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static SANS_TABLE: FontMetricTable = FontMetricTable {
    family: FontFamily::Sans,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
        // [     \     ]     ^     _     `
        0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.59,
    ],
    average_char_width: 0.55,
    space_width: 0.25,
};

/// Roughly 85% of the sans widths.
static SERIF_TABLE: FontMetricTable = FontMetricTable {
    family: FontFamily::Serif,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.21, 0.26, 0.32, 0.48, 0.48, 0.76, 0.57, 0.19, 0.28, 0.28, 0.33, 0.50, 0.24, 0.28, 0.24, 0.26,
        // 0     1     2     3     4     5     6     7     8     9
        0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48,
        // :     ;     <     =     >     ?     @
        0.24, 0.24, 0.50, 0.50, 0.50, 0.43, 0.87,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.57, 0.52, 0.52, 0.57, 0.48, 0.43, 0.57, 0.57, 0.21, 0.33, 0.52, 0.45, 0.66,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.57, 0.61, 0.48, 0.61, 0.52, 0.43, 0.48, 0.57, 0.57, 0.76, 0.52, 0.52, 0.48,
        // [     \     ]     ^     _     `
        0.24, 0.26, 0.24, 0.40, 0.48, 0.29,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.48, 0.48, 0.43, 0.48, 0.48, 0.26, 0.48, 0.48, 0.19, 0.19, 0.45, 0.19, 0.71,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.48, 0.48, 0.48, 0.48, 0.28, 0.37, 0.33, 0.48, 0.43, 0.61, 0.43, 0.43, 0.37,
        // {     |     }     ~
        0.28, 0.22, 0.28, 0.50,
    ],
    average_char_width: 0.47,
    space_width: 0.21,
};

static MONO_TABLE: FontMetricTable = FontMetricTable {
    family: FontFamily::Mono,
    widths: [0.60; 95],
    average_char_width: 0.60,
    space_width: 0.60,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(family: FontFamily) -> &'static FontMetricTable {
    match family {
        FontFamily::Sans => &SANS_TABLE,
        FontFamily::Serif => &SERIF_TABLE,
        FontFamily::Mono => &MONO_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Measurement
// ────────────────────────────────────────────────────────────────────────────

/// Off-screen text measurement. Returns the natural single-line width in
/// logical pixels, without participating in layout.
pub trait TextMeasurer: Send + Sync {
    fn measure(&self, text: &str, font: &FontSpec) -> f32;
}

/// Measures with the static tables above.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMetrics;

impl TextMeasurer for StaticMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        get_metrics(font.family).measure_em(text) * font.size * font.weight.width_factor()
    }
}

/// Greedy word wrap at `max_width` pixels.
///
/// Explicit newlines always break; blank lines are kept so paragraph spacing
/// survives. A single word wider than the line gets a line of its own.
pub fn wrap_lines(
    measurer: &dyn TextMeasurer,
    text: &str,
    font: &FontSpec,
    max_width: f32,
) -> Vec<String> {
    let space_w = measurer.measure(" ", font);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_w = measurer.measure(word, font);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space_w + word_w > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }
        lines.push(current);
    }

    // Trailing newlines do not add height.
    while lines.len() > 1 && lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: FontSpec = FontSpec::new(FontFamily::Sans, 16.0, FontWeight::Regular);

    #[test]
    fn test_measure_empty_returns_zero() {
        assert_eq!(StaticMetrics.measure("", &BODY), 0.0);
    }

    #[test]
    fn test_measure_scales_with_size() {
        // "Rust" = R(0.61) + u(0.56) + s(0.44) + t(0.39) = 2.00em
        let w = StaticMetrics.measure("Rust", &BODY);
        assert!((w - 32.0).abs() < 1e-3, "Rust at 16px should be ~32px, got {w}");
        let big = FontSpec { size: 32.0, ..BODY };
        let w2 = StaticMetrics.measure("Rust", &big);
        assert!((w2 - 2.0 * w).abs() < 1e-3, "doubling the size doubles the width");
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let bold = FontSpec { weight: FontWeight::Bold, ..BODY };
        assert!(StaticMetrics.measure("Portfolio", &bold) > StaticMetrics.measure("Portfolio", &BODY));
    }

    #[test]
    fn test_non_ascii_falls_back_and_thai_marks_are_zero_width() {
        let table = get_metrics(FontFamily::Sans);
        assert!((table.measure_em("é") - table.average_char_width).abs() < 1e-4);
        // ก + ิ (above vowel) occupies one advance
        assert!((table.measure_em("กิ") - table.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_mono_is_fixed_pitch() {
        let mono = FontSpec::new(FontFamily::Mono, 10.0, FontWeight::Regular);
        assert_eq!(StaticMetrics.measure("iiii", &mono), StaticMetrics.measure("WWWW", &mono));
    }

    #[test]
    fn test_wrap_single_word_is_one_line() {
        let lines = wrap_lines(&StaticMetrics, "Rust", &BODY, 200.0);
        assert_eq!(lines, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_wrap_breaks_long_text_and_keeps_word_order() {
        let text = "Developed and maintained RESTful APIs using Node.js and Express";
        let lines = wrap_lines(&StaticMetrics, text, &BODY, 160.0);
        assert!(lines.len() >= 3, "expected several lines, got {lines:?}");
        for line in &lines {
            let w = StaticMetrics.measure(line, &BODY);
            assert!(w <= 160.0 || !line.contains(' '), "line overflows: {line} ({w}px)");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_honours_explicit_newlines() {
        let lines = wrap_lines(&StaticMetrics, "one\n\ntwo\n", &BODY, 500.0);
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn test_wrap_empty_text_is_single_empty_line() {
        assert_eq!(wrap_lines(&StaticMetrics, "", &BODY, 100.0), vec![String::new()]);
    }
}

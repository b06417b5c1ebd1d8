use super::fonts::Font;

/// RGB color with components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    /// Header text.
    pub const WHITESMOKE: Color = Color::rgb(0.96, 0.96, 0.96);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Outline of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// One drawing instruction, in PDF user space (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// Text whose baseline starts at `(x, y)`.
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Color,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    /// The logo image scaled into the given box.
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// A single page as an ordered display list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub marks: Vec<Mark>,
}

impl Page {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            marks: Vec::new(),
        }
    }

    /// Black text.
    pub fn text(&mut self, x: f32, y: f32, font: Font, size: f32, text: impl Into<String>) {
        self.text_colored(x, y, font, size, Color::BLACK, text);
    }

    pub fn text_colored(
        &mut self,
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Color,
        text: impl Into<String>,
    ) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.marks.push(Mark::Text {
            x,
            y,
            font,
            size,
            color,
            text,
        });
    }

    pub fn rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    ) {
        self.marks.push(Mark::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        });
    }

    pub fn image(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.marks.push(Mark::Image {
            x,
            y,
            width,
            height,
        });
    }

    /// All text marks in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Baseline of the first text mark equal to `needle`.
    pub fn find_text(&self, needle: &str) -> Option<(f32, f32)> {
        self.marks.iter().find_map(|m| match m {
            Mark::Text { x, y, text, .. } if text == needle => Some((*x, *y)),
            _ => None,
        })
    }

    pub fn has_image(&self) -> bool {
        self.marks.iter().any(|m| matches!(m, Mark::Image { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        let navy = Color::from_hex("#0a0a6c").unwrap();
        assert!((navy.r - 10.0 / 255.0).abs() < 1e-6);
        assert!((navy.b - 108.0 / 255.0).abs() < 1e-6);
        assert!(Color::from_hex("#0a0a6").is_none());
        assert!(Color::from_hex("zzzzzz").is_none());
    }

    #[test]
    fn empty_text_is_not_drawn() {
        let mut page = Page::new(100.0, 100.0);
        page.text(0.0, 0.0, Font::Regular, 10.0, "");
        page.text(0.0, 0.0, Font::Regular, 10.0, "x");
        assert_eq!(page.texts().collect::<Vec<_>>(), vec!["x"]);
    }
}

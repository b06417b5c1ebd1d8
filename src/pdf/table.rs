//! Fixed-grid table drawing.
//!
//! Rows have fixed heights so a table's height is known from its row count
//! alone. Text is centered horizontally in every cell.

use super::canvas::{Color, Page, Stroke};
use super::fonts::Font;

/// Styling of one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStyle {
    pub font: Font,
    pub font_size: f32,
    pub height: f32,
    /// Distance from the row's bottom edge to the text baseline.
    pub baseline_offset: f32,
    pub background: Option<Color>,
    pub text_color: Color,
}

impl RowStyle {
    /// Navy header band with light bold text and extra bottom padding.
    pub fn header() -> Self {
        Self {
            font: Font::Bold,
            font_size: 10.0,
            height: HEADER_ROW_HEIGHT,
            baseline_offset: 12.0,
            background: Color::from_hex("#0a0a6c"),
            text_color: Color::WHITESMOKE,
        }
    }

    pub fn body() -> Self {
        Self {
            font: Font::Regular,
            font_size: 10.0,
            height: BODY_ROW_HEIGHT,
            baseline_offset: 6.5,
            background: None,
            text_color: Color::BLACK,
        }
    }

    /// Body row in bold, for totals.
    pub fn emphasis() -> Self {
        Self {
            font: Font::Bold,
            ..Self::body()
        }
    }
}

/// Height of the header row.
pub const HEADER_ROW_HEIGHT: f32 = 28.0;
/// Height of every other row.
pub const BODY_ROW_HEIGHT: f32 = 20.0;

/// A table ready to be placed.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<f32>,
    rows: Vec<(Vec<String>, RowStyle)>,
    grid: Stroke,
}

impl Table {
    /// Create an empty table with the given column widths.
    pub fn new(columns: Vec<f32>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            grid: Stroke {
                color: Color::BLACK,
                width: 1.0,
            },
        }
    }

    /// Append a row. Missing cells are blank, extra cells are dropped.
    pub fn push_row<S: AsRef<str>>(&mut self, cells: &[S], style: RowStyle) {
        let mut cells: Vec<String> = cells.iter().map(|c| c.as_ref().to_string()).collect();
        cells.resize(self.columns.len(), String::new());
        self.rows.push((cells, style));
    }

    pub fn width(&self) -> f32 {
        self.columns.iter().sum()
    }

    pub fn height(&self) -> f32 {
        self.rows.iter().map(|(_, style)| style.height).sum()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Draw with the bottom-left corner at `(x, bottom)`. Returns the top edge.
    pub fn draw(&self, page: &mut Page, x: f32, bottom: f32) -> f32 {
        let top = bottom + self.height();
        let mut row_top = top;

        for (cells, style) in &self.rows {
            let row_bottom = row_top - style.height;

            if let Some(fill) = style.background {
                page.rect(x, row_bottom, self.width(), style.height, Some(fill), None);
            }

            let mut cell_x = x;
            for (text, width) in cells.iter().zip(&self.columns) {
                let text_width = style.font.text_width(text, style.font_size);
                let text_x = cell_x + (width - text_width) / 2.0;
                page.text_colored(
                    text_x,
                    row_bottom + style.baseline_offset,
                    style.font,
                    style.font_size,
                    style.text_color,
                    text.as_str(),
                );
                page.rect(
                    cell_x,
                    row_bottom,
                    *width,
                    style.height,
                    None,
                    Some(self.grid),
                );
                cell_x += width;
            }

            row_top = row_bottom;
        }

        top
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::canvas::Mark;

    fn table() -> Table {
        let mut t = Table::new(vec![200.0, 80.0, 100.0, 100.0]);
        t.push_row(&["Item", "Quantity", "Unit Price", "Total Amount"], RowStyle::header());
        t.push_row(&["Desk", "1", "1000.00", "1000.00"], RowStyle::body());
        t.push_row(&["Grand Total", "", "", "1000.00"], RowStyle::emphasis());
        t
    }

    #[test]
    fn height_is_sum_of_row_heights() {
        let t = table();
        assert_eq!(t.width(), 480.0);
        assert_eq!(t.height(), HEADER_ROW_HEIGHT + 2.0 * BODY_ROW_HEIGHT);
        assert_eq!(t.row_count(), 3);
    }

    #[test]
    fn draws_rows_top_down_from_bottom_anchor() {
        let t = table();
        let mut page = Page::new(595.0, 842.0);
        let top = t.draw(&mut page, 50.0, 100.0);
        assert_eq!(top, 168.0);

        let (_, header_y) = page.find_text("Item").unwrap();
        let (_, body_y) = page.find_text("Desk").unwrap();
        let (_, total_y) = page.find_text("Grand Total").unwrap();
        assert!(header_y > body_y && body_y > total_y);
        assert_eq!(total_y, 100.0 + 6.5);
    }

    #[test]
    fn text_is_centered() {
        let t = table();
        let mut page = Page::new(595.0, 842.0);
        t.draw(&mut page, 50.0, 100.0);
        let (x, _) = page.find_text("Desk").unwrap();
        let w = Font::Regular.text_width("Desk", 10.0);
        assert!((x + w / 2.0 - 150.0).abs() < 1e-3);
    }

    #[test]
    fn one_grid_cell_per_column_per_row() {
        let t = table();
        let mut page = Page::new(595.0, 842.0);
        t.draw(&mut page, 50.0, 100.0);
        let outlined = page
            .marks
            .iter()
            .filter(|m| matches!(m, Mark::Rect { stroke: Some(_), .. }))
            .count();
        assert_eq!(outlined, 12);
        let filled = page
            .marks
            .iter()
            .filter(|m| matches!(m, Mark::Rect { fill: Some(_), .. }))
            .count();
        assert_eq!(filled, 1);
    }

    #[test]
    fn short_rows_are_padded() {
        let mut t = Table::new(vec![10.0, 10.0]);
        t.push_row(&["only"], RowStyle::body());
        let mut page = Page::new(100.0, 100.0);
        t.draw(&mut page, 0.0, 0.0);
        assert_eq!(page.texts().count(), 1);
    }
}

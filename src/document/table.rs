//! Tables, rows and cells.

use super::{Image, Paragraph};
use crate::common::{ElementId, RGBColor};
use serde::Serialize;

/// A table with its cells placed in a row-major grid.
///
/// Rows are created up front from the declared row count. A cell's address
/// is derived from its position in the record stream, so `rows[r].cells[c]`
/// has `row_addr == r` and `col_addr == c`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub id: ElementId,
    pub row_count: u16,
    pub col_count: u16,
    /// Outer width and height in HWPUNIT
    pub width: u32,
    pub height: u32,
    pub cell_spacing: u16,
    /// Inner padding (left, right, top, bottom) in HWPUNIT
    pub padding: [u16; 4],
    pub rows: Vec<TableRow>,
}

impl Table {
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &TableCell> {
        self.rows.iter().flat_map(|row| row.cells.iter())
    }

    /// Find the cell anchored at the given grid address.
    pub fn cell_at(&self, row: u16, col: u16) -> Option<&TableCell> {
        self.cells()
            .find(|c| c.row_addr == row && c.col_addr == col)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// One cell and the content nested in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub id: ElementId,
    pub row_addr: u16,
    pub col_addr: u16,
    /// Address as stored in the cell's list header
    pub declared_row: u16,
    pub declared_col: u16,
    pub row_span: u16,
    pub col_span: u16,
    /// Width and height in HWPUNIT
    pub width: u32,
    pub height: u32,
    /// Inner margins (left, right, top, bottom) in HWPUNIT
    pub margins: [u16; 4],
    pub paragraphs: Vec<Paragraph>,
    pub tables: Vec<Table>,
    pub images: Vec<Image>,
    pub background_color: Option<RGBColor>,
    pub borders: CellBorders,
}

impl TableCell {
    /// Cell text with paragraphs joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One edge of a cell border.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BorderLine {
    /// Line style name, e.g. `solid` or `double`
    pub style: &'static str,
    pub width_mm: f32,
    pub color: Option<RGBColor>,
}

impl BorderLine {
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.style != "none"
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CellBorders {
    pub left: Option<BorderLine>,
    pub right: Option<BorderLine>,
    pub top: Option<BorderLine>,
    pub bottom: Option<BorderLine>,
}

//! Open-control frames of the section parser.
//!
//! Each control that owns nested content pushes one frame recording the
//! record level it opened at. A frame is closed once a record at that level
//! or shallower arrives.

use crate::common::binary::{BinaryResult, read_u16_le, read_u32_le};
use crate::common::{ElementId, IdGenerator};
use crate::document::{
    HeaderFooter, Image, PageScope, Paragraph, Placement, SectionElement, Table, TableCell,
    TableRow,
};
use crate::hwp::docinfo::DocInfo;
use smallvec::SmallVec;

#[derive(Debug)]
pub(super) enum Frame {
    Table(TableFrame),
    DrawingObject(DrawingFrame),
    HeaderFooter(HeaderFooterFrame),
}

impl Frame {
    pub fn level(&self) -> u16 {
        match self {
            Frame::Table(t) => t.level,
            Frame::DrawingObject(d) => d.level,
            Frame::HeaderFooter(h) => h.level,
        }
    }

    /// Accept a finished element produced inside this frame.
    pub fn push_element(&mut self, element: SectionElement) {
        match self {
            Frame::Table(t) => t.push_element(element),
            Frame::DrawingObject(d) => d.elements.push(element),
            Frame::HeaderFooter(h) => h.elements.push(element),
        }
    }
}

/// Cell attributes from a LIST_HEADER record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) struct CellHeader {
    pub col_addr: u16,
    pub row_addr: u16,
    pub col_span: u16,
    pub row_span: u16,
    pub width: u32,
    pub height: u32,
    pub margins: [u16; 4],
    pub border_fill_id: u16,
}

impl CellHeader {
    pub fn parse(data: &[u8]) -> BinaryResult<Self> {
        let mut margins = [0u16; 4];
        for (i, m) in margins.iter_mut().enumerate() {
            *m = read_u16_le(data, 24 + i * 2).unwrap_or(0);
        }
        Ok(Self {
            col_addr: read_u16_le(data, 8)?,
            row_addr: read_u16_le(data, 10)?,
            col_span: read_u16_le(data, 12)?.max(1),
            row_span: read_u16_le(data, 14)?.max(1),
            width: read_u32_le(data, 16).unwrap_or(0),
            height: read_u32_le(data, 20).unwrap_or(0),
            margins,
            border_fill_id: read_u16_le(data, 32).unwrap_or(0),
        })
    }
}

/// The cell currently collecting content.
#[derive(Debug)]
struct OpenCell {
    index: usize,
    id: ElementId,
    header: CellHeader,
    paragraphs: Vec<Paragraph>,
    tables: Vec<Table>,
    images: Vec<Image>,
}

#[derive(Debug)]
pub(super) struct TableFrame {
    pub level: u16,
    id: ElementId,
    width: u32,
    height: u32,
    rows: u16,
    cols: u16,
    cell_spacing: u16,
    padding: [u16; 4],
    grid: Vec<TableRow>,
    next_index: usize,
    cell: Option<OpenCell>,
}

impl TableFrame {
    /// Frame for a `tbl ` control; width and height come from the
    /// common-object block.
    pub fn open(level: u16, ctrl: &[u8], ids: &mut IdGenerator) -> Self {
        Self {
            level,
            id: ids.next_id(),
            width: read_u32_le(ctrl, 16).unwrap_or(0),
            height: read_u32_le(ctrl, 20).unwrap_or(0),
            rows: 0,
            cols: 0,
            cell_spacing: 0,
            padding: [0; 4],
            grid: Vec::new(),
            next_index: 0,
            cell: None,
        }
    }

    /// Apply the TABLE record.
    pub fn set_dimensions(&mut self, data: &[u8]) -> BinaryResult<()> {
        self.rows = read_u16_le(data, 4)?;
        self.cols = read_u16_le(data, 6)?;
        self.cell_spacing = read_u16_le(data, 8).unwrap_or(0);
        for (i, p) in self.padding.iter_mut().enumerate() {
            *p = read_u16_le(data, 10 + i * 2).unwrap_or(0);
        }
        self.grid = (0..self.rows).map(|_| TableRow::default()).collect();
        Ok(())
    }

    /// Start the next cell, closing the current one.
    pub fn begin_cell(&mut self, header: CellHeader, doc_info: &DocInfo, ids: &mut IdGenerator) {
        self.finish_cell(doc_info);
        self.cell = Some(OpenCell {
            index: self.next_index,
            id: ids.next_id(),
            header,
            paragraphs: Vec::new(),
            tables: Vec::new(),
            images: Vec::new(),
        });
        self.next_index += 1;
    }

    fn push_element(&mut self, element: SectionElement) {
        let Some(cell) = self.cell.as_mut() else {
            log::warn!("content before the first cell of table {}; dropped", self.id);
            return;
        };
        match element {
            SectionElement::Paragraph(p) => cell.paragraphs.push(*p),
            SectionElement::Table(t) => cell.tables.push(*t),
            SectionElement::Image(i) => cell.images.push(*i),
        }
    }

    /// Place the open cell in the grid at `index / cols`.
    ///
    /// The cell's address is derived from the same index; the address stored
    /// in the LIST_HEADER is only kept as `declared_row`/`declared_col`.
    fn finish_cell(&mut self, doc_info: &DocInfo) {
        let Some(cell) = self.cell.take() else {
            return;
        };
        let cols = self.cols.max(1) as usize;
        let row = cell.index / cols;
        let col = cell.index % cols;
        if row >= self.grid.len() {
            log::warn!(
                "table {} declares {} rows but cell {} falls in row {}",
                self.id,
                self.rows,
                cell.index,
                row
            );
            self.grid.resize_with(row + 1, TableRow::default);
        }

        let header = cell.header;
        if (header.row_addr as usize, header.col_addr as usize) != (row, col) {
            log::debug!(
                "cell {} of table {} declares ({}, {}); placed at ({}, {})",
                cell.index,
                self.id,
                header.row_addr,
                header.col_addr,
                row,
                col
            );
        }
        let (background_color, borders) = doc_info.cell_format(header.border_fill_id);
        self.grid[row].cells.push(TableCell {
            id: cell.id,
            row_addr: u16::try_from(row).unwrap_or(u16::MAX),
            col_addr: u16::try_from(col).unwrap_or(u16::MAX),
            declared_row: header.row_addr,
            declared_col: header.col_addr,
            row_span: header.row_span,
            col_span: header.col_span,
            width: header.width,
            height: header.height,
            margins: header.margins,
            paragraphs: cell.paragraphs,
            tables: cell.tables,
            images: cell.images,
            background_color,
            borders,
        });
    }

    pub fn finish(mut self, doc_info: &DocInfo) -> Table {
        self.finish_cell(doc_info);
        Table {
            id: self.id,
            row_count: self.rows,
            col_count: self.cols,
            width: self.width,
            height: self.height,
            cell_spacing: self.cell_spacing,
            padding: self.padding,
            rows: self.grid,
        }
    }
}

#[derive(Debug)]
pub(super) struct DrawingFrame {
    pub level: u16,
    pub placement: Placement,
    /// Bin-data references of every picture in the object, in stream order
    pub bin_ids: SmallVec<[u16; 1]>,
    pub elements: Vec<SectionElement>,
}

impl DrawingFrame {
    pub fn open(level: u16, ctrl: &[u8]) -> Self {
        let int = |offset| read_u32_le(ctrl, offset).unwrap_or(0);
        Self {
            level,
            placement: Placement {
                vertical_offset: int(8) as i32,
                horizontal_offset: int(12) as i32,
                width: int(16),
                height: int(20),
            },
            bin_ids: SmallVec::new(),
            elements: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub(super) struct HeaderFooterFrame {
    pub level: u16,
    pub is_footer: bool,
    pub scope: PageScope,
    pub elements: Vec<SectionElement>,
}

impl HeaderFooterFrame {
    pub fn open(level: u16, ctrl: &[u8], is_footer: bool) -> Self {
        Self {
            level,
            is_footer,
            scope: PageScope::from_bits(read_u32_le(ctrl, 4).unwrap_or(0)),
            elements: Vec::new(),
        }
    }

    pub fn finish(self) -> HeaderFooter {
        HeaderFooter {
            scope: self.scope,
            elements: self.elements,
        }
    }
}

/// The paragraph under construction.
#[derive(Debug)]
pub(super) struct PendingParagraph {
    pub id: ElementId,
    /// Number of open frames when the paragraph started; it belongs to
    /// `frames[depth - 1]`, or to the section when zero
    pub depth: usize,
    pub para_shape_id: u16,
    pub style_id: u8,
    pub break_type: u8,
    pub units: Vec<u16>,
    pub breakpoints: SmallVec<[(u32, u32); 4]>,
}

impl PendingParagraph {
    pub fn open(header: &[u8], depth: usize, ids: &mut IdGenerator) -> Self {
        Self {
            id: ids.next_id(),
            depth,
            para_shape_id: read_u16_le(header, 8).unwrap_or(0),
            style_id: header.get(10).copied().unwrap_or(0),
            break_type: header.get(11).copied().unwrap_or(0),
            units: Vec::new(),
            breakpoints: SmallVec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_header_offsets() {
        let mut data = vec![0u8; 34];
        data[8..10].copy_from_slice(&2u16.to_le_bytes());
        data[10..12].copy_from_slice(&1u16.to_le_bytes());
        data[12..14].copy_from_slice(&3u16.to_le_bytes());
        data[16..20].copy_from_slice(&7200u32.to_le_bytes());
        data[24..26].copy_from_slice(&141u16.to_le_bytes());
        data[32..34].copy_from_slice(&4u16.to_le_bytes());
        let header = CellHeader::parse(&data).unwrap();
        assert_eq!((header.row_addr, header.col_addr), (1, 2));
        assert_eq!((header.col_span, header.row_span), (3, 1));
        assert_eq!(header.width, 7200);
        assert_eq!(header.margins[0], 141);
        assert_eq!(header.border_fill_id, 4);
    }

    #[test]
    fn cells_fill_rows_by_index() {
        let mut ids = IdGenerator::new();
        let info = DocInfo::default();
        let mut frame = TableFrame::open(1, &[0u8; 24], &mut ids);
        let mut dims = vec![0u8; 18];
        dims[4..6].copy_from_slice(&2u16.to_le_bytes());
        dims[6..8].copy_from_slice(&2u16.to_le_bytes());
        frame.set_dimensions(&dims).unwrap();
        for _ in 0..5 {
            frame.begin_cell(CellHeader::default(), &info, &mut ids);
        }
        let table = frame.finish(&info);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].cells.len(), 2);
        assert_eq!(table.rows[2].cells.len(), 1);
        assert_eq!(
            (table.rows[2].cells[0].row_addr, table.rows[2].cells[0].col_addr),
            (2, 0)
        );
    }

    #[test]
    fn cell_address_follows_stream_position() {
        let mut ids = IdGenerator::new();
        let info = DocInfo::default();
        let mut frame = TableFrame::open(1, &[0u8; 24], &mut ids);
        let mut dims = vec![0u8; 18];
        dims[4..6].copy_from_slice(&2u16.to_le_bytes());
        dims[6..8].copy_from_slice(&2u16.to_le_bytes());
        frame.set_dimensions(&dims).unwrap();
        // Every header claims (0, 0)
        for _ in 0..4 {
            let header = CellHeader::parse(&[0u8; 34]).unwrap();
            frame.begin_cell(header, &info, &mut ids);
        }
        let table = frame.finish(&info);
        for (i, row) in table.rows.iter().enumerate() {
            for (j, cell) in row.cells.iter().enumerate() {
                assert_eq!((cell.row_addr as usize, cell.col_addr as usize), (i, j));
                assert_eq!((cell.declared_row, cell.declared_col), (0, 0));
            }
        }
        assert!(table.cell_at(1, 1).is_some_and(|c| c.id == table.rows[1].cells[1].id));
        assert!(table.cell_at(2, 0).is_none());
    }
}

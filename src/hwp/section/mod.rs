//! Section stream parser.
//!
//! A `BodyText/Section{n}` stream is a flat, level-tagged record sequence.
//! Nesting is recovered with a stack of [`Frame`]s: a control that owns
//! content (table, drawing object, header/footer) pushes a frame, and any
//! record at the frame's level or shallower closes it.

mod context;
mod page;
mod text;

pub use page::parse_page_def;
pub use text::{DecodedText, decode_units, slice_runs};

#[cfg(test)]
pub(crate) use page::page_def_record;

use self::context::{CellHeader, DrawingFrame, Frame, HeaderFooterFrame, PendingParagraph, TableFrame};
use super::bin_data::{asset_key, resolve_bin_id};
use super::consts::{PICTURE_BIN_ID_OFFSET, ctrl_id, tag};
use super::docinfo::DocInfo;
use super::record::{Record, RecordReader};
use crate::common::IdGenerator;
use crate::common::binary::{read_u16_le, read_u32_le};
use crate::document::{Image, Paragraph, Section, SectionElement};

/// Incremental parser for one section stream.
pub struct SectionParser<'a> {
    doc_info: &'a DocInfo,
    ids: &'a mut IdGenerator,
    section: Section,
    frames: Vec<Frame>,
    paragraph: Option<PendingParagraph>,
    last_level: u16,
}

impl<'a> SectionParser<'a> {
    pub fn new(index: usize, doc_info: &'a DocInfo, ids: &'a mut IdGenerator) -> Self {
        Self {
            doc_info,
            ids,
            section: Section::new(index),
            frames: Vec::new(),
            paragraph: None,
            last_level: 0,
        }
    }

    /// Interpret one record.
    pub fn feed(&mut self, record: Record<'_>) {
        // Children sit exactly one level below their parent
        if record.level > self.last_level + 1 {
            log::warn!(
                "record 0x{:03X} jumps from level {} to {}; nesting may be misread",
                record.tag_id,
                self.last_level,
                record.level
            );
        }
        self.last_level = record.level;
        self.close_frames(record.level);

        let payload = record.payload;
        match record.tag_id {
            tag::PARA_HEADER => {
                self.finish_paragraph();
                self.paragraph = Some(PendingParagraph::open(
                    payload,
                    self.frames.len(),
                    self.ids,
                ));
            },
            tag::PARA_TEXT => {
                if let Some(p) = self.paragraph.as_mut() {
                    p.units.extend(
                        payload
                            .chunks_exact(2)
                            .map(|c| u16::from_le_bytes([c[0], c[1]])),
                    );
                }
            },
            tag::PARA_CHAR_SHAPE => {
                if let Some(p) = self.paragraph.as_mut() {
                    p.breakpoints.extend(payload.chunks_exact(8).map(|c| {
                        (
                            u32::from_le_bytes([c[0], c[1], c[2], c[3]]),
                            u32::from_le_bytes([c[4], c[5], c[6], c[7]]),
                        )
                    }));
                }
            },
            tag::CTRL_HEADER => self.open_control(record),
            tag::TABLE => {
                if let Some(Frame::Table(table)) = self.frames.last_mut()
                    && table.level + 1 == record.level
                    && let Err(e) = table.set_dimensions(payload)
                {
                    log::warn!("malformed TABLE record: {}", e);
                }
            },
            tag::LIST_HEADER => {
                let is_cell = matches!(
                    self.frames.last(),
                    Some(Frame::Table(t)) if t.level + 1 == record.level
                );
                if is_cell {
                    self.finish_paragraph();
                    let header = CellHeader::parse(payload).unwrap_or_else(|e| {
                        log::warn!("malformed cell header: {}", e);
                        CellHeader::default()
                    });
                    if let Some(Frame::Table(table)) = self.frames.last_mut() {
                        table.begin_cell(header, self.doc_info, self.ids);
                    }
                }
            },
            tag::SHAPE_COMPONENT_PICTURE => {
                let drawing = self.frames.iter_mut().rev().find_map(|f| match f {
                    Frame::DrawingObject(d) => Some(d),
                    _ => None,
                });
                if let Some(drawing) = drawing {
                    match read_u16_le(payload, PICTURE_BIN_ID_OFFSET) {
                        Ok(bin_id) => drawing.bin_ids.push(bin_id),
                        Err(e) => log::warn!("malformed picture record: {}", e),
                    }
                }
            },
            tag::PAGE_DEF => match parse_page_def(payload) {
                Ok(page) if self.section.page.is_none() => self.section.page = Some(page),
                Ok(_) => {},
                Err(e) => log::warn!("malformed PAGE_DEF record: {}", e),
            },
            _ => {},
        }
    }

    fn open_control(&mut self, record: Record<'_>) {
        let Ok(id) = read_u32_le(record.payload, 0) else {
            return;
        };
        let frame = match id {
            ctrl_id::TABLE => Frame::Table(TableFrame::open(record.level, record.payload, self.ids)),
            ctrl_id::GSO => Frame::DrawingObject(DrawingFrame::open(record.level, record.payload)),
            ctrl_id::HEADER | ctrl_id::FOOTER => Frame::HeaderFooter(HeaderFooterFrame::open(
                record.level,
                record.payload,
                id == ctrl_id::FOOTER,
            )),
            ctrl_id::FOOTNOTE | ctrl_id::ENDNOTE => {
                log::debug!("note control at level {}; content kept inline", record.level);
                return;
            },
            ctrl_id::EQUATION | ctrl_id::COLUMN_DEF => {
                log::debug!("control 0x{:08X} not decoded", id);
                return;
            },
            _ => return,
        };
        // Controls follow their owner's text records, so the owner is complete
        self.finish_paragraph();
        self.frames.push(frame);
    }

    /// Close every frame opened at `level` or deeper, innermost first.
    fn close_frames(&mut self, level: u16) {
        while self.frames.last().is_some_and(|f| f.level() >= level) {
            self.close_innermost();
        }
    }

    fn close_innermost(&mut self) {
        let depth = self.frames.len();
        if self.paragraph.as_ref().is_some_and(|p| p.depth >= depth) {
            self.finish_paragraph();
        }
        let Some(frame) = self.frames.pop() else {
            return;
        };
        let parent = self.frames.len();

        match frame {
            Frame::Table(table) => {
                let table = table.finish(self.doc_info);
                self.route(parent, table.into());
            },
            Frame::DrawingObject(drawing) => {
                for &bin_id in &drawing.bin_ids {
                    let stream_id = resolve_bin_id(self.doc_info, bin_id);
                    let image = Image {
                        id: self.ids.next_id(),
                        asset_id: asset_key(stream_id),
                        bin_id,
                        placement: drawing.placement,
                    };
                    self.route(parent, image.into());
                }
                for element in drawing.elements {
                    self.route(parent, element);
                }
            },
            Frame::HeaderFooter(hf) => {
                if hf.is_footer {
                    self.section.footers.push(hf.finish());
                } else {
                    self.section.headers.push(hf.finish());
                }
            },
        }
    }

    /// Hand an element to the container `depth` frames deep.
    fn route(&mut self, depth: usize, element: SectionElement) {
        match depth.checked_sub(1).and_then(|i| self.frames.get_mut(i)) {
            Some(frame) => frame.push_element(element),
            None => self.section.elements.push(element),
        }
    }

    fn finish_paragraph(&mut self) {
        let Some(pending) = self.paragraph.take() else {
            return;
        };
        let doc_info = self.doc_info;
        let decoded = decode_units(&pending.units);
        let runs = slice_runs(&decoded, &pending.breakpoints, |id| {
            let style = doc_info.run_style(id);
            if style.is_none() {
                log::debug!("char shape {} not defined; run left unstyled", id);
            }
            style
        });
        let paragraph = Paragraph {
            id: pending.id,
            text: decoded.text,
            runs,
            style: doc_info.paragraph_style(pending.para_shape_id),
            style_id: pending.style_id,
            break_type: pending.break_type,
        };
        let depth = pending.depth.min(self.frames.len());
        self.route(depth, paragraph.into());
    }

    /// Flush the pending paragraph and every open frame.
    pub fn finish(mut self) -> Section {
        self.finish_paragraph();
        while !self.frames.is_empty() {
            self.close_innermost();
        }
        self.section
    }
}

/// Parse one decompressed section stream.
///
/// A truncated stream yields whatever was decoded before the damage.
pub fn parse_section(
    data: &[u8],
    index: usize,
    doc_info: &DocInfo,
    ids: &mut IdGenerator,
) -> Section {
    let mut parser = SectionParser::new(index, doc_info, ids);
    let mut reader = RecordReader::new(data);
    for record in reader.by_ref() {
        parser.feed(record);
    }
    if reader.truncated() {
        log::warn!(
            "section {} truncated at byte {} of {}",
            index,
            reader.offset(),
            data.len()
        );
    }
    let section = parser.finish();
    log::debug!(
        "section {}: {} elements, {} headers, {} footers",
        index,
        section.elements.len(),
        section.headers.len(),
        section.footers.len()
    );
    section
}

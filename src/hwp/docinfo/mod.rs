//! Document-info stream: the global style tables.
//!
//! Records are appended to their table in stream order, so a record's index
//! is the id other records use to refer to it. Border/fill ids are the
//! exception: sections store them 1-based.

mod bin_data;
mod border_fill;
mod char_shape;
mod face_name;
mod para_shape;

pub use bin_data::{BinCompression, BinDataItem, BinDataKind};
pub use border_fill::{BorderEdge, BorderFill, Fill, GradientFill, ImageFill, SolidFill};
pub use char_shape::{CharShape, CharShapeFlags, LANG_SLOTS, UnderlineKind};
pub use face_name::FaceName;
pub use para_shape::{ParaShape, ParaShapeFlags};

#[cfg(test)]
pub(crate) use border_fill::border_fill_record;
#[cfg(test)]
pub(crate) use char_shape::char_shape_record;
#[cfg(test)]
pub(crate) use para_shape::para_shape_record;
#[cfg(test)]
pub(crate) use bin_data::embedding_record;

use super::consts::tag;
use super::record::RecordReader;
use crate::common::RGBColor;
use crate::common::binary::{BinaryResult, read_i32_le, read_u16_le, read_u32_le};
use crate::document::{
    CellBorders, ParagraphStyle, RunStyle, Underline, VerticalPosition,
};

/// Starting numbers and caret position from DOCUMENT_PROPERTIES.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentProperties {
    pub section_count: u16,
    pub page_start: u16,
    pub footnote_start: u16,
    pub endnote_start: u16,
    pub picture_start: u16,
    pub table_start: u16,
    pub equation_start: u16,
    pub caret_list_id: u32,
    pub caret_paragraph_id: u32,
    pub caret_char_pos: u32,
}

impl DocumentProperties {
    pub fn parse(data: &[u8]) -> BinaryResult<Self> {
        Ok(Self {
            section_count: read_u16_le(data, 0)?,
            page_start: read_u16_le(data, 2)?,
            footnote_start: read_u16_le(data, 4)?,
            endnote_start: read_u16_le(data, 6)?,
            picture_start: read_u16_le(data, 8)?,
            table_start: read_u16_le(data, 10)?,
            equation_start: read_u16_le(data, 12)?,
            caret_list_id: read_u32_le(data, 14).unwrap_or(0),
            caret_paragraph_id: read_u32_le(data, 18).unwrap_or(0),
            caret_char_pos: read_u32_le(data, 22).unwrap_or(0),
        })
    }
}

/// Index of the Hangul font count in ID_MAPPINGS; the other six language
/// slots follow it.
const ID_MAPPING_FONTS: usize = 1;

/// The parsed document-info stream.
#[derive(Debug, Clone, Default)]
pub struct DocInfo {
    pub properties: Option<DocumentProperties>,
    /// Record counts per table from ID_MAPPINGS
    pub id_mappings: Vec<i32>,
    pub bin_data: Vec<BinDataItem>,
    pub faces: Vec<FaceName>,
    pub border_fills: Vec<BorderFill>,
    pub char_shapes: Vec<CharShape>,
    pub para_shapes: Vec<ParaShape>,
    /// Whether the record stream ended on an incomplete record
    pub truncated: bool,
}

/// Decode a record, keeping the table index aligned on failure.
fn decode_or_default<T: Default>(
    what: &str,
    index: usize,
    result: BinaryResult<T>,
) -> T {
    result.unwrap_or_else(|e| {
        log::warn!("{} #{} is malformed ({}); using defaults", what, index, e);
        T::default()
    })
}

impl DocInfo {
    /// Decode a decompressed document-info stream. Unknown tags are skipped.
    pub fn parse(data: &[u8]) -> Self {
        let mut info = DocInfo::default();
        let mut reader = RecordReader::new(data);

        for record in reader.by_ref() {
            let payload = record.payload;
            match record.tag_id {
                tag::DOCUMENT_PROPERTIES => {
                    info.properties = DocumentProperties::parse(payload).ok();
                },
                tag::ID_MAPPINGS => {
                    info.id_mappings = (0..payload.len() / 4)
                        .filter_map(|i| read_i32_le(payload, i * 4).ok())
                        .collect();
                },
                tag::BIN_DATA => {
                    let item = decode_or_default(
                        "bin data",
                        info.bin_data.len(),
                        BinDataItem::parse(payload),
                    );
                    info.bin_data.push(item);
                },
                tag::FACE_NAME => {
                    let face = decode_or_default("face name", info.faces.len(), FaceName::parse(payload));
                    info.faces.push(face);
                },
                tag::BORDER_FILL => {
                    let bf = decode_or_default(
                        "border fill",
                        info.border_fills.len(),
                        BorderFill::parse(payload),
                    );
                    info.border_fills.push(bf);
                },
                tag::CHAR_SHAPE => {
                    let shape = decode_or_default(
                        "char shape",
                        info.char_shapes.len(),
                        CharShape::parse(payload),
                    );
                    info.char_shapes.push(shape);
                },
                tag::PARA_SHAPE => {
                    let shape = decode_or_default(
                        "para shape",
                        info.para_shapes.len(),
                        ParaShape::parse(payload),
                    );
                    info.para_shapes.push(shape);
                },
                _ => {},
            }
        }

        info.truncated = reader.truncated();
        log::debug!(
            "docinfo: {} faces, {} border fills, {} char shapes, {} para shapes, {} bin items",
            info.faces.len(),
            info.border_fills.len(),
            info.char_shapes.len(),
            info.para_shapes.len(),
            info.bin_data.len()
        );
        info
    }

    /// Resolve a face id of the given language slot.
    ///
    /// Face records are stored slot after slot; when ID_MAPPINGS gives the
    /// per-slot counts the id is offset into the right slot, otherwise it is
    /// taken as a global index.
    pub fn face(&self, slot: usize, id: u16) -> Option<&FaceName> {
        let counts = self
            .id_mappings
            .get(ID_MAPPING_FONTS..ID_MAPPING_FONTS + LANG_SLOTS);
        let index = match counts {
            Some(counts) => {
                let count = (*counts.get(slot)?).max(0) as usize;
                if id as usize >= count {
                    return None;
                }
                let base: usize = counts[..slot].iter().map(|&c| c.max(0) as usize).sum();
                base + id as usize
            },
            None => id as usize,
        };
        self.faces.get(index)
    }

    /// Border/fill by the 1-based id used in section records.
    pub fn border_fill(&self, id: u16) -> Option<&BorderFill> {
        id.checked_sub(1)
            .and_then(|i| self.border_fills.get(i as usize))
    }

    /// Character style for a char shape index, `None` when undefined.
    pub fn run_style(&self, shape_id: u32) -> Option<RunStyle> {
        let shape = self.char_shapes.get(shape_id as usize)?;
        let flags = shape.flags;
        let underline = match shape.underline() {
            UnderlineKind::None => None,
            UnderlineKind::Below => Some(Underline::Below),
            UnderlineKind::Above => Some(Underline::Above),
        };
        let vertical_position = if flags.contains(CharShapeFlags::SUPERSCRIPT) {
            VerticalPosition::Superscript
        } else if flags.contains(CharShapeFlags::SUBSCRIPT) {
            VerticalPosition::Subscript
        } else {
            VerticalPosition::Baseline
        };

        Some(RunStyle {
            shape_id,
            font_name: self.face(0, shape.face_ids[0]).map(|f| f.name.clone()),
            size_pt: shape.size_pt(),
            bold: flags.contains(CharShapeFlags::BOLD),
            italic: flags.contains(CharShapeFlags::ITALIC),
            underline,
            strikeout: shape.has_strikeout(),
            outline: shape.has_outline(),
            shadow: shape.has_shadow(),
            emboss: flags.contains(CharShapeFlags::EMBOSS),
            engrave: flags.contains(CharShapeFlags::ENGRAVE),
            vertical_position,
            color: RGBColor::from_colorref(shape.text_color),
            underline_color: underline.and_then(|_| RGBColor::from_colorref(shape.underline_color)),
            shade_color: RGBColor::from_colorref(shape.shade_color),
            spacing: shape.spacings[0],
            ratio: shape.ratios[0],
        })
    }

    /// Paragraph style for a para shape index; defaults when undefined.
    pub fn paragraph_style(&self, shape_id: u16) -> ParagraphStyle {
        match self.para_shapes.get(shape_id as usize) {
            Some(shape) => shape.to_style(),
            None => {
                log::debug!("para shape {} not defined; using defaults", shape_id);
                ParagraphStyle::default()
            },
        }
    }

    /// Cell background and borders for a 1-based border/fill id.
    pub fn cell_format(&self, border_fill_id: u16) -> (Option<RGBColor>, CellBorders) {
        let Some(bf) = self.border_fill(border_fill_id) else {
            return (None, CellBorders::default());
        };
        let [left, right, top, bottom] = bf.edges.map(|e| Some(e.to_line()));
        (
            bf.background_color(),
            CellBorders {
                left,
                right,
                top,
                bottom,
            },
        )
    }
}

use crate::common::binary::{BinaryResult, read_i16_le, read_i32_le, read_u16_le, read_u32_le};
use crate::document::{Alignment, LineSpacing, ParagraphStyle};
use crate::hwp::consts::para_prop;
use bitflags::bitflags;

bitflags! {
    /// Single-bit attributes of paragraph-shape property word 1.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ParaShapeFlags: u32 {
        const WIDOW_ORPHAN = para_prop::WIDOW_ORPHAN;
        const KEEP_WITH_NEXT = para_prop::KEEP_WITH_NEXT;
        const KEEP_LINES = para_prop::KEEP_LINES;
        const PAGE_BREAK_BEFORE = para_prop::PAGE_BREAK_BEFORE;

        const _ = !0;
    }
}

/// A PARA_SHAPE record. Lengths are HWPUNIT.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParaShape {
    pub flags: ParaShapeFlags,
    pub margin_left: i32,
    pub margin_right: i32,
    pub indent: i32,
    pub space_before: i32,
    pub space_after: i32,
    /// Line spacing of pre-5.0.2.5 writers, always a percentage
    pub legacy_line_spacing: i32,
    pub tab_def_id: u16,
    pub numbering_id: u16,
    pub border_fill_id: u16,
    pub border_offsets: [i16; 4],
    pub property2: Option<u32>,
    pub property3: Option<u32>,
    pub line_spacing: Option<u32>,
}

impl ParaShape {
    pub fn parse(data: &[u8]) -> BinaryResult<Self> {
        let mut border_offsets = [0i16; 4];
        for (i, v) in border_offsets.iter_mut().enumerate() {
            *v = read_i16_le(data, 34 + i * 2).unwrap_or(0);
        }

        Ok(Self {
            flags: ParaShapeFlags::from_bits_retain(read_u32_le(data, 0)?),
            margin_left: read_i32_le(data, 4)?,
            margin_right: read_i32_le(data, 8)?,
            indent: read_i32_le(data, 12)?,
            space_before: read_i32_le(data, 16)?,
            space_after: read_i32_le(data, 20)?,
            legacy_line_spacing: read_i32_le(data, 24)?,
            tab_def_id: read_u16_le(data, 28).unwrap_or(0),
            numbering_id: read_u16_le(data, 30).unwrap_or(0),
            border_fill_id: read_u16_le(data, 32).unwrap_or(0),
            border_offsets,
            property2: read_u32_le(data, 42).ok(),
            property3: read_u32_le(data, 46).ok(),
            line_spacing: read_u32_le(data, 50).ok(),
        })
    }

    pub fn alignment(&self) -> Alignment {
        Alignment::from_bits(self.flags.bits() & para_prop::ALIGN_MASK)
    }

    /// Line spacing rule, preferring the typed value of newer writers.
    pub fn line_spacing(&self) -> LineSpacing {
        let (Some(prop3), Some(value)) = (self.property3, self.line_spacing) else {
            return LineSpacing::Percent(self.legacy_line_spacing);
        };
        let value = value as i32;
        match prop3 & para_prop::LINE_SPACING_KIND_MASK {
            1 => LineSpacing::Fixed(value),
            2 => LineSpacing::BetweenLines(value),
            3 => LineSpacing::AtLeast(value),
            _ => LineSpacing::Percent(value),
        }
    }

    pub fn to_style(&self) -> ParagraphStyle {
        ParagraphStyle {
            alignment: self.alignment(),
            margin_left: self.margin_left,
            margin_right: self.margin_right,
            indent: self.indent,
            space_before: self.space_before,
            space_after: self.space_after,
            line_spacing: self.line_spacing(),
            keep_with_next: self.flags.contains(ParaShapeFlags::KEEP_WITH_NEXT),
            keep_lines: self.flags.contains(ParaShapeFlags::KEEP_LINES),
            page_break_before: self.flags.contains(ParaShapeFlags::PAGE_BREAK_BEFORE),
            widow_orphan: self.flags.contains(ParaShapeFlags::WIDOW_ORPHAN),
        }
    }
}

#[cfg(test)]
pub(crate) fn para_shape_record(prop1: u32, margin_left: i32, spacing: Option<(u32, u32)>) -> Vec<u8> {
    let mut data = vec![0u8; 54];
    data[0..4].copy_from_slice(&prop1.to_le_bytes());
    data[4..8].copy_from_slice(&margin_left.to_le_bytes());
    data[24..28].copy_from_slice(&160i32.to_le_bytes());
    match spacing {
        Some((kind, value)) => {
            data[46..50].copy_from_slice(&kind.to_le_bytes());
            data[50..54].copy_from_slice(&value.to_le_bytes());
        },
        None => data.truncate(42),
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_and_flags() {
        let shape = ParaShape::parse(&para_shape_record(
            3 | para_prop::KEEP_WITH_NEXT | para_prop::PAGE_BREAK_BEFORE,
            2000,
            None,
        ))
        .unwrap();
        let style = shape.to_style();
        assert_eq!(style.alignment, Alignment::Center);
        assert_eq!(style.margin_left, 2000);
        assert!(style.keep_with_next);
        assert!(style.page_break_before);
        assert!(!style.keep_lines);
        assert_eq!(style.line_spacing, LineSpacing::Percent(160));
    }

    #[test]
    fn typed_line_spacing() {
        let shape = ParaShape::parse(&para_shape_record(1, 0, Some((1, 1800)))).unwrap();
        assert_eq!(shape.alignment(), Alignment::Left);
        assert_eq!(shape.line_spacing(), LineSpacing::Fixed(1800));

        let shape = ParaShape::parse(&para_shape_record(0, 0, Some((3, 900)))).unwrap();
        assert_eq!(shape.line_spacing(), LineSpacing::AtLeast(900));
    }

    #[test]
    fn unknown_alignment_falls_back_to_justify() {
        let shape = ParaShape::parse(&para_shape_record(7, 0, None)).unwrap();
        assert_eq!(shape.alignment(), Alignment::Justify);
    }
}

use crate::common::binary::{BinaryResult, read_i32_le, read_i8, read_u8, read_u16_le, read_u32_le};
use crate::hwp::consts::char_prop;
use bitflags::bitflags;

/// Language slots of per-script arrays: Hangul, Latin, Hanja, Japanese,
/// other, symbol, user.
pub const LANG_SLOTS: usize = 7;

bitflags! {
    /// Single-bit attributes of the character-shape property word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CharShapeFlags: u32 {
        const ITALIC = char_prop::ITALIC;
        const BOLD = char_prop::BOLD;
        const EMBOSS = char_prop::EMBOSS;
        const ENGRAVE = char_prop::ENGRAVE;
        const SUPERSCRIPT = char_prop::SUPERSCRIPT;
        const SUBSCRIPT = char_prop::SUBSCRIPT;
        const USE_FONT_SPACE = char_prop::USE_FONT_SPACE;
        const KERNING = char_prop::KERNING;

        const _ = !0;
    }
}

/// Underline position field (bits 2-3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnderlineKind {
    None,
    Below,
    Above,
}

/// A CHAR_SHAPE record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharShape {
    /// Face ids per language slot
    pub face_ids: [u16; LANG_SLOTS],
    pub ratios: [u8; LANG_SLOTS],
    pub spacings: [i8; LANG_SLOTS],
    pub relative_sizes: [u8; LANG_SLOTS],
    pub offsets: [i8; LANG_SLOTS],
    /// Base size in 1/100 pt
    pub base_size: i32,
    pub flags: CharShapeFlags,
    pub shadow_gap: (i8, i8),
    pub text_color: u32,
    pub underline_color: u32,
    pub shade_color: u32,
    pub shadow_color: u32,
    /// 1-based border/fill id (5.0.2.1 and later)
    pub border_fill_id: Option<u16>,
    /// Strikeout color (5.0.3.0 and later)
    pub strikeout_color: Option<u32>,
}

impl Default for CharShape {
    fn default() -> Self {
        Self {
            face_ids: [0; LANG_SLOTS],
            ratios: [100; LANG_SLOTS],
            spacings: [0; LANG_SLOTS],
            relative_sizes: [100; LANG_SLOTS],
            offsets: [0; LANG_SLOTS],
            base_size: 1000,
            flags: CharShapeFlags::empty(),
            shadow_gap: (0, 0),
            text_color: 0,
            underline_color: 0,
            shade_color: crate::common::style::COLORREF_NONE,
            shadow_color: 0,
            border_fill_id: None,
            strikeout_color: None,
        }
    }
}

fn u8_slots(data: &[u8], offset: usize) -> BinaryResult<[u8; LANG_SLOTS]> {
    let mut out = [0u8; LANG_SLOTS];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = read_u8(data, offset + i)?;
    }
    Ok(out)
}

fn i8_slots(data: &[u8], offset: usize) -> BinaryResult<[i8; LANG_SLOTS]> {
    let mut out = [0i8; LANG_SLOTS];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = read_i8(data, offset + i)?;
    }
    Ok(out)
}

impl CharShape {
    pub fn parse(data: &[u8]) -> BinaryResult<Self> {
        let mut face_ids = [0u16; LANG_SLOTS];
        for (i, id) in face_ids.iter_mut().enumerate() {
            *id = read_u16_le(data, i * 2)?;
        }

        Ok(Self {
            face_ids,
            ratios: u8_slots(data, 14)?,
            spacings: i8_slots(data, 21)?,
            relative_sizes: u8_slots(data, 28)?,
            offsets: i8_slots(data, 35)?,
            base_size: read_i32_le(data, 42)?,
            flags: CharShapeFlags::from_bits_retain(read_u32_le(data, 46)?),
            shadow_gap: (read_i8(data, 50)?, read_i8(data, 51)?),
            text_color: read_u32_le(data, 52)?,
            underline_color: read_u32_le(data, 56)?,
            shade_color: read_u32_le(data, 60)?,
            shadow_color: read_u32_le(data, 64)?,
            border_fill_id: read_u16_le(data, 68).ok(),
            strikeout_color: read_u32_le(data, 70).ok(),
        })
    }

    #[inline]
    fn field(&self, shift: u32, mask: u32) -> u32 {
        (self.flags.bits() >> shift) & mask
    }

    pub fn underline(&self) -> UnderlineKind {
        match self.field(char_prop::UNDERLINE_SHIFT, char_prop::UNDERLINE_MASK) {
            0 => UnderlineKind::None,
            3 => UnderlineKind::Above,
            _ => UnderlineKind::Below,
        }
    }

    pub fn has_strikeout(&self) -> bool {
        self.field(char_prop::STRIKEOUT_SHIFT, char_prop::STRIKEOUT_MASK) != 0
    }

    pub fn has_outline(&self) -> bool {
        self.field(char_prop::OUTLINE_SHIFT, char_prop::OUTLINE_MASK) != 0
    }

    pub fn has_shadow(&self) -> bool {
        self.field(char_prop::SHADOW_SHIFT, char_prop::SHADOW_MASK) != 0
    }

    /// Point size.
    #[inline]
    pub fn size_pt(&self) -> f32 {
        crate::common::unit::hwpunit_to_pt(self.base_size)
    }
}

#[cfg(test)]
pub(crate) fn char_shape_record(size: i32, props: u32, color: u32) -> Vec<u8> {
    let mut data = vec![0u8; 74];
    for i in 0..LANG_SLOTS {
        data[14 + i] = 100;
        data[28 + i] = 100;
    }
    data[42..46].copy_from_slice(&size.to_le_bytes());
    data[46..50].copy_from_slice(&props.to_le_bytes());
    data[52..56].copy_from_slice(&color.to_le_bytes());
    data[60..64].copy_from_slice(&crate::common::style::COLORREF_NONE.to_le_bytes());
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_size_color_and_flags() {
        let props = char_prop::BOLD | char_prop::ITALIC | (1 << char_prop::UNDERLINE_SHIFT);
        let mut data = char_shape_record(1200, props, 0x0000_00FF);
        data[0..2].copy_from_slice(&3u16.to_le_bytes());
        let shape = CharShape::parse(&data).unwrap();
        assert_eq!(shape.face_ids[0], 3);
        assert_eq!(shape.size_pt(), 12.0);
        assert!(shape.flags.contains(CharShapeFlags::BOLD | CharShapeFlags::ITALIC));
        assert_eq!(shape.underline(), UnderlineKind::Below);
        assert!(!shape.has_strikeout());
        assert_eq!(shape.text_color, 0xFF);
        assert_eq!(shape.border_fill_id, Some(0));
        assert_eq!(shape.strikeout_color, Some(0));
    }

    #[test]
    fn multi_bit_fields() {
        let props = (3 << char_prop::UNDERLINE_SHIFT)
            | (1 << char_prop::STRIKEOUT_SHIFT)
            | (3 << char_prop::OUTLINE_SHIFT)
            | char_prop::SUPERSCRIPT;
        let shape = CharShape::parse(&char_shape_record(1000, props, 0)).unwrap();
        assert_eq!(shape.underline(), UnderlineKind::Above);
        assert!(shape.has_strikeout());
        assert!(shape.has_outline());
        assert!(!shape.has_shadow());
        assert!(shape.flags.contains(CharShapeFlags::SUPERSCRIPT));
    }

    #[test]
    fn older_records_lack_trailing_fields() {
        let data = char_shape_record(1000, 0, 0);
        let shape = CharShape::parse(&data[..68]).unwrap();
        assert_eq!(shape.border_fill_id, None);
        assert_eq!(shape.strikeout_color, None);
        assert!(CharShape::parse(&data[..50]).is_err());
    }
}

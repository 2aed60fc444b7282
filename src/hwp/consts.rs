//! Constants for the HWP 5.0 record format.
//!
//! Tag ids, control ids and property-word bit layouts live here as named
//! tables so the format contract can be audited apart from the decoders.

/// Signature at the start of the `FileHeader` stream (NUL padded to 32 bytes)
pub const SIGNATURE: &[u8] = b"HWP Document File";

/// Length of the signature field
pub const SIGNATURE_LEN: usize = 32;

/// Record tag ids.
pub mod tag {
    pub const BEGIN: u16 = 0x010;

    // DocInfo
    pub const DOCUMENT_PROPERTIES: u16 = BEGIN;
    pub const ID_MAPPINGS: u16 = BEGIN + 1;
    pub const BIN_DATA: u16 = BEGIN + 2;
    pub const FACE_NAME: u16 = BEGIN + 3;
    pub const BORDER_FILL: u16 = BEGIN + 4;
    pub const CHAR_SHAPE: u16 = BEGIN + 5;
    pub const PARA_SHAPE: u16 = BEGIN + 9;

    // BodyText
    pub const PARA_HEADER: u16 = BEGIN + 50;
    pub const PARA_TEXT: u16 = BEGIN + 51;
    pub const PARA_CHAR_SHAPE: u16 = BEGIN + 52;
    pub const CTRL_HEADER: u16 = BEGIN + 55;
    pub const LIST_HEADER: u16 = BEGIN + 56;
    pub const PAGE_DEF: u16 = BEGIN + 57;
    pub const SHAPE_COMPONENT: u16 = BEGIN + 60;
    pub const TABLE: u16 = BEGIN + 61;
    pub const SHAPE_COMPONENT_PICTURE: u16 = BEGIN + 69;
    pub const SHAPE_COMPONENT_CONTAINER: u16 = BEGIN + 70;
}

/// Build a control id the way HWP stores it: the first character in the
/// most significant byte of a little-endian u32.
pub const fn make_ctrl_id(id: &[u8; 4]) -> u32 {
    ((id[0] as u32) << 24) | ((id[1] as u32) << 16) | ((id[2] as u32) << 8) | id[3] as u32
}

/// Control ids found at the start of CTRL_HEADER payloads.
pub mod ctrl_id {
    use super::make_ctrl_id;

    pub const TABLE: u32 = make_ctrl_id(b"tbl ");
    pub const GSO: u32 = make_ctrl_id(b"gso ");
    pub const EQUATION: u32 = make_ctrl_id(b"eqed");
    pub const SECTION_DEF: u32 = make_ctrl_id(b"secd");
    pub const COLUMN_DEF: u32 = make_ctrl_id(b"cold");
    pub const HEADER: u32 = make_ctrl_id(b"head");
    pub const FOOTER: u32 = make_ctrl_id(b"foot");
    pub const FOOTNOTE: u32 = make_ctrl_id(b"fn  ");
    pub const ENDNOTE: u32 = make_ctrl_id(b"en  ");
}

/// FileHeader property bits.
pub mod file_flags {
    pub const COMPRESSED: u32 = 1 << 0;
    pub const ENCRYPTED: u32 = 1 << 1;
    pub const DISTRIBUTION: u32 = 1 << 2;
    pub const SCRIPT: u32 = 1 << 3;
    pub const DRM: u32 = 1 << 4;
    pub const XML_TEMPLATE: u32 = 1 << 5;
    pub const HISTORY: u32 = 1 << 6;
    pub const SIGNED: u32 = 1 << 7;
    pub const CERT_ENCRYPTED: u32 = 1 << 8;
    pub const CCL: u32 = 1 << 11;
}

/// Character-shape property word.
pub mod char_prop {
    pub const ITALIC: u32 = 1 << 0;
    pub const BOLD: u32 = 1 << 1;
    pub const UNDERLINE_SHIFT: u32 = 2;
    pub const UNDERLINE_MASK: u32 = 0b11;
    pub const OUTLINE_SHIFT: u32 = 8;
    pub const OUTLINE_MASK: u32 = 0b111;
    pub const SHADOW_SHIFT: u32 = 11;
    pub const SHADOW_MASK: u32 = 0b11;
    pub const EMBOSS: u32 = 1 << 13;
    pub const ENGRAVE: u32 = 1 << 14;
    pub const SUPERSCRIPT: u32 = 1 << 15;
    pub const SUBSCRIPT: u32 = 1 << 16;
    pub const STRIKEOUT_SHIFT: u32 = 18;
    pub const STRIKEOUT_MASK: u32 = 0b111;
    pub const USE_FONT_SPACE: u32 = 1 << 25;
    pub const KERNING: u32 = 1 << 30;
}

/// Paragraph-shape property word 1.
pub mod para_prop {
    pub const ALIGN_MASK: u32 = 0b111;
    pub const WIDOW_ORPHAN: u32 = 1 << 16;
    pub const KEEP_WITH_NEXT: u32 = 1 << 17;
    pub const KEEP_LINES: u32 = 1 << 18;
    pub const PAGE_BREAK_BEFORE: u32 = 1 << 19;
    /// Property 3 low bits: line spacing kind
    pub const LINE_SPACING_KIND_MASK: u32 = 0b1_1111;
}

/// Fill-type bits of a border/fill record.
pub mod fill_type {
    pub const SOLID: u32 = 1 << 0;
    pub const IMAGE: u32 = 1 << 1;
    pub const GRADIENT: u32 = 1 << 2;
}

/// Border line width index → millimetres.
pub const BORDER_WIDTH_MM: [f32; 16] = [
    0.1, 0.12, 0.15, 0.2, 0.25, 0.3, 0.4, 0.5, 0.6, 0.7, 1.0, 1.5, 2.0, 3.0, 4.0, 5.0,
];

/// Border line type index → style name.
pub const BORDER_STYLE: [&str; 17] = [
    "none",
    "solid",
    "dash",
    "dot",
    "dash-dot",
    "dash-dot-dot",
    "long-dash",
    "circle",
    "double",
    "thin-thick",
    "thick-thin",
    "thin-thick-thin",
    "wave",
    "double-wave",
    "thick-3d",
    "thick-3d-reverse",
    "3d",
];

/// Control code units in PARA_TEXT.
pub mod ctrl_char {
    pub const TAB: u16 = 0x09;
    pub const LINE_BREAK: u16 = 0x0A;
    pub const PARA_BREAK: u16 = 0x0D;
    pub const HYPHEN: u16 = 0x18;
    pub const NBSPACE: u16 = 0x1E;
    pub const FIXED_WIDTH_SPACE: u16 = 0x1F;

    /// Code units occupied by an inline or extended control, including the
    /// control code itself.
    pub const EXTENDED_WIDTH: usize = 8;

    /// Whether `unit` starts an 8-unit inline/extended control.
    pub const fn is_wide(unit: u16) -> bool {
        matches!(unit, 1..=9 | 11 | 12 | 14..=23)
    }
}

/// Offset of the bin-data id inside a SHAPE_COMPONENT_PICTURE payload.
pub const PICTURE_BIN_ID_OFFSET: usize = 71;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_ids_match_little_endian_payload_bytes() {
        // "tbl " is stored reversed on disk
        assert_eq!(u32::from_le_bytes(*b" lbt"), ctrl_id::TABLE);
        assert_eq!(u32::from_le_bytes(*b" osg"), ctrl_id::GSO);
        assert_eq!(u32::from_le_bytes(*b"daeh"), ctrl_id::HEADER);
    }

    #[test]
    fn wide_controls() {
        assert!(ctrl_char::is_wide(ctrl_char::TAB));
        assert!(ctrl_char::is_wide(11));
        assert!(!ctrl_char::is_wide(ctrl_char::LINE_BREAK));
        assert!(!ctrl_char::is_wide(ctrl_char::PARA_BREAK));
        assert!(!ctrl_char::is_wide(ctrl_char::NBSPACE));
    }

    #[test]
    fn tag_values() {
        assert_eq!(tag::FACE_NAME, 0x13);
        assert_eq!(tag::PARA_SHAPE, 0x19);
        assert_eq!(tag::PARA_HEADER, 0x42);
        assert_eq!(tag::TABLE, 0x4D);
        assert_eq!(tag::SHAPE_COMPONENT_PICTURE, 0x55);
    }
}

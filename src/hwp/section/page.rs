use crate::common::binary::{BinaryResult, read_u32_le};
use crate::document::PageDef;

const LANDSCAPE: u32 = 1 << 0;

/// Decode a PAGE_DEF record.
pub fn parse_page_def(data: &[u8]) -> BinaryResult<PageDef> {
    let property = read_u32_le(data, 36).unwrap_or(0);
    Ok(PageDef {
        width: read_u32_le(data, 0)?,
        height: read_u32_le(data, 4)?,
        margin_left: read_u32_le(data, 8)?,
        margin_right: read_u32_le(data, 12)?,
        margin_top: read_u32_le(data, 16)?,
        margin_bottom: read_u32_le(data, 20)?,
        margin_header: read_u32_le(data, 24)?,
        margin_footer: read_u32_le(data, 28)?,
        gutter: read_u32_le(data, 32)?,
        landscape: property & LANDSCAPE != 0,
    })
}

#[cfg(test)]
pub(crate) fn page_def_record(width: u32, height: u32, landscape: bool) -> Vec<u8> {
    let mut data = Vec::with_capacity(40);
    for v in [width, height, 8504, 8504, 5668, 4252, 4252, 4252, 0, landscape as u32] {
        data.extend_from_slice(&v.to_le_bytes());
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_geometry_and_orientation() {
        let page = parse_page_def(&page_def_record(84_188, 59_528, true)).unwrap();
        assert_eq!(page.width, 84_188);
        assert_eq!(page.margin_top, 5668);
        assert!(page.landscape);
        assert!(parse_page_def(&[0u8; 12]).is_err());
    }
}

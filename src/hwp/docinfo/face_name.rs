use crate::common::binary::{BinaryResult, read_u8, read_wstring};

const HAS_ALTERNATE: u8 = 0x80;
const HAS_TYPE_INFO: u8 = 0x40;
const HAS_DEFAULT: u8 = 0x20;

/// Length of the PANOSE-like type-info block.
const TYPE_INFO_LEN: usize = 10;

/// A font face from a FACE_NAME record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FaceName {
    pub name: String,
    /// Substitute font kind (0 unknown, 1 TrueType, 2 HWP font) and name
    pub alternate: Option<(u8, String)>,
    pub default_name: Option<String>,
}

impl FaceName {
    pub fn parse(data: &[u8]) -> BinaryResult<Self> {
        let property = read_u8(data, 0)?;
        let (name, mut offset) = read_wstring(data, 1)?;

        let alternate = if property & HAS_ALTERNATE != 0 {
            let kind = read_u8(data, offset)?;
            let (alt, next) = read_wstring(data, offset + 1)?;
            offset = next;
            Some((kind, alt))
        } else {
            None
        };
        if property & HAS_TYPE_INFO != 0 {
            offset += TYPE_INFO_LEN;
        }
        let default_name = if property & HAS_DEFAULT != 0 {
            Some(read_wstring(data, offset)?.0)
        } else {
            None
        };

        Ok(Self {
            name,
            alternate,
            default_name,
        })
    }
}

use super::consts::*;
use super::file::{OleError, OleFile};
use crate::common::binary::{read_i16_le, read_i32_le, read_u16_le, read_u32_le};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Property ids of the SummaryInformation property set
mod pid {
    pub const CODEPAGE: u32 = 1;
    pub const TITLE: u32 = 2;
    pub const SUBJECT: u32 = 3;
    pub const AUTHOR: u32 = 4;
    pub const KEYWORDS: u32 = 5;
    pub const COMMENTS: u32 = 6;
    pub const LAST_SAVED_BY: u32 = 8;
    pub const REVISION_NUMBER: u32 = 9;
    pub const CREATE_TIME: u32 = 12;
    pub const LAST_SAVED_TIME: u32 = 13;
    pub const NUM_PAGES: u32 = 14;
}

/// Upper bound on properties read from one section
const MAX_PROPERTIES: usize = 1000;

/// 100-ns intervals between 1601-01-01 and 1970-01-01
const FILETIME_UNIX_EPOCH: u64 = 116_444_736_000_000_000;

/// Properties read from a summary-information stream
#[derive(Debug, Default, Clone)]
pub struct OleMetadata {
    pub codepage: Option<u32>,
    pub title: Option<String>,
    pub subject: Option<String>,
    pub author: Option<String>,
    pub keywords: Option<String>,
    pub comments: Option<String>,
    pub last_saved_by: Option<String>,
    pub revision_number: Option<String>,
    pub create_time: Option<DateTime<Utc>>,
    pub last_saved_time: Option<DateTime<Utc>>,
    pub num_pages: Option<u32>,
}

/// Property value types
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    I2(i16),
    I4(i32),
    UI2(u16),
    UI4(u32),
    Bool(bool),
    Lpstr(String),
    Lpwstr(String),
    Filetime(u64),
    Empty,
}

impl OleFile {
    /// Parse a summary-information property stream by name.
    ///
    /// HWP files name it `\u{5}HwpSummaryInformation`; Office files use
    /// `\u{5}SummaryInformation`.
    pub fn summary_information(&self, stream_name: &str) -> Result<OleMetadata, OleError> {
        let data = self.read_entry(stream_name)?;
        let props = parse_property_stream(&data)?;
        Ok(extract_summary_info(&props))
    }
}

/// Parse the first section of a property-set stream ([MS-OLEPS]).
fn parse_property_stream(data: &[u8]) -> Result<HashMap<u32, PropertyValue>, OleError> {
    if data.len() < 48 {
        return Err(OleError::InvalidFormat(
            "Property stream too short".to_string(),
        ));
    }

    // 28-byte header, then FMTID (16) + section offset (4)
    let section_offset = read_u32_le(data, 44)? as usize;
    let num_props = read_u32_le(data, section_offset.saturating_add(4))
        .map_err(|_| OleError::InvalidFormat("Invalid section offset".to_string()))?
        as usize;

    let mut properties = HashMap::new();
    for i in 0..num_props.min(MAX_PROPERTIES) {
        let entry = section_offset + 8 + i * 8;
        let (Ok(prop_id), Ok(rel)) = (read_u32_le(data, entry), read_u32_le(data, entry + 4))
        else {
            break;
        };
        let value_offset = section_offset + rel as usize;
        let Ok(prop_type) = read_u16_le(data, value_offset) else {
            continue;
        };
        if let Some(value) = parse_property_value(data, value_offset + 4, prop_type) {
            properties.insert(prop_id, value);
        }
    }

    Ok(properties)
}

/// Parse a single property value; `None` when the value runs past the data.
fn parse_property_value(data: &[u8], offset: usize, prop_type: u16) -> Option<PropertyValue> {
    let value = match prop_type {
        VT_I2 => PropertyValue::I2(read_i16_le(data, offset).ok()?),
        VT_I4 | VT_INT | VT_ERROR => PropertyValue::I4(read_i32_le(data, offset).ok()?),
        VT_UI2 => PropertyValue::UI2(read_u16_le(data, offset).ok()?),
        VT_UI4 | VT_UINT => PropertyValue::UI4(read_u32_le(data, offset).ok()?),
        VT_BOOL => PropertyValue::Bool(read_u16_le(data, offset).ok()? != 0),
        VT_LPSTR | VT_BSTR => {
            let len = read_u32_le(data, offset).ok()? as usize;
            let bytes = data.get(offset + 4..offset + 4 + len)?;
            PropertyValue::Lpstr(
                String::from_utf8_lossy(bytes)
                    .trim_end_matches('\0')
                    .to_string(),
            )
        },
        VT_LPWSTR => {
            let chars = read_u32_le(data, offset).ok()? as usize;
            let bytes = data.get(offset + 4..offset + 4 + chars.checked_mul(2)?)?;
            PropertyValue::Lpwstr(crate::common::binary::parse_utf16le_string(bytes))
        },
        VT_FILETIME => {
            let low = read_u32_le(data, offset).ok()? as u64;
            let high = read_u32_le(data, offset + 4).ok()? as u64;
            PropertyValue::Filetime(low | (high << 32))
        },
        VT_EMPTY | VT_NULL => PropertyValue::Empty,
        _ => PropertyValue::Empty,
    };
    Some(value)
}

fn extract_summary_info(props: &HashMap<u32, PropertyValue>) -> OleMetadata {
    let string = |id: u32| props.get(&id).and_then(extract_string);
    let time = |id: u32| match props.get(&id) {
        Some(PropertyValue::Filetime(v)) => filetime_to_datetime(*v),
        _ => None,
    };

    OleMetadata {
        codepage: match props.get(&pid::CODEPAGE) {
            Some(PropertyValue::I2(v)) => Some(*v as u16 as u32),
            Some(PropertyValue::UI2(v)) => Some(*v as u32),
            _ => None,
        },
        title: string(pid::TITLE),
        subject: string(pid::SUBJECT),
        author: string(pid::AUTHOR),
        keywords: string(pid::KEYWORDS),
        comments: string(pid::COMMENTS),
        last_saved_by: string(pid::LAST_SAVED_BY),
        revision_number: string(pid::REVISION_NUMBER),
        create_time: time(pid::CREATE_TIME),
        last_saved_time: time(pid::LAST_SAVED_TIME),
        num_pages: match props.get(&pid::NUM_PAGES) {
            Some(PropertyValue::I4(v)) if *v >= 0 => Some(*v as u32),
            _ => None,
        },
    }
}

fn extract_string(value: &PropertyValue) -> Option<String> {
    match value {
        PropertyValue::Lpstr(s) | PropertyValue::Lpwstr(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Convert a Windows FILETIME to UTC. Zero and pre-1970 values are dropped.
pub fn filetime_to_datetime(filetime: u64) -> Option<DateTime<Utc>> {
    let since_epoch = filetime.checked_sub(FILETIME_UNIX_EPOCH)?;
    let secs = (since_epoch / 10_000_000) as i64;
    let nanos = ((since_epoch % 10_000_000) * 100) as u32;
    DateTime::from_timestamp(secs, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal one-section property set with a title (LPWSTR) and a
    /// creation time.
    fn property_set() -> Vec<u8> {
        let mut data = vec![0u8; 48];
        data[0] = 0xFE;
        data[1] = 0xFF;
        data[24..28].copy_from_slice(&1u32.to_le_bytes());
        data[44..48].copy_from_slice(&48u32.to_le_bytes());

        let title: Vec<u8> = "보고서\0"
            .encode_utf16()
            .flat_map(|u| u.to_le_bytes())
            .collect();
        let mut section = Vec::new();
        // size placeholder, count
        section.extend_from_slice(&0u32.to_le_bytes());
        section.extend_from_slice(&2u32.to_le_bytes());
        let values_start = 8 + 2 * 8;
        section.extend_from_slice(&pid::TITLE.to_le_bytes());
        section.extend_from_slice(&(values_start as u32).to_le_bytes());
        let time_offset = values_start + 8 + title.len();
        section.extend_from_slice(&pid::CREATE_TIME.to_le_bytes());
        section.extend_from_slice(&(time_offset as u32).to_le_bytes());

        section.extend_from_slice(&(VT_LPWSTR as u32).to_le_bytes());
        section.extend_from_slice(&((title.len() / 2) as u32).to_le_bytes());
        section.extend_from_slice(&title);

        section.extend_from_slice(&(VT_FILETIME as u32).to_le_bytes());
        // 2020-01-01T00:00:00Z
        let ft = FILETIME_UNIX_EPOCH + 1_577_836_800u64 * 10_000_000;
        section.extend_from_slice(&ft.to_le_bytes());

        data.extend_from_slice(&section);
        data
    }

    #[test]
    fn parses_title_and_create_time() {
        let props = parse_property_stream(&property_set()).unwrap();
        let meta = extract_summary_info(&props);
        assert_eq!(meta.title.as_deref(), Some("보고서"));
        assert_eq!(
            meta.create_time.map(|t| t.to_rfc3339()),
            Some("2020-01-01T00:00:00+00:00".to_string())
        );
        assert!(meta.author.is_none());
    }

    #[test]
    fn short_stream_is_rejected() {
        assert!(parse_property_stream(&[0u8; 10]).is_err());
    }

    #[test]
    fn zero_filetime_is_none() {
        assert!(filetime_to_datetime(0).is_none());
    }
}

//! Images, page geometry, headers/footers and binary assets.

use super::SectionElement;
use crate::common::ElementId;
use crate::common::unit::hwpunit_to_mm;
use serde::{Serialize, Serializer};

/// Position and size of a drawing object, in HWPUNIT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Placement {
    /// Offset from the anchor, vertical then horizontal as stored
    pub vertical_offset: i32,
    pub horizontal_offset: i32,
    pub width: u32,
    pub height: u32,
}

/// A picture placed in the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub id: ElementId,
    /// Key into [`Document::bin_data`](super::Document::bin_data), e.g. `BIN0001`
    pub asset_id: String,
    /// Numeric bin-data id from the picture record
    pub bin_id: u16,
    pub placement: Placement,
}

/// Page size and margins of a section, in HWPUNIT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageDef {
    pub width: u32,
    pub height: u32,
    pub margin_left: u32,
    pub margin_right: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub margin_header: u32,
    pub margin_footer: u32,
    pub gutter: u32,
    pub landscape: bool,
}

impl Default for PageDef {
    /// A4 portrait with the word processor's default margins.
    fn default() -> Self {
        Self {
            width: 59_528,
            height: 84_188,
            margin_left: 8_504,
            margin_right: 8_504,
            margin_top: 5_668,
            margin_bottom: 4_252,
            margin_header: 4_252,
            margin_footer: 4_252,
            gutter: 0,
            landscape: false,
        }
    }
}

impl PageDef {
    /// Paper size in millimetres, `(width, height)` as stored.
    pub fn size_mm(&self) -> (f64, f64) {
        (
            hwpunit_to_mm(self.width as i64),
            hwpunit_to_mm(self.height as i64),
        )
    }
}

/// Which pages a header or footer applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageScope {
    Both,
    Even,
    Odd,
}

impl PageScope {
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            1 => PageScope::Even,
            2 => PageScope::Odd,
            _ => PageScope::Both,
        }
    }
}

/// Content of one header or footer control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderFooter {
    pub scope: PageScope,
    pub elements: Vec<SectionElement>,
}

impl HeaderFooter {
    /// Paragraph texts joined by newlines.
    pub fn text(&self) -> String {
        self.elements
            .iter()
            .filter_map(SectionElement::as_paragraph)
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// An embedded binary stream from the `BinData` storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryAsset {
    /// Numeric id parsed from the stream name (`BIN000A.png` → 10)
    pub id: u16,
    /// Stream name, e.g. `BIN0001.jpg`
    pub name: String,
    /// Lower-cased extension without the dot
    pub extension: String,
    pub mime_type: &'static str,
    /// Decompressed bytes
    #[serde(serialize_with = "serialize_len")]
    pub data: Vec<u8>,
    /// Base64 of `data`, when requested
    pub base64: Option<String>,
}

/// Raw bytes are summarized by length; `base64` carries the content.
fn serialize_len<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(data.len() as u64)
}

/// Guess a MIME type from a file extension.
pub fn mime_type_for(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "wmf" => "image/wmf",
        "emf" => "image/emf",
        "svg" => "image/svg+xml",
        "ole" => "application/x-ole-storage",
        _ => "application/octet-stream",
    }
}

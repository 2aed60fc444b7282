use serde::{Serialize, Serializer};
use std::fmt;

/// RGB color representation.
///
/// HWP stores colors as Windows `COLORREF` words (`0x00BBGGRR`); the high byte
/// is unused except for the "no color" sentinel `0xFFFFFFFF`.
///
/// # Examples
///
/// ```rust
/// use hwp_core::common::RGBColor;
///
/// let red = RGBColor::from_colorref(0x0000_00FF).unwrap();
/// assert_eq!(red.to_hex(), "FF0000");
/// assert!(RGBColor::from_colorref(0xFFFF_FFFF).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

/// `COLORREF` value meaning "transparent / not set".
pub const COLORREF_NONE: u32 = 0xFFFF_FFFF;

impl RGBColor {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode a `COLORREF` word. Returns `None` for the transparent sentinel.
    #[inline]
    pub const fn from_colorref(value: u32) -> Option<Self> {
        if value == COLORREF_NONE {
            return None;
        }
        Some(Self::new(
            (value & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            ((value >> 16) & 0xFF) as u8,
        ))
    }

    /// Convert to hex string (without # prefix).
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

// Serialized as "#RRGGBB".
impl Serialize for RGBColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

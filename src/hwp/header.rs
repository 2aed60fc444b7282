//! The 256-byte `FileHeader` stream.

use super::consts::{SIGNATURE, SIGNATURE_LEN, file_flags};
use crate::common::binary::read_u32_le;
use crate::common::error::{Error, Result};
use bitflags::bitflags;
use serde::Serialize;
use std::fmt;

bitflags! {
    /// Document-level property bits from the file header.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
    #[serde(transparent)]
    pub struct FileFlags: u32 {
        const COMPRESSED = file_flags::COMPRESSED;
        const ENCRYPTED = file_flags::ENCRYPTED;
        const DISTRIBUTION = file_flags::DISTRIBUTION;
        const SCRIPT = file_flags::SCRIPT;
        const DRM = file_flags::DRM;
        const XML_TEMPLATE = file_flags::XML_TEMPLATE;
        const HISTORY = file_flags::HISTORY;
        const SIGNED = file_flags::SIGNED;
        const CERT_ENCRYPTED = file_flags::CERT_ENCRYPTED;
        const CCL = file_flags::CCL;

        const _ = !0;
    }
}

/// Document version stored as `0xMMnnPPrr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct HwpVersion {
    pub major: u8,
    pub minor: u8,
    pub build: u8,
    pub revision: u8,
}

impl HwpVersion {
    pub fn from_u32(raw: u32) -> Self {
        let [revision, build, minor, major] = raw.to_le_bytes();
        Self {
            major,
            minor,
            build,
            revision,
        }
    }
}

impl fmt::Display for HwpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

/// Parsed `FileHeader`.
#[derive(Debug, Clone, Copy)]
pub struct FileHeader {
    pub version: HwpVersion,
    pub flags: FileFlags,
}

impl FileHeader {
    /// Validate the signature and read version and flags.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let field = data
            .get(..SIGNATURE_LEN)
            .ok_or(Error::NotHwpFile)?;
        if !field.starts_with(SIGNATURE) || field[SIGNATURE.len()..].iter().any(|&b| b != 0) {
            return Err(Error::NotHwpFile);
        }

        let version = HwpVersion::from_u32(read_u32_le(data, SIGNATURE_LEN)?);
        if version.major != 5 {
            return Err(Error::UnsupportedVersion(format!("HWP {}", version)));
        }
        let flags = FileFlags::from_bits_retain(read_u32_le(data, SIGNATURE_LEN + 4)?);

        Ok(Self { version, flags })
    }

    #[inline]
    pub fn is_compressed(&self) -> bool {
        self.flags.contains(FileFlags::COMPRESSED)
    }

    #[inline]
    pub fn is_encrypted(&self) -> bool {
        self.flags.contains(FileFlags::ENCRYPTED)
    }

    #[inline]
    pub fn is_distribution(&self) -> bool {
        self.flags.contains(FileFlags::DISTRIBUTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::file_header;

    #[test]
    fn reads_version_and_flags() {
        let header = FileHeader::parse(&file_header(0b11)).unwrap();
        assert_eq!(header.version.to_string(), "5.0.3.0");
        assert!(header.is_compressed());
        assert!(header.is_encrypted());
        assert!(!header.is_distribution());
    }

    #[test]
    fn rejects_wrong_signature() {
        let mut data = file_header(0);
        data[0] = b'X';
        assert!(matches!(FileHeader::parse(&data), Err(Error::NotHwpFile)));
        assert!(matches!(FileHeader::parse(&[0u8; 8]), Err(Error::NotHwpFile)));
    }

    #[test]
    fn rejects_hwp3_version() {
        let mut data = file_header(0);
        data[32..36].copy_from_slice(&0x0300_0000u32.to_le_bytes());
        assert!(matches!(
            FileHeader::parse(&data),
            Err(Error::UnsupportedVersion(_))
        ));
    }
}

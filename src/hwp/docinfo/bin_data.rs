use crate::common::binary::{BinaryResult, read_u16_le, read_wstring};

const KIND_MASK: u16 = 0x000F;
const COMPRESSION_SHIFT: u16 = 4;
const COMPRESSION_MASK: u16 = 0x0003;

/// Where the binary data of a BIN_DATA record lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinDataKind {
    /// External file referenced by path
    Link {
        absolute_path: String,
        relative_path: String,
    },
    /// `BinData/BIN{id:04X}.{extension}` stream
    Embedding { bin_id: u16, extension: String },
    /// OLE storage
    Storage { bin_id: u16 },
    /// Record that could not be decoded; holds its table slot
    Invalid,
}

/// Per-item compression override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinCompression {
    /// Follow the document's compression flag
    #[default]
    Default,
    Compress,
    NoCompress,
}

/// A BIN_DATA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinDataItem {
    pub kind: BinDataKind,
    pub compression: BinCompression,
}

impl Default for BinDataItem {
    fn default() -> Self {
        Self {
            kind: BinDataKind::Invalid,
            compression: BinCompression::Default,
        }
    }
}

impl BinDataItem {
    pub fn parse(data: &[u8]) -> BinaryResult<Self> {
        let property = read_u16_le(data, 0)?;
        let compression = match (property >> COMPRESSION_SHIFT) & COMPRESSION_MASK {
            1 => BinCompression::Compress,
            2 => BinCompression::NoCompress,
            _ => BinCompression::Default,
        };

        let kind = match property & KIND_MASK {
            0 => {
                let (absolute_path, next) = read_wstring(data, 2)?;
                let (relative_path, _) = read_wstring(data, next)?;
                BinDataKind::Link {
                    absolute_path,
                    relative_path,
                }
            },
            1 => BinDataKind::Embedding {
                bin_id: read_u16_le(data, 2)?,
                extension: read_wstring(data, 4)?.0,
            },
            _ => BinDataKind::Storage {
                bin_id: read_u16_le(data, 2)?,
            },
        };

        Ok(Self { kind, compression })
    }

    pub fn bin_id(&self) -> Option<u16> {
        match self.kind {
            BinDataKind::Embedding { bin_id, .. } | BinDataKind::Storage { bin_id } => Some(bin_id),
            BinDataKind::Link { .. } | BinDataKind::Invalid => None,
        }
    }

    /// Whether the stream is deflated, given the document-level flag.
    pub fn is_compressed(&self, document_compressed: bool) -> bool {
        match self.compression {
            BinCompression::Default => document_compressed,
            BinCompression::Compress => true,
            BinCompression::NoCompress => false,
        }
    }
}

#[cfg(test)]
pub(crate) fn embedding_record(bin_id: u16, extension: &str, compression: u16) -> Vec<u8> {
    let mut data = (1u16 | (compression << COMPRESSION_SHIFT)).to_le_bytes().to_vec();
    data.extend_from_slice(&bin_id.to_le_bytes());
    data.extend_from_slice(&(extension.encode_utf16().count() as u16).to_le_bytes());
    data.extend(crate::test_support::utf16(extension));
    data
}

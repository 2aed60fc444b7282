//! Unified error type for HWP parsing.
use thiserror::Error;

/// Main error type for hwp-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The buffer is not a compound file at all
    #[error("Not a compound (OLE2) file")]
    NotOleFile,

    /// The container opened but its FileHeader is not an HWP signature
    #[error("Not an HWP document")]
    NotHwpFile,

    /// Container or document version outside the supported range
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(String),

    /// Password-protected document; decryption is not supported
    #[error("Unsupported: encrypted document")]
    Encrypted,

    /// Unsupported feature
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Corrupted or malformed file
    #[error("Corrupted file: {0}")]
    CorruptedFile(String),

    /// Required stream or storage is missing
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// Structurally invalid data
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input is not this format
    NotThisFormat,
    /// Recognized, but uses a version or feature this crate does not handle
    Unsupported,
    /// Recognized, but the data is damaged or incomplete
    Corrupt,
    /// Underlying reader failed
    Io,
}

impl Error {
    /// Classify the error for callers that only need the broad category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::NotOleFile | Error::NotHwpFile => ErrorKind::NotThisFormat,
            Error::UnsupportedVersion(_) | Error::Encrypted | Error::Unsupported(_) => {
                ErrorKind::Unsupported
            },
            Error::CorruptedFile(_) | Error::ComponentNotFound(_) | Error::InvalidFormat(_) => {
                ErrorKind::Corrupt
            },
        }
    }
}

/// Result type for hwp-core operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;
use crate::common::binary::BinaryError;
use crate::ole::OleError;

impl From<OleError> for Error {
    fn from(err: OleError) -> Self {
        match err {
            OleError::Io(e) => Error::Io(e),
            OleError::NotOleFile => Error::NotOleFile,
            OleError::UnsupportedVersion(v) => {
                Error::UnsupportedVersion(format!("compound file major version {}", v))
            },
            OleError::InvalidFormat(s) => Error::InvalidFormat(s),
            OleError::InvalidData(s) => Error::InvalidFormat(s),
            OleError::CorruptedFile(s) => Error::CorruptedFile(s),
            OleError::StreamNotFound(s) => Error::ComponentNotFound(s),
        }
    }
}

impl From<BinaryError> for Error {
    fn from(err: BinaryError) -> Self {
        Error::InvalidFormat(err.to_string())
    }
}

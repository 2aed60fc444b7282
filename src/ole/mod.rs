/// Constants for the compound file format
pub mod consts;

/// Main compound-file parsing implementation
mod file;

/// Metadata extraction from OLE property streams
mod metadata;

// Re-export public types for convenient access
pub use file::{DirectoryEntry, EntryKind, OleError, OleFile, is_ole_file};
pub use metadata::{OleMetadata, PropertyValue, filetime_to_datetime};

//! Common types, traits, and utilities shared across the container reader,
//! the record decoders and the content model.

// Submodule declarations
pub mod binary;
pub mod error;
pub mod id;
pub mod style;
pub mod unit;

// Re-exports for convenience
pub use error::{Error, ErrorKind, Result};
pub use id::{ElementId, IdGenerator};
pub use style::RGBColor;

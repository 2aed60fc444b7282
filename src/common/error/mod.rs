//! Unified error types for hwp-core.
//!
//! Container-level failures (`OleError`) and field-decoding failures
//! (`BinaryError`) are folded into one [`Error`] so callers only ever match on
//! a single type.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, ErrorKind, Result};

//! Common style and formatting types.

// Submodule declarations
pub mod color;

// Re-exports
pub use color::{COLORREF_NONE, RGBColor};

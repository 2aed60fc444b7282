//! hwp-core - A Rust library for reading HWP 5.0 binary documents
//!
//! HWP is the native format of the Hancom word processor. Version 5.0 files
//! are OLE2 compound files whose streams hold tagged, level-nested records.
//! This crate reads the container, decodes the record streams and assembles
//! a format-neutral document model.
//!
//! # Features
//!
//! - **Compound-file reader**: FAT/mini-FAT/DIFAT chains with corruption guards
//! - **Record decoder**: tag/level/size headers with extended sizes
//! - **Style tables**: fonts, character shapes, paragraph shapes, border fills
//! - **Section parser**: paragraphs with styled runs, nested tables, images,
//!   headers and footers, page geometry
//! - **Binary assets**: embedded pictures, decompressed and base64-encoded
//! - **Metadata**: version flags, summary information and preview text
//!
//! # Example - Reading an HWP file
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("report.hwp")?;
//! let doc = hwp_core::parse_hwp(&bytes)?;
//!
//! for section in &doc.sections {
//!     for para in section.paragraphs() {
//!         println!("{}", para.text());
//!     }
//!     for table in section.tables() {
//!         println!("table with {} rows", table.row_count());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Low-level container access
//!
//! ```no_run
//! use hwp_core::ole::OleFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ole = OleFile::open(std::fs::File::open("report.hwp")?)?;
//! for path in ole.list_streams() {
//!     println!("{}", path.join("/"));
//! }
//! let header = ole.read_entry("FileHeader")?;
//! println!("{} bytes", header.len());
//! # Ok(())
//! # }
//! ```

/// Shared binary readers, error types, ids and colors
pub mod common;

/// OLE2 compound-file container
pub mod ole;

/// HWP 5.0 stream decoding
pub mod hwp;

/// Format-neutral content model
pub mod document;

#[cfg(test)]
mod test_support;

pub use common::{Error, ErrorKind, Result};
pub use document::Document;
pub use hwp::{Package, ParseOptions, parse_hwp, parse_hwp_with};

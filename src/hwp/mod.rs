//! HWP 5.0 binary document decoding.
//!
//! An HWP file is a compound file holding:
//!
//! - `FileHeader`: signature, version and document flags
//! - `DocInfo`: the global style tables (fonts, char/para shapes, border fills)
//! - `BodyText/Section{n}`: one record stream per section
//! - `BinData/BIN{xxxx}.{ext}`: embedded pictures and objects
//! - `\u{5}HwpSummaryInformation` and `PrvText`: metadata and preview text
//!
//! Streams other than `FileHeader` are raw-deflate compressed when the
//! header's compressed flag is set.
//!
//! # Example
//!
//! ```rust,no_run
//! use hwp_core::hwp::{Package, ParseOptions};
//!
//! let package = Package::open("report.hwp", ParseOptions::default())?;
//! let info = package.doc_info()?;
//! println!("{} char shapes", info.char_shapes.len());
//! # Ok::<(), hwp_core::Error>(())
//! ```

pub mod bin_data;
pub mod consts;
pub mod decompress;
pub mod docinfo;
pub mod header;
pub mod options;
pub mod package;
pub mod record;
pub mod section;

pub use decompress::decompress;
pub use docinfo::DocInfo;
pub use header::{FileFlags, FileHeader, HwpVersion};
pub use options::ParseOptions;
pub use package::{Package, parse_hwp, parse_hwp_with};
pub use record::{ReadOutcome, Record, RecordReader, for_each_record};
pub use section::{SectionParser, parse_section};

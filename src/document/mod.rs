//! Format-neutral content model.
//!
//! The HWP decoders assemble their output into these plain data types. Every
//! type derives `Serialize`, so a parsed document can be handed to any serde
//! backend as-is.
//!
//! # Architecture
//!
//! - [`Document`]: metadata, sections and the binary-asset registry
//! - [`Section`]: ordered [`SectionElement`]s plus page geometry and
//!   headers/footers
//! - [`Paragraph`] with styled [`Run`]s
//! - [`Table`] with rows of [`TableCell`]s, each holding nested content
//! - [`Image`] referencing a [`BinaryAsset`] by key
//!
//! # Example
//!
//! ```rust,no_run
//! let bytes = std::fs::read("report.hwp")?;
//! let doc = hwp_core::parse_hwp(&bytes)?;
//!
//! println!("version {}", doc.metadata.version);
//! for section in &doc.sections {
//!     for para in section.paragraphs() {
//!         for run in para.runs() {
//!             println!("{:?} bold={}", run.text(), run.bold());
//!         }
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod element;
mod paragraph;
mod section;
mod table;
mod types;

pub use element::SectionElement;
pub use paragraph::{
    Alignment, LineSpacing, Paragraph, ParagraphStyle, Run, RunStyle, Underline,
    VerticalPosition,
};
pub use section::Section;
pub use table::{BorderLine, CellBorders, Table, TableCell, TableRow};
pub use types::{BinaryAsset, HeaderFooter, Image, PageDef, PageScope, Placement, mime_type_for};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Document-level information from the file header and property streams.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Metadata {
    /// Format version, e.g. `5.0.3.0`
    pub version: String,
    pub compressed: bool,
    pub encrypted: bool,
    pub distribution: bool,
    pub title: Option<String>,
    pub subject: Option<String>,
    pub author: Option<String>,
    pub keywords: Option<String>,
    pub comments: Option<String>,
    pub last_saved_by: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    /// Plain-text preview stored by the writer
    pub preview_text: Option<String>,
    /// Section count declared in the document properties
    pub declared_sections: Option<u16>,
}

/// A parsed HWP document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    pub metadata: Metadata,
    pub sections: Vec<Section>,
    /// Embedded assets keyed by stream stem (`BIN0001`)
    pub bin_data: BTreeMap<String, BinaryAsset>,
}

impl Document {
    /// All top-level paragraph text, sections separated by blank lines.
    pub fn text(&self) -> String {
        self.sections
            .iter()
            .map(Section::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Look up the asset an image points at.
    pub fn asset(&self, image: &Image) -> Option<&BinaryAsset> {
        self.bin_data.get(&image.asset_id)
    }
}

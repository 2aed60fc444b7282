//! Section element types for representing ordered content.

use super::{Image, Paragraph, Table};
use serde::Serialize;

/// A block-level element of a section, header/footer or text box.
///
/// Elements are kept in the order they appear in the record stream.
///
/// # Examples
///
/// ```rust,no_run
/// use hwp_core::document::SectionElement;
///
/// let bytes = std::fs::read("report.hwp")?;
/// let doc = hwp_core::parse_hwp(&bytes)?;
/// for element in &doc.sections[0].elements {
///     match element {
///         SectionElement::Paragraph(p) => println!("{}", p.text),
///         SectionElement::Table(t) => println!("table {}x{}", t.row_count, t.col_count),
///         SectionElement::Image(i) => println!("image {}", i.asset_id),
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SectionElement {
    /// A paragraph element (boxed to keep the enum small)
    Paragraph(Box<Paragraph>),
    /// A table element
    Table(Box<Table>),
    /// A picture referencing a binary asset
    Image(Box<Image>),
}

impl SectionElement {
    #[inline]
    pub fn is_paragraph(&self) -> bool {
        matches!(self, SectionElement::Paragraph(_))
    }

    #[inline]
    pub fn is_table(&self) -> bool {
        matches!(self, SectionElement::Table(_))
    }

    #[inline]
    pub fn is_image(&self) -> bool {
        matches!(self, SectionElement::Image(_))
    }

    /// Get a reference to the paragraph, if this is a paragraph element.
    #[inline]
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            SectionElement::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    /// Get a reference to the table, if this is a table element.
    #[inline]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            SectionElement::Table(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn as_image(&self) -> Option<&Image> {
        match self {
            SectionElement::Image(i) => Some(i),
            _ => None,
        }
    }
}

impl From<Paragraph> for SectionElement {
    fn from(p: Paragraph) -> Self {
        SectionElement::Paragraph(Box::new(p))
    }
}

impl From<Table> for SectionElement {
    fn from(t: Table) -> Self {
        SectionElement::Table(Box::new(t))
    }
}

impl From<Image> for SectionElement {
    fn from(i: Image) -> Self {
        SectionElement::Image(Box::new(i))
    }
}

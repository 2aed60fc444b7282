//! Sections: the top-level containers of body content.

use super::{HeaderFooter, PageDef, Paragraph, SectionElement, Table};
use serde::Serialize;

/// One `BodyText/Section{n}` stream.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Section {
    /// Index of the stream this section came from
    pub index: usize,
    pub elements: Vec<SectionElement>,
    /// Geometry from the section definition, when present
    pub page: Option<PageDef>,
    pub headers: Vec<HeaderFooter>,
    pub footers: Vec<HeaderFooter>,
}

impl Section {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Top-level paragraphs, skipping tables and images.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.elements.iter().filter_map(SectionElement::as_paragraph)
    }

    /// Top-level tables.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.elements.iter().filter_map(SectionElement::as_table)
    }

    /// Text of the top-level paragraphs joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

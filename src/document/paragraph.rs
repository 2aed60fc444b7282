//! Paragraphs, runs and their resolved styles.

use crate::common::{ElementId, RGBColor};
use serde::Serialize;

/// A paragraph of a section, table cell, header/footer or text box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub id: ElementId,
    /// Full paragraph text; equals the concatenation of the run texts
    pub text: String,
    pub runs: Vec<Run>,
    pub style: ParagraphStyle,
    /// Index into the DocInfo style table
    pub style_id: u8,
    /// Section/column/page break bits from the paragraph header
    pub break_type: u8,
}

impl Paragraph {
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A slice of paragraph text sharing one character shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    pub text: String,
    /// `None` when the text precedes the first shape breakpoint or the
    /// shape index has no table entry
    pub style: Option<RunStyle>,
}

impl Run {
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn bold(&self) -> bool {
        self.style.as_ref().is_some_and(|s| s.bold)
    }

    #[inline]
    pub fn italic(&self) -> bool {
        self.style.as_ref().is_some_and(|s| s.italic)
    }
}

/// Underline placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Underline {
    Below,
    Above,
}

/// Vertical text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalPosition {
    #[default]
    Baseline,
    Superscript,
    Subscript,
}

/// Character formatting resolved from a DocInfo char shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStyle {
    /// Index of the char shape this style came from
    pub shape_id: u32,
    pub font_name: Option<String>,
    /// Size in points
    pub size_pt: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: Option<Underline>,
    pub strikeout: bool,
    pub outline: bool,
    pub shadow: bool,
    pub emboss: bool,
    pub engrave: bool,
    pub vertical_position: VerticalPosition,
    pub color: Option<RGBColor>,
    pub underline_color: Option<RGBColor>,
    pub shade_color: Option<RGBColor>,
    /// Letter spacing of the Hangul slot, percent
    pub spacing: i8,
    /// Width ratio of the Hangul slot, percent
    pub ratio: u8,
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    #[default]
    Justify,
    Left,
    Right,
    Center,
    Distribute,
    Divide,
}

impl Alignment {
    /// Map the 3-bit alignment field; unknown values fall back to justify.
    pub fn from_bits(bits: u32) -> Self {
        match bits {
            1 => Alignment::Left,
            2 => Alignment::Right,
            3 => Alignment::Center,
            4 => Alignment::Distribute,
            5 => Alignment::Divide,
            _ => Alignment::Justify,
        }
    }
}

/// Line spacing rule and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum LineSpacing {
    /// Percent of the font height
    Percent(i32),
    /// Fixed height in HWPUNIT
    Fixed(i32),
    /// Gap between lines in HWPUNIT
    BetweenLines(i32),
    /// Minimum height in HWPUNIT
    AtLeast(i32),
}

impl Default for LineSpacing {
    fn default() -> Self {
        LineSpacing::Percent(160)
    }
}

/// Paragraph formatting resolved from a DocInfo para shape.
///
/// Lengths are HWPUNIT (1/7200 inch).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ParagraphStyle {
    pub alignment: Alignment,
    pub margin_left: i32,
    pub margin_right: i32,
    pub indent: i32,
    pub space_before: i32,
    pub space_after: i32,
    pub line_spacing: LineSpacing,
    pub keep_with_next: bool,
    pub keep_lines: bool,
    pub page_break_before: bool,
    pub widow_orphan: bool,
}

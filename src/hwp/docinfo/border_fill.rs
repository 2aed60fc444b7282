use crate::common::RGBColor;
use crate::common::binary::{BinaryResult, read_i16_le, read_i8, read_u8, read_u16_le, read_u32_le};
use crate::document::BorderLine;
use crate::hwp::consts::{BORDER_STYLE, BORDER_WIDTH_MM, fill_type};

/// Bytes per edge: type, width, COLORREF.
const EDGE_LEN: usize = 6;
const EDGES_OFFSET: usize = 2;
const FILL_TYPE_OFFSET: usize = 32;

/// One edge of a BORDER_FILL record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderEdge {
    pub line_type: u8,
    pub width: u8,
    pub color: u32,
}

impl BorderEdge {
    fn parse(data: &[u8], offset: usize) -> BinaryResult<Self> {
        Ok(Self {
            line_type: read_u8(data, offset)?,
            width: read_u8(data, offset + 1)?,
            color: read_u32_le(data, offset + 2)?,
        })
    }

    pub fn style_name(&self) -> &'static str {
        BORDER_STYLE
            .get(self.line_type as usize)
            .copied()
            .unwrap_or("solid")
    }

    pub fn width_mm(&self) -> f32 {
        BORDER_WIDTH_MM
            .get(self.width as usize)
            .copied()
            .unwrap_or(BORDER_WIDTH_MM[0])
    }

    pub fn to_line(&self) -> BorderLine {
        BorderLine {
            style: self.style_name(),
            width_mm: self.width_mm(),
            color: RGBColor::from_colorref(self.color),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidFill {
    pub background: u32,
    pub pattern_color: u32,
    pub pattern_type: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientFill {
    pub kind: i16,
    pub angle: i16,
    pub center_x: i16,
    pub center_y: i16,
    pub blur: i16,
    pub colors: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageFill {
    pub mode: u8,
    pub brightness: i8,
    pub contrast: i8,
    pub effect: u8,
    pub bin_id: u16,
}

/// Fill description; any combination of the three kinds may be present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fill {
    pub solid: Option<SolidFill>,
    pub gradient: Option<GradientFill>,
    pub image: Option<ImageFill>,
}

/// A BORDER_FILL record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BorderFill {
    pub property: u16,
    /// Left, right, top, bottom
    pub edges: [BorderEdge; 4],
    pub diagonal: BorderEdge,
    pub fill: Fill,
}

impl BorderFill {
    pub fn parse(data: &[u8]) -> BinaryResult<Self> {
        let property = read_u16_le(data, 0)?;
        let mut edges = [BorderEdge::default(); 4];
        for (i, edge) in edges.iter_mut().enumerate() {
            *edge = BorderEdge::parse(data, EDGES_OFFSET + i * EDGE_LEN)?;
        }
        let diagonal = BorderEdge::parse(data, EDGES_OFFSET + 4 * EDGE_LEN)?;

        let fill = match read_u32_le(data, FILL_TYPE_OFFSET) {
            Ok(kind) => parse_fill(data, FILL_TYPE_OFFSET + 4, kind),
            Err(_) => Fill::default(),
        };

        Ok(Self {
            property,
            edges,
            diagonal,
            fill,
        })
    }

    /// Solid background color, if any.
    pub fn background_color(&self) -> Option<RGBColor> {
        self.fill
            .solid
            .and_then(|s| RGBColor::from_colorref(s.background))
    }
}

/// Decode the fill block. Parts that run past the record are dropped.
fn parse_fill(data: &[u8], mut offset: usize, kind: u32) -> Fill {
    let mut fill = Fill::default();

    if kind & fill_type::SOLID != 0 {
        match (
            read_u32_le(data, offset),
            read_u32_le(data, offset + 4),
            read_u32_le(data, offset + 8),
        ) {
            (Ok(background), Ok(pattern_color), Ok(pattern_type)) => {
                fill.solid = Some(SolidFill {
                    background,
                    pattern_color,
                    pattern_type: pattern_type as i32,
                });
                offset += 12;
            },
            _ => return fill,
        }
    }

    if kind & fill_type::GRADIENT != 0 {
        match parse_gradient(data, offset) {
            Ok((gradient, next)) => {
                fill.gradient = Some(gradient);
                offset = next;
            },
            Err(_) => return fill,
        }
    }

    if kind & fill_type::IMAGE != 0 {
        fill.image = parse_image_fill(data, offset).ok();
    }

    fill
}

fn parse_gradient(data: &[u8], offset: usize) -> BinaryResult<(GradientFill, usize)> {
    let kind = read_i16_le(data, offset)?;
    let angle = read_i16_le(data, offset + 2)?;
    let center_x = read_i16_le(data, offset + 4)?;
    let center_y = read_i16_le(data, offset + 6)?;
    let blur = read_i16_le(data, offset + 8)?;
    let count = read_i16_le(data, offset + 10)?.max(0) as usize;
    let mut cursor = offset + 12;
    // Change positions are only stored for more than two colors
    if count > 2 {
        cursor += 4 * count;
    }
    let mut colors = Vec::with_capacity(count.min(64));
    for i in 0..count {
        colors.push(read_u32_le(data, cursor + i * 4)?);
    }
    Ok((
        GradientFill {
            kind,
            angle,
            center_x,
            center_y,
            blur,
            colors,
        },
        cursor + count * 4,
    ))
}

fn parse_image_fill(data: &[u8], offset: usize) -> BinaryResult<ImageFill> {
    Ok(ImageFill {
        mode: read_u8(data, offset)?,
        brightness: read_i8(data, offset + 1)?,
        contrast: read_i8(data, offset + 2)?,
        effect: read_u8(data, offset + 3)?,
        bin_id: read_u16_le(data, offset + 4)?,
    })
}

#[cfg(test)]
pub(crate) fn border_fill_record(line_type: u8, width: u8, color: u32, background: Option<u32>) -> Vec<u8> {
    let mut data = vec![0u8; 36];
    for i in 0..4 {
        let at = EDGES_OFFSET + i * EDGE_LEN;
        data[at] = line_type;
        data[at + 1] = width;
        data[at + 2..at + 6].copy_from_slice(&color.to_le_bytes());
    }
    if let Some(bg) = background {
        data[32..36].copy_from_slice(&fill_type::SOLID.to_le_bytes());
        data.extend_from_slice(&bg.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&(-1i32).to_le_bytes());
    }
    data
}

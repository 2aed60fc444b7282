//! PARA_TEXT decoding and run slicing.

use crate::document::{Run, RunStyle};
use crate::hwp::consts::ctrl_char;

/// Paragraph text with the code-unit position of every character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    /// `(code-unit position, byte offset in text)` per character
    positions: Vec<(u32, usize)>,
}

impl DecodedText {
    /// Byte offset of the first character at or after code unit `unit`.
    fn byte_offset(&self, unit: u32) -> usize {
        let idx = self.positions.partition_point(|&(pos, _)| pos < unit);
        self.positions
            .get(idx)
            .map_or(self.text.len(), |&(_, offset)| offset)
    }

    fn push(&mut self, unit: usize, ch: char) {
        self.positions.push((unit as u32, self.text.len()));
        self.text.push(ch);
    }
}

/// Decode PARA_TEXT code units.
///
/// Tab, line break, hyphen and the two fixed spaces become characters, the
/// paragraph break ends the text, and every other control below 0x20 is an
/// inline or extended object reference whose code units are skipped.
pub fn decode_units(units: &[u16]) -> DecodedText {
    let mut out = DecodedText::default();
    let mut i = 0;

    while i < units.len() {
        let unit = units[i];
        match unit {
            ctrl_char::TAB => {
                out.push(i, '\t');
                i += ctrl_char::EXTENDED_WIDTH;
            },
            ctrl_char::LINE_BREAK => {
                out.push(i, '\n');
                i += 1;
            },
            ctrl_char::PARA_BREAK => i += 1,
            ctrl_char::HYPHEN => {
                out.push(i, '-');
                i += 1;
            },
            ctrl_char::NBSPACE => {
                out.push(i, '\u{A0}');
                i += 1;
            },
            ctrl_char::FIXED_WIDTH_SPACE => {
                out.push(i, ' ');
                i += 1;
            },
            u if ctrl_char::is_wide(u) => i += ctrl_char::EXTENDED_WIDTH,
            u if u < 0x20 => i += 1,
            0xD800..=0xDBFF => {
                let low = units.get(i + 1).copied().filter(|u| (0xDC00..=0xDFFF).contains(u));
                match low {
                    Some(low) => {
                        let code = 0x10000 + ((unit as u32 - 0xD800) << 10) + (low as u32 - 0xDC00);
                        out.push(i, char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                        i += 2;
                    },
                    None => {
                        out.push(i, char::REPLACEMENT_CHARACTER);
                        i += 1;
                    },
                }
            },
            _ => {
                out.push(i, char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER));
                i += 1;
            },
        }
    }
    out
}

/// Split `decoded` into runs at the char-shape breakpoints.
///
/// Text before the first breakpoint is unstyled. A run takes the style of
/// the breakpoint it starts at; `style_of` returning `None` leaves it
/// unstyled. Empty runs are dropped, so the run texts always concatenate to
/// the paragraph text.
pub fn slice_runs<F>(decoded: &DecodedText, breakpoints: &[(u32, u32)], style_of: F) -> Vec<Run>
where
    F: Fn(u32) -> Option<RunStyle>,
{
    let text = &decoded.text;
    let mut runs = Vec::with_capacity(breakpoints.len() + 1);
    let mut push = |start: usize, end: usize, style: Option<RunStyle>| {
        if start < end {
            runs.push(Run {
                text: text[start..end].to_string(),
                style,
            });
        }
    };

    let Some(&(first, _)) = breakpoints.first() else {
        push(0, text.len(), None);
        return runs;
    };

    let mut start = decoded.byte_offset(first);
    push(0, start, None);
    for (i, &(_, shape_id)) in breakpoints.iter().enumerate() {
        let end = breakpoints
            .get(i + 1)
            .map_or(text.len(), |&(pos, _)| decoded.byte_offset(pos))
            .max(start);
        push(start, end, style_of(shape_id));
        start = end;
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    fn style(shape_id: u32) -> Option<RunStyle> {
        (shape_id < 10).then(|| RunStyle {
            shape_id,
            font_name: None,
            size_pt: 10.0,
            bold: shape_id == 1,
            italic: false,
            underline: None,
            strikeout: false,
            outline: false,
            shadow: false,
            emboss: false,
            engrave: false,
            vertical_position: Default::default(),
            color: None,
            underline_color: None,
            shade_color: None,
            spacing: 0,
            ratio: 100,
        })
    }

    #[test]
    fn single_breakpoint_at_start_styles_everything() {
        let decoded = decode_units(&units("AB"));
        let runs = slice_runs(&decoded, &[(0, 1)], style);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "AB");
        assert_eq!(runs[0].style.as_ref().map(|s| s.shape_id), Some(1));
    }

    #[test]
    fn gap_before_first_breakpoint_is_unstyled() {
        let decoded = decode_units(&units("AB"));
        let runs = slice_runs(&decoded, &[(1, 2)], style);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "A");
        assert!(runs[0].style.is_none());
        assert_eq!(runs[1].text, "B");
        assert_eq!(runs[1].style.as_ref().map(|s| s.shape_id), Some(2));
    }

    #[test]
    fn unknown_shape_is_unstyled() {
        let decoded = decode_units(&units("xyz"));
        let runs = slice_runs(&decoded, &[(0, 0), (2, 99)], style);
        assert_eq!(runs.len(), 2);
        assert!(runs[0].style.is_some());
        assert!(runs[1].style.is_none());
        assert_eq!(runs[1].text, "z");
    }

    #[test]
    fn no_breakpoints() {
        let decoded = decode_units(&units("plain"));
        let runs = slice_runs(&decoded, &[], style);
        assert_eq!(runs.len(), 1);
        assert!(runs[0].style.is_none());
        assert!(slice_runs(&decode_units(&[]), &[], style).is_empty());
    }

    #[test]
    fn control_characters() {
        let mut u = units("a");
        u.push(ctrl_char::TAB);
        u.extend([0u16; 7]);
        u.push(ctrl_char::LINE_BREAK);
        u.push(ctrl_char::HYPHEN);
        u.push(ctrl_char::NBSPACE);
        u.push(ctrl_char::FIXED_WIDTH_SPACE);
        // extended control: 'tbl ' reference occupying 8 units
        u.extend([11u16, 0x6C62, 0x2074, 0, 0, 0, 0, 11]);
        u.extend(units("b"));
        u.push(ctrl_char::PARA_BREAK);
        let decoded = decode_units(&u);
        assert_eq!(decoded.text, "a\t\n-\u{A0} b");
    }

    #[test]
    fn breakpoints_count_code_units_not_chars() {
        // tab spans 8 units: "a" at 0, tab at 1..9, "b" at 9
        let mut u = units("a");
        u.push(ctrl_char::TAB);
        u.extend([0u16; 7]);
        u.extend(units("b"));
        let decoded = decode_units(&u);
        let runs = slice_runs(&decoded, &[(0, 0), (9, 1)], style);
        assert_eq!(runs.iter().map(|r| r.text.as_str()).collect::<Vec<_>>(), ["a\t", "b"]);
    }

    #[test]
    fn surrogate_pairs() {
        let decoded = decode_units(&units("가😀나"));
        assert_eq!(decoded.text, "가😀나");
        // 나 sits at unit 3
        let runs = slice_runs(&decoded, &[(0, 0), (3, 1)], style);
        assert_eq!(runs[1].text, "나");
        assert_eq!(decode_units(&[0xD800, 0x41]).text, "\u{FFFD}A");
    }

    #[test]
    fn runs_always_reconstruct_the_text() {
        let decoded = decode_units(&units("hello world"));
        for bps in [
            vec![(3, 0), (1, 1)],
            vec![(0, 0), (0, 1), (50, 2)],
            vec![(11, 0)],
        ] {
            let runs = slice_runs(&decoded, &bps, style);
            let joined: String = runs.iter().map(|r| r.text.as_str()).collect();
            assert_eq!(joined, decoded.text);
            assert!(runs.iter().all(|r| !r.text.is_empty()));
        }
    }
}

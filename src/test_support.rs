//! Fixture builders for tests: a minimal compound-file writer and helpers
//! for emitting HWP record streams.
//!
//! The writer produces just enough structure to exercise the reader: one
//! contiguous chain per stream, a mini stream for small streams, and DIFAT
//! sectors once the FAT outgrows the header.

use crate::hwp::consts::tag;
use crate::ole::consts::*;
use std::io::Write;

const MINI_SECTOR: usize = 64;
const CUTOFF: usize = 4096;

struct DirNode {
    name: String,
    kind: u8,
    parent: Option<usize>,
    data: Vec<u8>,
    start: u32,
    size: u64,
}

/// Builds compound files in memory.
pub struct CfbBuilder {
    v4: bool,
    streams: Vec<(String, Vec<u8>)>,
    cycle_in: Option<String>,
}

impl CfbBuilder {
    pub fn new() -> Self {
        Self {
            v4: false,
            streams: Vec::new(),
            cycle_in: None,
        }
    }

    /// Use version 4 (4096-byte sectors).
    pub fn version4(mut self) -> Self {
        self.v4 = true;
        self
    }

    /// Add a stream; `/` in the path creates storages.
    pub fn stream(mut self, path: &str, data: Vec<u8>) -> Self {
        self.streams.push((path.to_string(), data));
        self
    }

    /// Make the named regular-FAT stream's last sector point back at its first.
    pub fn corrupt_with_cycle(&mut self, path: &str) {
        self.cycle_in = Some(path.to_string());
    }

    pub fn build(&self) -> Vec<u8> {
        let ss = if self.v4 { SECTOR_SIZE_V4 } else { SECTOR_SIZE_V3 };
        let per_fat = ss / 4;

        // Directory nodes: root, storages, streams.
        let mut nodes = vec![DirNode {
            name: "Root Entry".to_string(),
            kind: STGTY_ROOT,
            parent: None,
            data: Vec::new(),
            start: ENDOFCHAIN,
            size: 0,
        }];
        for (path, data) in &self.streams {
            let parts: Vec<&str> = path.split('/').collect();
            let mut parent = 0usize;
            for (i, part) in parts.iter().enumerate() {
                let last = i == parts.len() - 1;
                let existing = nodes
                    .iter()
                    .position(|n| n.parent == Some(parent) && n.name == *part);
                parent = match existing {
                    Some(idx) if !last => idx,
                    _ => {
                        nodes.push(DirNode {
                            name: part.to_string(),
                            kind: if last { STGTY_STREAM } else { STGTY_STORAGE },
                            parent: Some(parent),
                            data: if last { data.clone() } else { Vec::new() },
                            start: ENDOFCHAIN,
                            size: if last { data.len() as u64 } else { 0 },
                        });
                        nodes.len() - 1
                    },
                };
            }
        }

        // Mini stream and mini FAT.
        let mut ministream = Vec::new();
        let mut minifat: Vec<u32> = Vec::new();
        for node in nodes.iter_mut() {
            if node.kind != STGTY_STREAM || node.data.is_empty() || node.data.len() >= CUTOFF {
                continue;
            }
            let first = minifat.len() as u32;
            let count = node.data.len().div_ceil(MINI_SECTOR);
            for i in 0..count {
                minifat.push(if i + 1 == count {
                    ENDOFCHAIN
                } else {
                    first + i as u32 + 1
                });
            }
            node.start = first;
            ministream.extend_from_slice(&node.data);
            ministream.resize(minifat.len() * MINI_SECTOR, 0);
        }

        // Regular content blocks: big streams, ministream, minifat, directory.
        let mut blocks: Vec<Vec<u8>> = Vec::new();
        let mut block_owner: Vec<Option<usize>> = Vec::new();
        for (idx, node) in nodes.iter().enumerate() {
            if node.kind == STGTY_STREAM && node.data.len() >= CUTOFF {
                blocks.push(node.data.clone());
                block_owner.push(Some(idx));
            }
        }
        let ministream_block = if ministream.is_empty() {
            None
        } else {
            blocks.push(ministream.clone());
            block_owner.push(Some(0));
            Some(blocks.len() - 1)
        };
        let minifat_block = if minifat.is_empty() {
            None
        } else {
            blocks.push(minifat.iter().flat_map(|v| v.to_le_bytes()).collect());
            block_owner.push(None);
            Some(blocks.len() - 1)
        };
        let dir_len = nodes.len() * DIRENTRY_SIZE;
        blocks.push(vec![0u8; dir_len]);
        block_owner.push(None);
        let dir_block = blocks.len() - 1;

        let block_sectors: Vec<usize> = blocks.iter().map(|b| b.len().div_ceil(ss)).collect();
        let content: usize = block_sectors.iter().sum();

        let mut n_fat = 1usize;
        let mut n_difat;
        loop {
            n_difat = n_fat.saturating_sub(HEADER_DIFAT_ENTRIES).div_ceil(per_fat - 1);
            if n_fat * per_fat >= content + n_fat + n_difat {
                break;
            }
            n_fat += 1;
        }

        // Assign block start sectors.
        let mut starts = Vec::with_capacity(blocks.len());
        let mut next = 0usize;
        for &count in &block_sectors {
            starts.push(if count == 0 { ENDOFCHAIN } else { next as u32 });
            next += count;
        }
        let fat_start = content;
        let difat_start = content + n_fat;
        let total = content + n_fat + n_difat;

        let mut fat = vec![FREESECT; n_fat * per_fat];
        for (b, &count) in block_sectors.iter().enumerate() {
            let start = starts[b] as usize;
            for i in 0..count {
                fat[start + i] = if i + 1 == count {
                    ENDOFCHAIN
                } else {
                    (start + i + 1) as u32
                };
            }
        }
        for i in 0..n_fat {
            fat[fat_start + i] = FATSECT;
        }
        for i in 0..n_difat {
            fat[difat_start + i] = DIFSECT;
        }

        // Record stream starts in directory nodes.
        for (b, owner) in block_owner.iter().enumerate() {
            match owner {
                Some(0) if Some(b) == ministream_block => {
                    nodes[0].start = starts[b];
                    nodes[0].size = ministream.len() as u64;
                },
                Some(idx) => nodes[*idx].start = starts[b],
                None => {},
            }
        }

        if let Some(path) = &self.cycle_in {
            let name = path.rsplit('/').next().unwrap_or(path);
            let idx = nodes
                .iter()
                .position(|n| n.name == name && n.kind == STGTY_STREAM)
                .expect("cycle target exists");
            let b = block_owner
                .iter()
                .position(|o| *o == Some(idx))
                .expect("cycle target must be a regular stream");
            let start = starts[b] as usize;
            fat[start + block_sectors[b] - 1] = start as u32;
        }

        // Directory entries with degenerate sibling trees (right links only).
        let children = |parent: usize| -> Vec<usize> {
            (0..nodes.len())
                .filter(|&i| nodes[i].parent == Some(parent))
                .collect()
        };
        let mut dir = Vec::with_capacity(dir_len);
        for (idx, node) in nodes.iter().enumerate() {
            let mut entry = [0u8; DIRENTRY_SIZE];
            let units: Vec<u16> = node.name.encode_utf16().collect();
            for (i, u) in units.iter().take(31).enumerate() {
                entry[i * 2..i * 2 + 2].copy_from_slice(&u.to_le_bytes());
            }
            let name_len = ((units.len().min(31) + 1) * 2) as u16;
            entry[64..66].copy_from_slice(&name_len.to_le_bytes());
            entry[66] = node.kind;
            entry[67] = 1;
            let right = node
                .parent
                .map(|p| {
                    let siblings = children(p);
                    let pos = siblings.iter().position(|&s| s == idx).unwrap_or(0);
                    siblings.get(pos + 1).map(|&s| s as u32).unwrap_or(NOSTREAM)
                })
                .unwrap_or(NOSTREAM);
            let child = if node.kind == STGTY_STREAM {
                NOSTREAM
            } else {
                children(idx).first().map(|&c| c as u32).unwrap_or(NOSTREAM)
            };
            entry[68..72].copy_from_slice(&NOSTREAM.to_le_bytes());
            entry[72..76].copy_from_slice(&right.to_le_bytes());
            entry[76..80].copy_from_slice(&child.to_le_bytes());
            entry[116..120].copy_from_slice(&node.start.to_le_bytes());
            entry[120..128].copy_from_slice(&node.size.to_le_bytes());
            dir.extend_from_slice(&entry);
        }
        blocks[dir_block] = dir;

        // Header.
        let mut header = vec![0u8; HEADER_SIZE];
        header[0..8].copy_from_slice(MAGIC);
        header[0x18..0x1A].copy_from_slice(&0x3Eu16.to_le_bytes());
        let (major, shift) = if self.v4 { (4u16, 12u16) } else { (3u16, 9u16) };
        header[0x1A..0x1C].copy_from_slice(&major.to_le_bytes());
        header[0x1C..0x1E].copy_from_slice(&0xFFFEu16.to_le_bytes());
        header[0x1E..0x20].copy_from_slice(&shift.to_le_bytes());
        header[0x20..0x22].copy_from_slice(&6u16.to_le_bytes());
        let dir_sectors = if self.v4 { block_sectors[dir_block] as u32 } else { 0 };
        header[0x28..0x2C].copy_from_slice(&dir_sectors.to_le_bytes());
        header[0x2C..0x30].copy_from_slice(&(n_fat as u32).to_le_bytes());
        header[0x30..0x34].copy_from_slice(&starts[dir_block].to_le_bytes());
        header[0x38..0x3C].copy_from_slice(&(CUTOFF as u32).to_le_bytes());
        let (minifat_start, minifat_count) = match minifat_block {
            Some(b) => (starts[b], block_sectors[b] as u32),
            None => (ENDOFCHAIN, 0),
        };
        header[0x3C..0x40].copy_from_slice(&minifat_start.to_le_bytes());
        header[0x40..0x44].copy_from_slice(&minifat_count.to_le_bytes());
        let first_difat = if n_difat > 0 {
            difat_start as u32
        } else {
            ENDOFCHAIN
        };
        header[0x44..0x48].copy_from_slice(&first_difat.to_le_bytes());
        header[0x48..0x4C].copy_from_slice(&(n_difat as u32).to_le_bytes());
        for i in 0..HEADER_DIFAT_ENTRIES {
            let value = if i < n_fat {
                (fat_start + i) as u32
            } else {
                FREESECT
            };
            header[0x4C + i * 4..0x50 + i * 4].copy_from_slice(&value.to_le_bytes());
        }
        header.resize(ss, 0);

        // Sectors.
        let mut out = header;
        out.reserve(total * ss);
        for block in &blocks {
            let mut padded = block.clone();
            padded.resize(block.len().div_ceil(ss) * ss, 0);
            out.extend_from_slice(&padded);
        }
        for chunk in fat.chunks(per_fat) {
            for v in chunk {
                out.extend_from_slice(&v.to_le_bytes());
            }
        }
        let overflow: Vec<u32> = (HEADER_DIFAT_ENTRIES..n_fat)
            .map(|i| (fat_start + i) as u32)
            .collect();
        for d in 0..n_difat {
            let mut sector = vec![FREESECT; per_fat];
            for (slot, id) in overflow
                .iter()
                .skip(d * (per_fat - 1))
                .take(per_fat - 1)
                .enumerate()
            {
                sector[slot] = *id;
            }
            sector[per_fat - 1] = if d + 1 == n_difat {
                ENDOFCHAIN
            } else {
                (difat_start + d + 1) as u32
            };
            for v in sector {
                out.extend_from_slice(&v.to_le_bytes());
            }
        }
        out
    }
}

/// Encode one record: header word (plus extended size when needed) and payload.
pub fn record(tag_id: u16, level: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 8);
    let size = payload.len();
    let size_field = if size >= 0xFFF { 0xFFF } else { size as u32 };
    let word = (tag_id as u32 & 0x3FF) | ((level as u32 & 0x3FF) << 10) | (size_field << 20);
    out.extend_from_slice(&word.to_le_bytes());
    if size_field == 0xFFF {
        out.extend_from_slice(&(size as u32).to_le_bytes());
    }
    out.extend_from_slice(payload);
    out
}

/// UTF-16LE bytes of a string.
pub fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

/// Raw-deflate compress, as HWP stores its streams.
pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut enc = flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
    enc.write_all(data).expect("in-memory write");
    enc.finish().expect("in-memory write")
}

/// 256-byte `FileHeader` stream for version 5.0.3.0 with the given flags.
pub fn file_header(properties: u32) -> Vec<u8> {
    let mut data = vec![0u8; 256];
    let sig = b"HWP Document File";
    data[..sig.len()].copy_from_slice(sig);
    data[32..36].copy_from_slice(&0x0500_0300u32.to_le_bytes());
    data[36..40].copy_from_slice(&properties.to_le_bytes());
    data
}

/// Section record stream builder.
#[derive(Default)]
pub struct SectionWriter {
    pub bytes: Vec<u8>,
}

impl SectionWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&mut self, tag_id: u16, level: u16, payload: &[u8]) -> &mut Self {
        self.bytes.extend(record(tag_id, level, payload));
        self
    }

    /// PARA_HEADER + PARA_TEXT (+ PARA_CHAR_SHAPE) at `level`.
    pub fn paragraph(
        &mut self,
        level: u16,
        text: &str,
        shapes: &[(u32, u32)],
        para_shape: u16,
    ) -> &mut Self {
        let units = text.encode_utf16().count() as u32 + 1;
        let mut header = vec![0u8; 22];
        header[0..4].copy_from_slice(&(units | 0x8000_0000).to_le_bytes());
        header[8..10].copy_from_slice(&para_shape.to_le_bytes());
        header[12..14].copy_from_slice(&(shapes.len() as u16).to_le_bytes());
        self.raw(tag::PARA_HEADER, level, &header);
        if !text.is_empty() {
            let mut body = utf16(text);
            body.extend_from_slice(&0x000Du16.to_le_bytes());
            self.raw(tag::PARA_TEXT, level + 1, &body);
        }
        if !shapes.is_empty() {
            let body: Vec<u8> = shapes
                .iter()
                .flat_map(|(pos, id)| {
                    let mut b = pos.to_le_bytes().to_vec();
                    b.extend_from_slice(&id.to_le_bytes());
                    b
                })
                .collect();
            self.raw(tag::PARA_CHAR_SHAPE, level + 1, &body);
        }
        self
    }

    /// CTRL_HEADER for a table with its TABLE record.
    pub fn table(&mut self, level: u16, rows: u16, cols: u16) -> &mut Self {
        let mut ctrl = vec![0u8; 44];
        ctrl[0..4].copy_from_slice(&crate::hwp::consts::ctrl_id::TABLE.to_le_bytes());
        ctrl[16..20].copy_from_slice(&40_000u32.to_le_bytes());
        ctrl[20..24].copy_from_slice(&(2_000u32 * rows as u32).to_le_bytes());
        self.raw(tag::CTRL_HEADER, level, &ctrl);
        let mut table = vec![0u8; 18 + rows as usize * 2 + 2];
        table[4..6].copy_from_slice(&rows.to_le_bytes());
        table[6..8].copy_from_slice(&cols.to_le_bytes());
        self.raw(tag::TABLE, level + 1, &table)
    }

    /// LIST_HEADER describing a table cell.
    pub fn cell(
        &mut self,
        level: u16,
        row: u16,
        col: u16,
        span: (u16, u16),
        border_fill: u16,
    ) -> &mut Self {
        let mut body = vec![0u8; 34];
        body[0..2].copy_from_slice(&1u16.to_le_bytes());
        body[8..10].copy_from_slice(&col.to_le_bytes());
        body[10..12].copy_from_slice(&row.to_le_bytes());
        body[12..14].copy_from_slice(&span.0.to_le_bytes());
        body[14..16].copy_from_slice(&span.1.to_le_bytes());
        body[16..20].copy_from_slice(&10_000u32.to_le_bytes());
        body[20..24].copy_from_slice(&2_000u32.to_le_bytes());
        body[32..34].copy_from_slice(&border_fill.to_le_bytes());
        self.raw(tag::LIST_HEADER, level, &body)
    }

    pub fn ctrl(&mut self, level: u16, id: u32) -> &mut Self {
        let mut ctrl = vec![0u8; 44];
        ctrl[0..4].copy_from_slice(&id.to_le_bytes());
        ctrl[8..12].copy_from_slice(&100i32.to_le_bytes());
        ctrl[12..16].copy_from_slice(&200i32.to_le_bytes());
        ctrl[16..20].copy_from_slice(&3_000u32.to_le_bytes());
        ctrl[20..24].copy_from_slice(&4_000u32.to_le_bytes());
        self.raw(tag::CTRL_HEADER, level, &ctrl)
    }

    pub fn picture(&mut self, level: u16, bin_id: u16) -> &mut Self {
        let mut body = vec![0u8; 80];
        body[71..73].copy_from_slice(&bin_id.to_le_bytes());
        self.raw(tag::SHAPE_COMPONENT_PICTURE, level, &body)
    }
}

/// Names used by [`hwp_document`] for section streams.
pub fn section_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("BodyText/Section{}", i)).collect()
}

/// Assemble a complete compressed HWP container.
pub fn hwp_document(
    properties: u32,
    doc_info: &[u8],
    sections: &[Vec<u8>],
    bin_data: &[(&str, Vec<u8>)],
) -> Vec<u8> {
    let compressed = properties & 1 != 0;
    let pack = |d: &[u8]| if compressed { deflate(d) } else { d.to_vec() };
    let mut builder = CfbBuilder::new()
        .stream("FileHeader", file_header(properties))
        .stream("DocInfo", pack(doc_info));
    for (name, data) in section_names(sections.len()).iter().zip(sections) {
        builder = builder.stream(name, pack(data));
    }
    for (name, data) in bin_data {
        builder = builder.stream(&format!("BinData/{}", name), pack(data));
    }
    builder.build()
}

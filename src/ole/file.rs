use super::consts::*;
use crate::common::binary::{BinaryError, read_u32_le};
use fixedbitset::FixedBitSet;
use std::io::{self, Read};
use zerocopy::{FromBytes, LE, U16, U32, U64};
use zerocopy_derive::FromBytes as DeriveFromBytes;

/// Raw compound-file header (the first 512 bytes of the file).
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
struct RawHeader {
    signature: [u8; 8],
    clsid: [u8; 16],
    minor_version: U16<LE>,
    /// 0x1A
    major_version: U16<LE>,
    byte_order: U16<LE>,
    /// 0x1E
    sector_shift: U16<LE>,
    /// 0x20
    mini_sector_shift: U16<LE>,
    reserved: [u8; 6],
    num_dir_sectors: U32<LE>,
    /// 0x2C
    num_fat_sectors: U32<LE>,
    /// 0x30
    first_dir_sector: U32<LE>,
    transaction_signature: U32<LE>,
    /// 0x38
    mini_stream_cutoff: U32<LE>,
    /// 0x3C
    first_minifat_sector: U32<LE>,
    num_minifat_sectors: U32<LE>,
    /// 0x44
    first_difat_sector: U32<LE>,
    /// 0x48
    num_difat_sectors: U32<LE>,
    /// 0x4C
    difat: [U32<LE>; HEADER_DIFAT_ENTRIES],
}

/// Raw directory entry structure (128 bytes)
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
struct RawDirectoryEntry {
    /// Entry name in UTF-16LE (64 bytes, null-padded)
    name: [u8; 64],
    /// Length of name in bytes (including null terminator)
    name_len: U16<LE>,
    /// Entry type (1 = storage, 2 = stream, 5 = root)
    entry_type: u8,
    node_color: u8,
    sid_left: U32<LE>,
    sid_right: U32<LE>,
    sid_child: U32<LE>,
    clsid: [u8; 16],
    state_bits: U32<LE>,
    creation_time: U64<LE>,
    modified_time: U64<LE>,
    /// Offset 116
    start_sector: U32<LE>,
    /// Offset 120
    stream_size: U64<LE>,
}

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Storage,
    Stream,
    Root,
    Unused,
}

impl From<u8> for EntryKind {
    fn from(value: u8) -> Self {
        match value {
            STGTY_STORAGE => EntryKind::Storage,
            STGTY_STREAM => EntryKind::Stream,
            STGTY_ROOT => EntryKind::Root,
            _ => EntryKind::Unused,
        }
    }
}

/// A directory entry (stream or storage) with its resolved path.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Storage ID (index in directory)
    pub sid: u32,
    /// Entry name (UTF-16 decoded)
    pub name: String,
    pub kind: EntryKind,
    pub sid_left: u32,
    pub sid_right: u32,
    pub sid_child: u32,
    /// First sector of the stream
    pub start_sector: u32,
    /// Size of the stream in bytes
    pub size: u64,
    /// Names of the storages above this entry, outermost first, ending with
    /// the entry's own name. Empty for the root.
    pub path: Vec<String>,
}

impl DirectoryEntry {
    /// Path joined with `/`, e.g. `BodyText/Section0`.
    pub fn path_string(&self) -> String {
        self.path.join("/")
    }

    #[inline]
    pub fn is_stream(&self) -> bool {
        self.kind == EntryKind::Stream
    }
}

/// Error types for compound-file parsing
#[derive(Debug)]
pub enum OleError {
    Io(io::Error),
    NotOleFile,
    UnsupportedVersion(u16),
    InvalidFormat(String),
    InvalidData(String),
    CorruptedFile(String),
    StreamNotFound(String),
}

impl From<io::Error> for OleError {
    fn from(err: io::Error) -> Self {
        OleError::Io(err)
    }
}

impl From<BinaryError> for OleError {
    fn from(err: BinaryError) -> Self {
        OleError::InvalidData(err.to_string())
    }
}

impl std::fmt::Display for OleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OleError::Io(e) => write!(f, "IO error: {}", e),
            OleError::NotOleFile => write!(f, "Not an OLE file"),
            OleError::UnsupportedVersion(v) => write!(f, "Unsupported major version {}", v),
            OleError::InvalidFormat(s) => write!(f, "Invalid format: {}", s),
            OleError::InvalidData(s) => write!(f, "Invalid data: {}", s),
            OleError::CorruptedFile(s) => write!(f, "Corrupted file: {}", s),
            OleError::StreamNotFound(s) => write!(f, "Stream not found: {}", s),
        }
    }
}

impl std::error::Error for OleError {}

/// Compound-file reader over an in-memory buffer.
///
/// All tables are built eagerly in [`OleFile::from_bytes`]; afterwards the
/// reader is immutable and stream reads only borrow it.
#[derive(Debug)]
pub struct OleFile {
    data: Vec<u8>,
    major_version: u16,
    /// Sector size (512 or 4096 bytes)
    sector_size: usize,
    mini_sector_size: usize,
    mini_stream_cutoff: u32,
    /// File Allocation Table - maps sector to next sector in chain
    fat: Vec<u32>,
    minifat: Vec<u32>,
    /// All directory entries indexed by SID; unused slots are `None`
    dir_entries: Vec<Option<DirectoryEntry>>,
    ministream: Vec<u8>,
    /// Hard cap on hops for any single chain walk
    max_chain_hops: usize,
}

impl OleFile {
    /// Read the whole reader into memory and parse it.
    pub fn open<R: Read>(mut reader: R) -> Result<Self, OleError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Parse a compound file held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, OleError> {
        Self::from_bytes_with_limit(data, None)
    }

    /// Parse with an explicit cap on chain length.
    ///
    /// Without a cap, a chain may visit at most as many sectors as the file
    /// holds (plus one), which is the longest any acyclic chain can be.
    pub fn from_bytes_with_limit(
        data: Vec<u8>,
        max_chain_hops: Option<usize>,
    ) -> Result<Self, OleError> {
        if data.len() < 8 || &data[0..8] != MAGIC {
            return Err(OleError::NotOleFile);
        }
        if data.len() < HEADER_SIZE {
            return Err(OleError::CorruptedFile("Header truncated".to_string()));
        }

        let header = RawHeader::read_from_bytes(&data[..HEADER_SIZE])
            .map_err(|_| OleError::InvalidFormat("Failed to parse header".to_string()))?;

        let major_version = header.major_version.get();
        if major_version != MAJOR_VERSION_3 && major_version != MAJOR_VERSION_4 {
            return Err(OleError::UnsupportedVersion(major_version));
        }
        if header.byte_order.get() != 0xFFFE {
            log::debug!(
                "compound file byte-order mark is {:#06x}, continuing",
                header.byte_order.get()
            );
        }

        // The version only implies a default; the shift fields are authoritative.
        let sector_shift = header.sector_shift.get();
        let sector_size = if sector_shift == 0 {
            if major_version == MAJOR_VERSION_4 {
                SECTOR_SIZE_V4
            } else {
                SECTOR_SIZE_V3
            }
        } else if (7..=16).contains(&sector_shift) {
            1usize << sector_shift
        } else {
            return Err(OleError::CorruptedFile(format!(
                "Sector shift {} out of range",
                sector_shift
            )));
        };
        let mini_sector_shift = header.mini_sector_shift.get();
        if mini_sector_shift > sector_shift.max(9) {
            return Err(OleError::CorruptedFile(format!(
                "Mini sector shift {} out of range",
                mini_sector_shift
            )));
        }
        let mini_sector_size = 1usize << mini_sector_shift;
        let mini_stream_cutoff = match header.mini_stream_cutoff.get() {
            0 => DEFAULT_MINI_STREAM_CUTOFF,
            n => n,
        };

        let sector_count = data.len().div_ceil(sector_size).saturating_sub(1);
        let max_chain_hops = max_chain_hops.unwrap_or(sector_count + 1);

        log::debug!(
            "compound file v{}: sector={} mini={} cutoff={} sectors={}",
            major_version,
            sector_size,
            mini_sector_size,
            mini_stream_cutoff,
            sector_count
        );

        let mut ole = OleFile {
            data,
            major_version,
            sector_size,
            mini_sector_size,
            mini_stream_cutoff,
            fat: Vec::new(),
            minifat: Vec::new(),
            dir_entries: Vec::new(),
            ministream: Vec::new(),
            max_chain_hops,
        };

        ole.load_fat(&header)?;
        ole.load_directory(header.first_dir_sector.get())?;
        ole.load_minifat(header.first_minifat_sector.get())?;
        ole.load_ministream()?;

        Ok(ole)
    }

    pub fn major_version(&self) -> u16 {
        self.major_version
    }

    pub fn sector_size(&self) -> usize {
        self.sector_size
    }

    pub fn mini_sector_size(&self) -> usize {
        self.mini_sector_size
    }

    pub fn mini_stream_cutoff(&self) -> u32 {
        self.mini_stream_cutoff
    }

    /// Load the File Allocation Table (FAT)
    ///
    /// The first 109 FAT sector ids live in the header; any further ids are
    /// stored in a chain of DIFAT sectors, each holding `sector_size / 4 - 1`
    /// ids followed by the next DIFAT sector id.
    fn load_fat(&mut self, header: &RawHeader) -> Result<(), OleError> {
        let declared = header.num_fat_sectors.get() as usize;
        let mut fat_sectors: Vec<u32> = header
            .difat
            .iter()
            .map(|v| v.get())
            .take_while(|&s| s != FREESECT && s != ENDOFCHAIN)
            .collect();

        let num_difat_sectors = header.num_difat_sectors.get() as usize;
        if num_difat_sectors > 0 {
            let entries_per_sector = self.sector_size / 4 - 1;
            let mut difat_sector = header.first_difat_sector.get();
            let mut hops = 0usize;

            while difat_sector != ENDOFCHAIN && difat_sector != FREESECT && hops < num_difat_sectors
            {
                hops += 1;
                if hops > self.max_chain_hops {
                    return Err(OleError::CorruptedFile(
                        "DIFAT chain exceeds hop limit".to_string(),
                    ));
                }

                let sector_data = self.sector(difat_sector)?;
                for i in 0..entries_per_sector {
                    let sector = read_u32_le(sector_data, i * 4)?;
                    if sector == FREESECT || sector == ENDOFCHAIN {
                        continue;
                    }
                    fat_sectors.push(sector);
                }
                difat_sector = read_u32_le(sector_data, entries_per_sector * 4)?;
            }
        }

        if declared > 0 && fat_sectors.len() > declared {
            fat_sectors.truncate(declared);
        }

        let entries_per_sector = self.sector_size / 4;
        let mut fat = Vec::with_capacity(fat_sectors.len() * entries_per_sector);
        for &sector_id in &fat_sectors {
            let sector_data = self.sector(sector_id)?;
            fat.extend(
                sector_data
                    .chunks_exact(4)
                    .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]])),
            );
        }
        self.fat = fat;
        Ok(())
    }

    /// Load the Mini FAT (for small streams). Its own chain lives in the FAT.
    fn load_minifat(&mut self, first_minifat_sector: u32) -> Result<(), OleError> {
        if first_minifat_sector == ENDOFCHAIN || first_minifat_sector == FREESECT {
            return Ok(());
        }
        let minifat_data = self.read_fat_chain(first_minifat_sector)?;
        self.minifat = minifat_data
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Ok(())
    }

    /// The mini stream is the root entry's content, read through the FAT.
    fn load_ministream(&mut self) -> Result<(), OleError> {
        let Some(root) = self.dir_entries.first().and_then(|e| e.as_ref()) else {
            return Ok(());
        };
        if root.start_sector == ENDOFCHAIN || root.start_sector == FREESECT {
            return Ok(());
        }
        let (start, size) = (root.start_sector, root.size);
        let mut stream = self.read_fat_chain(start)?;
        stream.truncate(size as usize);
        self.ministream = stream;
        Ok(())
    }

    /// Load directory entries and resolve their paths.
    fn load_directory(&mut self, first_dir_sector: u32) -> Result<(), OleError> {
        let dir_data = self.read_fat_chain(first_dir_sector)?;
        let num_entries = dir_data.len() / DIRENTRY_SIZE;
        let mut entries = Vec::with_capacity(num_entries);

        for sid in 0..num_entries {
            let offset = sid * DIRENTRY_SIZE;
            let entry = self.parse_directory_entry(
                &dir_data[offset..offset + DIRENTRY_SIZE],
                sid as u32,
            )?;
            entries.push(entry.filter(|e| e.kind != EntryKind::Unused));
        }
        self.dir_entries = entries;

        if let Some(Some(root)) = self.dir_entries.first()
            && root.kind == EntryKind::Root
        {
            let child = root.sid_child;
            let mut visited = FixedBitSet::with_capacity(self.dir_entries.len());
            visited.insert(0);
            self.assign_paths(child, &[], &mut visited)?;
        } else {
            return Err(OleError::CorruptedFile(
                "Directory has no root entry".to_string(),
            ));
        }

        Ok(())
    }

    /// Parse a single directory entry from 128 bytes
    fn parse_directory_entry(
        &self,
        data: &[u8],
        sid: u32,
    ) -> Result<Option<DirectoryEntry>, OleError> {
        let raw = RawDirectoryEntry::read_from_bytes(data)
            .map_err(|_| OleError::InvalidFormat("Failed to parse directory entry".to_string()))?;

        if raw.entry_type == STGTY_EMPTY {
            return Ok(None);
        }

        let name_len = (raw.name_len.get() as usize).min(64);
        let name = crate::common::binary::parse_utf16le_string(&raw.name[..name_len]);

        // 512-byte-sector files only define the low 32 bits of the size
        let size = if self.sector_size == SECTOR_SIZE_V3 {
            raw.stream_size.get() & 0xFFFF_FFFF
        } else {
            raw.stream_size.get()
        };

        Ok(Some(DirectoryEntry {
            sid,
            name,
            kind: EntryKind::from(raw.entry_type),
            sid_left: raw.sid_left.get(),
            sid_right: raw.sid_right.get(),
            sid_child: raw.sid_child.get(),
            start_sector: raw.start_sector.get(),
            size,
            path: Vec::new(),
        }))
    }

    /// Walk a sibling tree, giving every entry its path.
    fn assign_paths(
        &mut self,
        sid: u32,
        parent: &[String],
        visited: &mut FixedBitSet,
    ) -> Result<(), OleError> {
        if sid == NOSTREAM {
            return Ok(());
        }
        let idx = sid as usize;
        if idx >= self.dir_entries.len() {
            return Err(OleError::CorruptedFile(
                "Invalid directory entry index".to_string(),
            ));
        }
        if visited.put(idx) {
            return Err(OleError::CorruptedFile(
                "Directory tree contains a cycle".to_string(),
            ));
        }
        let Some(entry) = self.dir_entries[idx].as_mut() else {
            return Ok(());
        };

        let mut path = parent.to_vec();
        path.push(entry.name.clone());
        entry.path = path.clone();
        let (left, right, child, kind) =
            (entry.sid_left, entry.sid_right, entry.sid_child, entry.kind);

        self.assign_paths(left, parent, visited)?;
        self.assign_paths(right, parent, visited)?;
        if kind == EntryKind::Storage {
            self.assign_paths(child, &path, visited)?;
        }
        Ok(())
    }

    /// Borrow one sector. The final sector may be short if the file is.
    fn sector(&self, sector_id: u32) -> Result<&[u8], OleError> {
        if sector_id > MAXREGSECT {
            return Err(OleError::CorruptedFile(format!(
                "Special sector id {:#x} used as data",
                sector_id
            )));
        }
        let start = (sector_id as usize + 1) * self.sector_size;
        if start >= self.data.len() {
            return Err(OleError::CorruptedFile(format!(
                "Sector {} beyond end of file",
                sector_id
            )));
        }
        let end = (start + self.sector_size).min(self.data.len());
        Ok(&self.data[start..end])
    }

    /// Read a stream by following the FAT chain
    fn read_fat_chain(&self, start_sector: u32) -> Result<Vec<u8>, OleError> {
        let mut data = Vec::new();
        let mut sector = start_sector;
        let mut hops = 0usize;

        while sector != ENDOFCHAIN {
            hops += 1;
            if hops > self.max_chain_hops {
                return Err(OleError::CorruptedFile(format!(
                    "Sector chain from {} exceeds {} hops",
                    start_sector, self.max_chain_hops
                )));
            }
            if sector as usize >= self.fat.len() {
                return Err(OleError::CorruptedFile(format!(
                    "Invalid sector index {} in FAT",
                    sector
                )));
            }
            data.extend_from_slice(self.sector(sector)?);
            sector = self.fat[sector as usize];
        }

        Ok(data)
    }

    /// Read a stream by following the MiniFAT chain
    fn read_minifat_chain(&self, start_sector: u32, size: u64) -> Result<Vec<u8>, OleError> {
        let mut data = Vec::with_capacity(size as usize);
        let mut sector = start_sector;
        let mut hops = 0usize;
        // A mini chain cannot be longer than the mini FAT itself.
        let limit = self.minifat.len() + 1;

        while sector != ENDOFCHAIN {
            hops += 1;
            if hops > limit {
                return Err(OleError::CorruptedFile(format!(
                    "Mini sector chain from {} exceeds {} hops",
                    start_sector, limit
                )));
            }
            if sector as usize >= self.minifat.len() {
                return Err(OleError::CorruptedFile(format!(
                    "Invalid sector index {} in MiniFAT",
                    sector
                )));
            }

            let position = sector as usize * self.mini_sector_size;
            if position + self.mini_sector_size > self.ministream.len() {
                return Err(OleError::CorruptedFile(
                    "Mini sector out of bounds".to_string(),
                ));
            }
            data.extend_from_slice(&self.ministream[position..position + self.mini_sector_size]);
            sector = self.minifat[sector as usize];
        }

        data.truncate(size as usize);
        Ok(data)
    }

    /// Full content of a stream entry, from the mini stream when its size is
    /// below the cutoff and from the regular chain otherwise.
    pub fn read_entry_data(&self, entry: &DirectoryEntry) -> Result<Vec<u8>, OleError> {
        if entry.kind != EntryKind::Stream {
            return Err(OleError::InvalidFormat(format!(
                "'{}' is not a stream",
                entry.name
            )));
        }
        if entry.size == 0 {
            return Ok(Vec::new());
        }
        if entry.size < self.mini_stream_cutoff as u64 {
            self.read_minifat_chain(entry.start_sector, entry.size)
        } else {
            let mut data = self.read_fat_chain(entry.start_sector)?;
            data.truncate(entry.size as usize);
            Ok(data)
        }
    }

    /// All used directory entries, root first, in directory order.
    pub fn list_entries(&self) -> Vec<DirectoryEntry> {
        self.dir_entries.iter().flatten().cloned().collect()
    }

    /// Paths of all streams reachable from the root.
    pub fn list_streams(&self) -> Vec<Vec<String>> {
        self.dir_entries
            .iter()
            .flatten()
            .filter(|e| e.is_stream() && !e.path.is_empty())
            .map(|e| e.path.clone())
            .collect()
    }

    /// Find an entry by exact (case-sensitive) name.
    pub fn find_by_name(&self, name: &str) -> Option<&DirectoryEntry> {
        self.dir_entries
            .iter()
            .flatten()
            .find(|e| e.name == name && e.kind != EntryKind::Root)
    }

    /// Find an entry by its full path from the root.
    pub fn find_entry(&self, path: &[&str]) -> Option<&DirectoryEntry> {
        if path.is_empty() {
            return self.dir_entries.first().and_then(|e| e.as_ref());
        }
        self.dir_entries.iter().flatten().find(|e| {
            e.path.len() == path.len() && e.path.iter().zip(path).all(|(a, b)| a == b)
        })
    }

    /// Read a stream by its exact name.
    pub fn read_entry(&self, name: &str) -> Result<Vec<u8>, OleError> {
        let entry = self
            .find_by_name(name)
            .ok_or_else(|| OleError::StreamNotFound(name.to_string()))?;
        self.read_entry_data(entry)
    }

    /// Read a stream by path components.
    pub fn open_stream(&self, path: &[&str]) -> Result<Vec<u8>, OleError> {
        let entry = self
            .find_entry(path)
            .ok_or_else(|| OleError::StreamNotFound(path.join("/")))?;
        self.read_entry_data(entry)
    }

    /// Read a stream by a `/`-separated path such as `BodyText/Section0`.
    ///
    /// The full path is tried first; when it does not resolve, the last
    /// segment alone is matched against every directory name.
    pub fn read_path(&self, path: &str) -> Result<Vec<u8>, OleError> {
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        if let Some(entry) = self.find_entry(&parts)
            && entry.is_stream()
        {
            return self.read_entry_data(entry);
        }
        match parts.last() {
            Some(last) => self.read_entry(last),
            None => Err(OleError::StreamNotFound(path.to_string())),
        }
    }

    /// Check if a stream or storage exists at `path`.
    pub fn exists(&self, path: &[&str]) -> bool {
        self.find_entry(path).is_some()
    }

    /// Children of the storage at `path` (empty path = root).
    pub fn list_directory_entries(&self, path: &[&str]) -> Result<Vec<&DirectoryEntry>, OleError> {
        let parent = self
            .find_entry(path)
            .ok_or_else(|| OleError::StreamNotFound(path.join("/")))?;
        if parent.kind != EntryKind::Storage && parent.kind != EntryKind::Root {
            return Err(OleError::InvalidFormat("Not a directory".to_string()));
        }
        let depth = path.len() + 1;
        Ok(self
            .dir_entries
            .iter()
            .flatten()
            .filter(|e| {
                e.path.len() == depth && e.path.iter().zip(path).all(|(a, b)| a == b)
            })
            .collect())
    }
}

/// Check if a buffer starts with the compound-file signature
pub fn is_ole_file(data: &[u8]) -> bool {
    data.len() >= 8 && &data[0..8] == MAGIC
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CfbBuilder;
    use proptest::prelude::*;

    #[test]
    fn rejects_bad_signature() {
        let mut data = vec![0u8; 1024];
        data[0..8].copy_from_slice(b"NOTANOLE");
        assert!(matches!(
            OleFile::from_bytes(data),
            Err(OleError::NotOleFile)
        ));
        assert!(matches!(
            OleFile::from_bytes(vec![0xD0, 0xCF]),
            Err(OleError::NotOleFile)
        ));
    }

    #[test]
    fn rejects_unknown_major_version() {
        let mut data = CfbBuilder::new().stream("A", b"x".to_vec()).build();
        data[0x1A] = 5;
        assert!(matches!(
            OleFile::from_bytes(data),
            Err(OleError::UnsupportedVersion(5))
        ));
    }

    #[test]
    fn reads_small_stream_from_ministream() {
        let data = CfbBuilder::new()
            .stream("FileHeader", b"hello mini stream".to_vec())
            .build();
        let ole = OleFile::from_bytes(data).unwrap();
        assert_eq!(ole.read_entry("FileHeader").unwrap(), b"hello mini stream");
    }

    #[test]
    fn reads_large_stream_across_sectors() {
        let payload: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        let data = CfbBuilder::new().stream("Big", payload.clone()).build();
        let ole = OleFile::from_bytes(data).unwrap();
        assert_eq!(ole.read_entry("Big").unwrap(), payload);
    }

    #[test]
    fn name_lookup_is_case_sensitive() {
        let data = CfbBuilder::new().stream("DocInfo", b"abc".to_vec()).build();
        let ole = OleFile::from_bytes(data).unwrap();
        assert!(ole.read_entry("DocInfo").is_ok());
        assert!(matches!(
            ole.read_entry("docinfo"),
            Err(OleError::StreamNotFound(_))
        ));
    }

    #[test]
    fn resolves_nested_paths() {
        let data = CfbBuilder::new()
            .stream("BodyText/Section0", b"first".to_vec())
            .stream("BodyText/Section1", b"second".to_vec())
            .stream("BinData/BIN0001.png", vec![0x89, 0x50])
            .build();
        let ole = OleFile::from_bytes(data).unwrap();

        assert_eq!(ole.read_path("BodyText/Section1").unwrap(), b"second");
        assert_eq!(ole.open_stream(&["BodyText", "Section0"]).unwrap(), b"first");
        assert_eq!(ole.read_path("Section0").unwrap(), b"first");

        let children = ole.list_directory_entries(&["BinData"]).unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].path_string(), "BinData/BIN0001.png");

        let mut streams = ole.list_streams();
        streams.sort();
        assert_eq!(streams.len(), 3);
        assert_eq!(streams[0], vec!["BinData", "BIN0001.png"]);
    }

    #[test]
    fn honours_sector_shift_over_version() {
        let payload = vec![7u8; 9000];
        let data = CfbBuilder::new()
            .version4()
            .stream("Big", payload.clone())
            .build();
        let ole = OleFile::from_bytes(data).unwrap();
        assert_eq!(ole.sector_size(), 4096);
        assert_eq!(ole.read_entry("Big").unwrap(), payload);
    }

    #[test]
    fn follows_difat_extension_chain() {
        // 512-byte sectors hold 128 FAT entries; 14_000 sectors need > 109
        // FAT sectors, forcing at least one DIFAT sector.
        let payload: Vec<u8> = (0..14_000 * 512u32).map(|i| (i / 512) as u8).collect();
        let data = CfbBuilder::new().stream("Huge", payload.clone()).build();
        let ole = OleFile::from_bytes(data.clone()).unwrap();
        assert!(u32::from_le_bytes(data[0x48..0x4C].try_into().unwrap()) > 0);
        assert_eq!(ole.read_entry("Huge").unwrap(), payload);
    }

    #[test]
    fn cyclic_fat_chain_is_reported_as_corruption() {
        let payload = vec![1u8; 4096 * 2];
        let mut builder = CfbBuilder::new().stream("Big", payload);
        builder.corrupt_with_cycle("Big");
        let data = builder.build();
        let ole = OleFile::from_bytes(data).unwrap();
        assert!(matches!(
            ole.read_entry("Big"),
            Err(OleError::CorruptedFile(_))
        ));
    }

    #[test]
    fn explicit_hop_limit_is_enforced() {
        let payload = vec![3u8; 4096 * 3];
        let data = CfbBuilder::new().stream("Big", payload).build();
        let ole = OleFile::from_bytes_with_limit(data, Some(8)).unwrap();
        assert!(matches!(
            ole.read_entry("Big"),
            Err(OleError::CorruptedFile(_))
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn stream_split_over_k_sectors_round_trips(
            k in 1usize..24,
            tail in 0usize..512,
            seed in any::<u8>(),
            v4 in any::<bool>(),
        ) {
            let sector = if v4 { 4096 } else { 512 };
            // Stay at or above the cutoff so the regular FAT is used.
            let len = (k * sector + tail).max(4096);
            let payload: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_mul(31) ^ seed).collect();
            let mut builder = CfbBuilder::new();
            if v4 {
                builder = builder.version4();
            }
            let data = builder.stream("S", payload.clone()).build();
            let ole = OleFile::from_bytes(data).unwrap();
            prop_assert_eq!(ole.read_entry("S").unwrap(), payload);
        }

        #[test]
        fn mini_streams_round_trip(len in 1usize..4096, seed in any::<u8>()) {
            let payload: Vec<u8> = (0..len).map(|i| (i as u8) ^ seed).collect();
            let data = CfbBuilder::new().stream("m", payload.clone()).build();
            let ole = OleFile::from_bytes(data).unwrap();
            prop_assert_eq!(ole.read_entry("m").unwrap(), payload);
        }
    }
}

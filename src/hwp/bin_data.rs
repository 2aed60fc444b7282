//! Registry of embedded binary streams under the `BinData` storage.

use super::decompress::decompress;
use super::docinfo::DocInfo;
use crate::document::{BinaryAsset, mime_type_for};
use crate::ole::OleFile;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::BTreeMap;

/// Storage holding the embedded streams.
pub const BIN_DATA_STORAGE: &str = "BinData";

/// Registry key for a stream id: `BIN` plus four upper-case hex digits.
pub fn asset_key(id: u16) -> String {
    format!("BIN{:04X}", id)
}

/// Split `BIN000A.png` into (`BIN000A`, 10, `png`).
pub fn parse_stream_name(name: &str) -> Option<(&str, u16, String)> {
    let (stem, extension) = name.rsplit_once('.').unwrap_or((name, ""));
    let digits = stem.strip_prefix("BIN")?;
    if digits.is_empty() {
        return None;
    }
    let id = u16::from_str_radix(digits, 16).ok()?;
    Some((stem, id, extension.to_ascii_lowercase()))
}

/// Stream id an image's bin-data reference points at.
///
/// Pictures refer to the 1-based BIN_DATA record; that record names the
/// stream id. Without a matching record the reference is taken as the
/// stream id directly.
pub fn resolve_bin_id(doc_info: &DocInfo, reference: u16) -> u16 {
    reference
        .checked_sub(1)
        .and_then(|i| doc_info.bin_data.get(i as usize))
        .and_then(|item| item.bin_id())
        .unwrap_or(reference)
}

/// Read and decompress every `BinData/*` stream.
///
/// Streams whose names do not follow the `BINxxxx.ext` pattern, or that
/// fail to read, are skipped with a warning.
pub fn collect_assets(
    ole: &OleFile,
    doc_info: &DocInfo,
    document_compressed: bool,
    include_base64: bool,
) -> BTreeMap<String, BinaryAsset> {
    let mut assets = BTreeMap::new();
    let Ok(entries) = ole.list_directory_entries(&[BIN_DATA_STORAGE]) else {
        return assets;
    };

    for entry in entries.into_iter().filter(|e| e.is_stream()) {
        let Some((stem, id, extension)) = parse_stream_name(&entry.name) else {
            log::warn!("ignoring unexpected BinData stream '{}'", entry.name);
            continue;
        };
        let raw = match ole.read_entry_data(entry) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("cannot read {}: {}", entry.path_string(), e);
                continue;
            },
        };

        let compressed = doc_info
            .bin_data
            .iter()
            .find(|item| item.bin_id() == Some(id))
            .map_or(document_compressed, |item| item.is_compressed(document_compressed));
        let data = decompress(&raw, compressed).into_owned();
        log::debug!("asset {}: {} bytes ({} stored)", entry.name, data.len(), raw.len());

        let base64 = include_base64.then(|| STANDARD.encode(&data));
        assets.insert(
            stem.to_string(),
            BinaryAsset {
                id,
                name: entry.name.clone(),
                mime_type: mime_type_for(&extension),
                extension,
                data,
                base64,
            },
        );
    }
    assets
}

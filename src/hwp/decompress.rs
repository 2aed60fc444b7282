//! Stream decompression.
//!
//! HWP stores compressed streams as raw deflate without a zlib wrapper, but
//! some writers emit zlib. Data that decodes as neither is passed through.

use flate2::read::{DeflateDecoder, ZlibDecoder};
use std::borrow::Cow;
use std::io::Read;

/// Decompress `data` when `compressed` is set.
///
/// Never fails: raw deflate is tried first, then zlib, and the input bytes
/// are returned unchanged when both fail.
pub fn decompress(data: &[u8], compressed: bool) -> Cow<'_, [u8]> {
    if !compressed {
        return Cow::Borrowed(data);
    }

    match inflate_raw(data) {
        Ok(out) => return Cow::Owned(out),
        Err(e) => log::debug!("raw deflate failed ({}), trying zlib", e),
    }
    match inflate_zlib(data) {
        Ok(out) => Cow::Owned(out),
        Err(e) => {
            log::warn!(
                "stream marked compressed but not inflatable ({}); using {} bytes as-is",
                e,
                data.len()
            );
            Cow::Borrowed(data)
        },
    }
}

fn inflate_raw(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len().saturating_mul(4));
    DeflateDecoder::new(data).read_to_end(&mut out)?;
    Ok(out)
}

fn inflate_zlib(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len().saturating_mul(4));
    ZlibDecoder::new(data).read_to_end(&mut out)?;
    Ok(out)
}

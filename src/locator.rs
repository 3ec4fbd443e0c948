//! Marker location inside an undelimited BI4 byte stream
//!
//! A named record is introduced by a marker: a NUL byte, the ASCII name and
//! one single-byte control-character terminator. Which terminator a file uses
//! depends on the encoder that produced it, so [`locate`] tries each entry of
//! [`TERMINATORS`] in order and keeps the first one that matches.

use log::debug;

use crate::error::{Bi4Error, Result};

/// Candidate marker terminators, in priority order
pub const TERMINATORS: [u8; 6] = [b'\x0c', b'\x0b', b'\x08', b'\x02', b'\x16', b'\x17'];

/// A located marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerMatch {
    /// Absolute offset of the leading NUL byte
    pub offset: usize,
    /// Length of the whole marker (NUL + name + terminator)
    pub len: usize,
    /// Terminator byte that matched
    pub terminator: u8,
}

impl MarkerMatch {
    /// First byte after the marker
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Byte pattern of `name` closed by `terminator`
pub fn marker_pattern(name: &str, terminator: u8) -> Vec<u8> {
    let mut pattern = Vec::with_capacity(name.len() + 2);
    pattern.push(0);
    pattern.extend_from_slice(name.as_bytes());
    pattern.push(terminator);
    pattern
}

/// Forward substring search for `needle` in `haystack[from..]`
///
/// Returns the absolute offset of the first occurrence.
pub fn find_bytes(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| pos + from)
}

/// Offsets of every occurrence of `needle` at or after `from`
///
/// Occurrences may overlap.
pub fn find_all(haystack: &[u8], needle: &[u8], from: usize) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut cursor = from;
    while let Some(pos) = find_bytes(haystack, needle, cursor) {
        offsets.push(pos);
        cursor = pos + 1;
    }
    offsets
}

/// Find the marker for `name`, searching from `cursor` (inclusive)
pub fn locate(buffer: &[u8], name: &str, cursor: usize) -> Result<MarkerMatch> {
    let found = TERMINATORS
        .iter()
        .find_map(|&terminator| {
            let pattern = marker_pattern(name, terminator);
            find_bytes(buffer, &pattern, cursor).map(|offset| MarkerMatch {
                offset,
                len: pattern.len(),
                terminator,
            })
        })
        .ok_or_else(|| Bi4Error::not_found(format!("marker {:?}", name)))?;

    debug!(
        "marker {:?} at offset {} (terminator 0x{:02x})",
        name, found.offset, found.terminator
    );
    Ok(found)
}

//! Per-particle typed array decoding
//!
//! An array record starts with a literal signature: `ARRAY`, the name length
//! as a little-endian u32, then the ASCII name. The layout after the
//! signature is:
//!
//! ```text
//! signature | 8-byte opaque tag | i32 row count | 4-byte opaque tag | payload
//! ```
//!
//! The payload holds `rows * columns` little-endian elements in stream order.

use log::debug;
use serde::Serialize;

use crate::dtype::{ElementType, TypedArray, Value};
use crate::error::{span, Bi4Error, Result};
use crate::locator::find_bytes;

const ARRAY_PREFIX: &[u8] = b"ARRAY";

/// Opaque tag between the signature and the row count
const PRE_COUNT_TAG_LEN: usize = 8;

/// Opaque tag between the row count and the payload
const POST_COUNT_TAG_LEN: usize = 4;

/// Identifies one typed array record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ArrayKey {
    /// ASCII array name as stored in the file
    pub name: &'static str,
    /// Offset from the signature start to its last byte
    pub header_offset: usize,
    /// Element type of the payload
    pub element_type: ElementType,
    /// Elements per particle (1 for scalars, 3 for vectors)
    pub columns: usize,
}

impl ArrayKey {
    /// Particle positions, single precision
    pub const POS: ArrayKey = ArrayKey::new("Pos", ElementType::F32, 3);
    /// Particle positions, double precision
    pub const POSD: ArrayKey = ArrayKey::new("Posd", ElementType::F64, 3);
    /// Particle identifiers
    pub const IDP: ArrayKey = ArrayKey::new("Idp", ElementType::I32, 1);
    /// Particle velocities
    pub const VEL: ArrayKey = ArrayKey::new("Vel", ElementType::F32, 3);
    /// Particle densities
    pub const RHOP: ArrayKey = ArrayKey::new("Rhop", ElementType::F32, 1);

    /// All arrays known to appear in DualSPHysics snapshots
    pub const KNOWN: [ArrayKey; 5] = [
        ArrayKey::POS,
        ArrayKey::POSD,
        ArrayKey::IDP,
        ArrayKey::VEL,
        ArrayKey::RHOP,
    ];

    /// Describe an array record by name
    ///
    /// The header offset is 11 for 3-character names and 12 for
    /// 4-character names.
    pub const fn new(name: &'static str, element_type: ElementType, columns: usize) -> Self {
        Self {
            name,
            header_offset: ARRAY_PREFIX.len() + 4 + name.len() - 1,
            element_type,
            columns,
        }
    }

    /// Literal byte signature introducing this array
    pub fn signature(&self) -> Vec<u8> {
        let mut sig = Vec::with_capacity(ARRAY_PREFIX.len() + 4 + self.name.len());
        sig.extend_from_slice(ARRAY_PREFIX);
        sig.extend_from_slice(&(self.name.len() as u32).to_le_bytes());
        sig.extend_from_slice(self.name.as_bytes());
        sig
    }

    /// Look up a known array key by (case-insensitive) name
    pub fn by_name(name: &str) -> Option<ArrayKey> {
        Self::KNOWN
            .iter()
            .copied()
            .find(|k| k.name.eq_ignore_ascii_case(name))
    }
}

/// A decoded per-particle array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleArray {
    /// Array name
    pub name: &'static str,
    /// Elements per particle
    pub columns: usize,
    /// Flat elements, `row_count() * columns` long
    pub data: TypedArray,
}

impl ParticleArray {
    /// Number of particles (rows)
    pub fn row_count(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.data.len() / self.columns
        }
    }

    /// Elements of row `index`, if present
    pub fn row(&self, index: usize) -> Option<Vec<Value>> {
        if index >= self.row_count() {
            return None;
        }
        let start = index * self.columns;
        (start..start + self.columns)
            .map(|i| self.data.get(i))
            .collect()
    }

    /// Copy out `count` rows starting at row `begin`
    pub fn rows(&self, begin: usize, count: usize) -> Result<ParticleArray> {
        let total = self.row_count();
        let end = begin
            .checked_add(count)
            .filter(|&end| end <= total)
            .ok_or(Bi4Error::OutOfRange {
                offset: begin,
                len: count,
                buffer_len: total,
            })?;
        Ok(ParticleArray {
            name: self.name,
            columns: self.columns,
            data: self.data.slice(begin * self.columns..end * self.columns),
        })
    }
}

/// Locate `key` in `buffer` and decode its payload
pub fn decode_array(buffer: &[u8], key: &ArrayKey) -> Result<ParticleArray> {
    let signature = key.signature();
    let found = find_bytes(buffer, &signature, 0)
        .ok_or_else(|| Bi4Error::not_found(format!("array {:?}", key.name)))?;

    let count_pos = found + key.header_offset + 1 + PRE_COUNT_TAG_LEN;
    let count_bytes = span(buffer, count_pos, 4)?;
    let rows = i32::from_le_bytes([count_bytes[0], count_bytes[1], count_bytes[2], count_bytes[3]]);
    if rows < 0 {
        return Err(Bi4Error::Format(format!(
            "array {:?} has negative row count {}",
            key.name, rows
        )));
    }

    let data_start = count_pos + 4 + POST_COUNT_TAG_LEN;
    let payload_len = (rows as usize)
        .checked_mul(key.columns)
        .and_then(|n| n.checked_mul(key.element_type.byte_size()))
        .ok_or(Bi4Error::OutOfRange {
            offset: data_start,
            len: usize::MAX,
            buffer_len: buffer.len(),
        })?;
    let payload = span(buffer, data_start, payload_len)?;

    debug!(
        "array {:?}: {} rows x {} columns at offset {}",
        key.name, rows, key.columns, data_start
    );

    Ok(ParticleArray {
        name: key.name,
        columns: key.columns,
        data: key.element_type.decode_array(payload)?,
    })
}

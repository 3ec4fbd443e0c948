//! Particle-group partitioning from the `Part_Head` file
//!
//! The head file lists one block per particle group, each introduced by an
//! `ITEM` literal. The first [`HEAD_PREAMBLE_ITEMS`] occurrences belong to
//! the file preamble. The remaining occurrences, closed by a sentinel at the
//! end of the buffer, split the file into contiguous half-open blocks:
//!
//! ```text
//! ITEM(pre) ITEM(pre) ITEM[block 0) ITEM[block 1) ... ITEM[block n-1) EOF
//! ```
//!
//! Each block yields one [`ParticleGroup`]. `Begin` is a running sum of the
//! preceding groups' `Count`.

use std::fmt;
use std::ops::Range;

use log::{debug, warn};
use serde::Serialize;

use crate::dtype::{ElementType, Value};
use crate::error::{Bi4Error, Result};
use crate::locator::find_all;
use crate::scalar::{decode_scalar, PropertyValue};
use crate::snapshot::{Snapshot, DEFAULT_PROPERTY_CURSOR};

/// Literal separating particle-group blocks
pub const ITEM_MARKER: &[u8] = b"ITEM";

/// Number of leading `ITEM` literals that are not group blocks
pub const HEAD_PREAMBLE_ITEMS: usize = 2;

/// Where the `ITEM` scan begins
const ITEM_SCAN_START: usize = 1;

/// Physical role of a particle group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParticleType {
    /// Fixed (or moving) boundary
    Fixed,
    /// Floating rigid body
    Floating,
    /// Fluid
    Fluid,
}

impl ParticleType {
    /// Classification order: the first literal found wins
    pub const PRIORITY: [ParticleType; 3] =
        [ParticleType::Fixed, ParticleType::Floating, ParticleType::Fluid];

    /// Literal naming this type inside a head block
    pub const fn literal(&self) -> &'static str {
        match self {
            ParticleType::Fixed => "Fixed",
            ParticleType::Floating => "Floating",
            ParticleType::Fluid => "Fluid",
        }
    }
}

impl fmt::Display for ParticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

/// Type named in `bytes`, testing [`ParticleType::PRIORITY`] in order
pub fn classify_bytes(bytes: &[u8]) -> Option<ParticleType> {
    ParticleType::PRIORITY.iter().copied().find(|t| {
        let needle = t.literal().as_bytes();
        bytes.windows(needle.len()).any(|w| w == needle)
    })
}

/// Which bytes the `Count`/`MkType`/`Mk` fields are searched in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FieldScope {
    /// Search the whole head buffer from [`DEFAULT_PROPERTY_CURSOR`]
    ///
    /// Every block then reports the first `Count`/`MkType`/`Mk` in the
    /// file; only the type is block-specific. This matches the behaviour
    /// of existing DualSPHysics post-processing scripts.
    #[default]
    WholeBuffer,
    /// Search only inside each block's own byte range
    Block,
}

/// A contiguous range of particles sharing a type and Mk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParticleGroup {
    /// Group type, `None` if the block names none
    #[serde(rename = "Type")]
    pub particle_type: Option<ParticleType>,
    /// Mk within its type
    pub mk_type: i32,
    /// Global Mk
    pub mk: i32,
    /// Index of the group's first particle
    pub begin: i32,
    /// Number of particles in the group
    pub count: i32,
}

impl ParticleGroup {
    /// Particle index range covered by this group
    pub fn index_range(&self) -> Range<i64> {
        self.begin as i64..self.begin as i64 + self.count as i64
    }
}

/// Byte ranges of the non-preamble `ITEM` blocks
pub fn block_ranges(buffer: &[u8]) -> Result<Vec<Range<usize>>> {
    let mut offsets = find_all(buffer, ITEM_MARKER, ITEM_SCAN_START);
    if offsets.len() < HEAD_PREAMBLE_ITEMS {
        return Err(Bi4Error::Format(format!(
            "head file has {} ITEM markers, expected at least {}",
            offsets.len(),
            HEAD_PREAMBLE_ITEMS
        )));
    }

    offsets.drain(..HEAD_PREAMBLE_ITEMS);
    offsets.push(buffer.len());

    Ok(offsets.windows(2).map(|w| w[0]..w[1]).collect())
}

fn read_i32_field(buffer: &[u8], name: &str, cursor: usize) -> Result<i32> {
    match decode_scalar(buffer, name, cursor, ElementType::I32, 1)? {
        PropertyValue::Scalar(Value::I32(v)) => Ok(v),
        other => Err(Bi4Error::Format(format!(
            "field {:?} decoded as {:?}",
            name, other
        ))),
    }
}

/// Split the head file into particle groups
pub fn parse_particle_groups(head: &Snapshot, scope: FieldScope) -> Result<Vec<ParticleGroup>> {
    let buffer = head.as_bytes();
    let ranges = block_ranges(buffer)?;
    if scope == FieldScope::WholeBuffer && ranges.len() > 1 {
        warn!(
            "{}: {} groups read with whole-buffer field scope; Count/MkType/Mk repeat the first block",
            head.name(),
            ranges.len()
        );
    }

    let mut begin: i32 = 0;
    let mut groups = Vec::with_capacity(ranges.len());

    for range in ranges {
        let (fields, cursor) = match scope {
            FieldScope::WholeBuffer => (buffer, DEFAULT_PROPERTY_CURSOR),
            FieldScope::Block => (&buffer[range.clone()], 0),
        };
        let count = read_i32_field(fields, "Count", cursor)?;
        let mk_type = read_i32_field(fields, "MkType", cursor)?;
        let mk = read_i32_field(fields, "Mk", cursor)?;
        let particle_type = head.classify_particle_type(range.clone())?;

        debug!(
            "block {:?}: type={:?} mk_type={} mk={} begin={} count={}",
            range, particle_type, mk_type, mk, begin, count
        );

        groups.push(ParticleGroup {
            particle_type,
            mk_type,
            mk,
            begin,
            count,
        });
        begin = begin.checked_add(count).ok_or_else(|| {
            Bi4Error::Format(format!("particle index overflow after Mk {}", mk))
        })?;
    }

    Ok(groups)
}

//! One BI4 file loaded into memory
//!
//! A [`Snapshot`] owns the complete, immutable contents of a single
//! `Part_XXXX.bi4` or `Part_Head` file. All accessors decode on demand
//! from that buffer; nothing is cached and nothing is mutated, so a
//! snapshot can be shared freely between threads.

use std::ops::Range;
use std::path::{Path, PathBuf};

use log::debug;

use crate::array::{decode_array, ArrayKey, ParticleArray};
use crate::error::{span, Bi4Error, Result};
use crate::head::{classify_bytes, ParticleType};
use crate::registry::{CountKey, ScalarSpec};
use crate::scalar::{decode_particle_count, decode_scalar, decode_time, PropertyValue};

/// Default search cursor for named properties
///
/// Every named property is unique per file, so searching from just past the
/// first byte finds it.
pub const DEFAULT_PROPERTY_CURSOR: usize = 1;

/// In-memory contents of one BI4 file
#[derive(Debug, Clone)]
pub struct Snapshot {
    name: String,
    path: Option<PathBuf>,
    data: Vec<u8>,
}

impl Snapshot {
    /// Read the whole file at `path`
    ///
    /// Fails immediately with [`Bi4Error::Io`] if the file is missing or
    /// unreadable.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| Bi4Error::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!("loaded {} ({} bytes)", path.display(), data.len());

        Ok(Self {
            name,
            path: Some(path.to_path_buf()),
            data,
        })
    }

    /// Wrap an in-memory buffer
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            path: None,
            data,
        }
    }

    /// File name (or the name given to [`Snapshot::from_bytes`])
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path the snapshot was loaded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw file contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Buffer length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for an empty file
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Simulation time of this snapshot
    pub fn time(&self) -> Result<f64> {
        self.time_at(0)
    }

    /// Simulation time, searched from an explicit cursor
    pub fn time_at(&self, cursor: usize) -> Result<f64> {
        decode_time(&self.data, cursor)
    }

    /// Particle count stored under the marker `key` (e.g. `CaseNp`)
    pub fn particle_count(&self, key: &str) -> Result<i32> {
        self.particle_count_at(key, 0)
    }

    /// Particle count under `key`, searched from an explicit cursor
    pub fn particle_count_at(&self, key: &str, cursor: usize) -> Result<i32> {
        decode_particle_count(&self.data, key, cursor)
    }

    /// Particle count for one of the well-known keys
    pub fn count(&self, key: CountKey) -> Result<i32> {
        self.particle_count(key.marker())
    }

    /// Named property, searched from [`DEFAULT_PROPERTY_CURSOR`]
    pub fn property(&self, spec: &ScalarSpec) -> Result<PropertyValue> {
        self.property_at(spec, DEFAULT_PROPERTY_CURSOR)
    }

    /// Named property, searched from an explicit cursor
    pub fn property_at(&self, spec: &ScalarSpec, cursor: usize) -> Result<PropertyValue> {
        decode_scalar(&self.data, spec.name, cursor, spec.element_type, spec.count)
    }

    /// Per-particle array
    pub fn array(&self, key: &ArrayKey) -> Result<ParticleArray> {
        decode_array(&self.data, key)
    }

    /// Particle type named inside `range`, if any
    ///
    /// An inverted range (`start > end`) is a [`Bi4Error::Format`] error.
    pub fn classify_particle_type(&self, range: Range<usize>) -> Result<Option<ParticleType>> {
        let len = range.end.checked_sub(range.start).ok_or_else(|| {
            Bi4Error::Format(format!(
                "inverted byte range {}..{}",
                range.start, range.end
            ))
        })?;
        let bytes = span(&self.data, range.start, len)?;
        Ok(classify_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Value;
    use crate::locator::marker_pattern;
    use crate::registry::{DATA_2D, DP, GRAVITY};
    use std::io::Write;
    use tempfile::tempdir;

    fn sample_buffer() -> Vec<u8> {
        let mut buf = vec![0x42];
        buf.extend(marker_pattern("TimeStep", b'\x0c'));
        buf.extend([0u8; 4]);
        buf.extend(0.5f64.to_le_bytes());
        buf.extend(marker_pattern("CaseNfluid", b'\x0b'));
        buf.extend([0u8; 4]);
        buf.extend(1234i32.to_le_bytes());
        buf.extend(marker_pattern("Dp", b'\x08'));
        buf.extend([0u8; 3]);
        buf.extend(0.01f64.to_le_bytes());
        buf.extend(marker_pattern("Gravity", b'\x16'));
        buf.extend([0u8; 3]);
        for g in [0.0f32, 0.0, -9.81] {
            buf.extend(g.to_le_bytes());
        }
        buf.extend(b"...Floating...");
        buf
    }

    #[test]
    fn test_accessors() {
        let snap = Snapshot::from_bytes("Part_0000.bi4", sample_buffer());
        assert_eq!(snap.name(), "Part_0000.bi4");
        assert!(snap.path().is_none());
        assert_eq!(snap.time().unwrap(), 0.5);
        assert_eq!(snap.particle_count("CaseNfluid").unwrap(), 1234);
        assert_eq!(snap.count(CountKey::Fluid).unwrap(), 1234);
        assert!(snap.count(CountKey::Fixed).unwrap_err().is_not_found());
        assert_eq!(
            snap.property(&DP).unwrap(),
            PropertyValue::Scalar(Value::F64(0.01))
        );
        assert_eq!(snap.property(&GRAVITY).unwrap().values().len(), 3);
        assert!(snap.property(&DATA_2D).unwrap_err().is_not_found());
    }

    #[test]
    fn test_property_at_cursor_past_marker() {
        let snap = Snapshot::from_bytes("s", sample_buffer());
        let dp_offset = crate::locator::locate(snap.as_bytes(), "Dp", 0).unwrap().offset;
        assert!(snap.property_at(&DP, dp_offset).is_ok());
        assert!(snap.property_at(&DP, dp_offset + 1).unwrap_err().is_not_found());
    }

    #[test]
    fn test_classify_particle_type() {
        let snap = Snapshot::from_bytes("s", sample_buffer());
        let len = snap.len();
        assert_eq!(
            snap.classify_particle_type(0..len).unwrap(),
            Some(ParticleType::Floating)
        );
        assert_eq!(snap.classify_particle_type(0..4).unwrap(), None);
        assert!(snap.classify_particle_type(0..len + 1).is_err());
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn test_classify_inverted_range_is_error() {
        let snap = Snapshot::from_bytes("s", sample_buffer());
        assert!(matches!(
            snap.classify_particle_type(8..2),
            Err(Bi4Error::Format(_))
        ));
        assert_eq!(snap.classify_particle_type(5..5).unwrap(), None);
    }

    #[test]
    fn test_time_and_count_at_cursor() {
        let snap = Snapshot::from_bytes("s", sample_buffer());
        let time_offset = crate::locator::locate(snap.as_bytes(), "TimeStep", 0)
            .unwrap()
            .offset;
        assert_eq!(snap.time_at(time_offset).unwrap(), 0.5);
        assert!(snap.time_at(time_offset + 1).unwrap_err().is_not_found());

        let count_offset = crate::locator::locate(snap.as_bytes(), "CaseNfluid", 0)
            .unwrap()
            .offset;
        assert_eq!(snap.particle_count_at("CaseNfluid", count_offset).unwrap(), 1234);
        assert!(snap
            .particle_count_at("CaseNfluid", count_offset + 1)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_open_reads_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("Part_0003.bi4");
        std::fs::File::create(&path)?.write_all(&sample_buffer())?;

        let snap = Snapshot::open(&path)?;
        assert_eq!(snap.name(), "Part_0003.bi4");
        assert_eq!(snap.path(), Some(path.as_path()));
        assert_eq!(snap.time()?, 0.5);
        Ok(())
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Part_9999.bi4");
        match Snapshot::open(&path) {
            Err(Bi4Error::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}

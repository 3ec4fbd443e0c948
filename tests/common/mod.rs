//! Builders for synthetic BI4 files laid out the way DualSPHysics writes them.

#![allow(dead_code)]

use bi4::array::ArrayKey;
use bi4::locator::marker_pattern;

/// Incrementally assembled BI4 buffer
pub struct Bi4Builder {
    buf: Vec<u8>,
    terminator: u8,
}

impl Bi4Builder {
    pub fn new() -> Self {
        Self {
            buf: b"#BI4".to_vec(),
            terminator: b'\x0c',
        }
    }

    /// Use a different marker terminator for the following records
    pub fn terminator(mut self, terminator: u8) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Marker + 4-byte tag + f64
    pub fn time(mut self, t: f64) -> Self {
        self.buf.extend(marker_pattern("TimeStep", self.terminator));
        self.buf.extend([0u8; 4]);
        self.buf.extend(t.to_le_bytes());
        self
    }

    /// Marker + 4-byte tag + i32
    pub fn count(mut self, key: &str, n: i32) -> Self {
        self.buf.extend(marker_pattern(key, self.terminator));
        self.buf.extend([0u8; 4]);
        self.buf.extend(n.to_le_bytes());
        self
    }

    /// Marker + 3-byte tag + payload
    pub fn property(mut self, name: &str, payload: &[u8]) -> Self {
        self.buf.extend(marker_pattern(name, self.terminator));
        self.buf.extend([0x7fu8; 3]);
        self.buf.extend_from_slice(payload);
        self
    }

    pub fn property_f64(self, name: &str, values: &[f64]) -> Self {
        let payload: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.property(name, &payload)
    }

    pub fn property_f32(self, name: &str, values: &[f32]) -> Self {
        let payload: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.property(name, &payload)
    }

    pub fn property_i32(self, name: &str, value: i32) -> Self {
        self.property(name, &value.to_le_bytes())
    }

    /// Signature + 8-byte tag + row count + 4-byte tag + payload
    pub fn array(mut self, key: &ArrayKey, rows: i32, payload: &[u8]) -> Self {
        self.buf.extend(key.signature());
        self.buf.extend([0u8; 8]);
        self.buf.extend(rows.to_le_bytes());
        self.buf.extend([0u8; 4]);
        self.buf.extend_from_slice(payload);
        self
    }

    pub fn array_f32(self, key: &ArrayKey, values: &[f32]) -> Self {
        let rows = (values.len() / key.columns) as i32;
        let payload: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.array(key, rows, &payload)
    }

    pub fn array_i32(self, key: &ArrayKey, values: &[i32]) -> Self {
        let rows = (values.len() / key.columns) as i32;
        let payload: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.array(key, rows, &payload)
    }

    /// `ITEM` + type literal + MkType/Mk/Count fields
    pub fn group(self, kind: &str, mk_type: i32, mk: i32, count: i32) -> Self {
        self.raw(b"ITEM")
            .raw(kind.as_bytes())
            .property_i32("MkType", mk_type)
            .property_i32("Mk", mk)
            .property_i32("Count", count)
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

/// A snapshot with time, counts, positions and ids for `n` particles
pub fn snapshot(time: f64, n: i32) -> Vec<u8> {
    let positions: Vec<f32> = (0..n * 3).map(|i| i as f32 * 0.5).collect();
    let ids: Vec<i32> = (0..n).collect();
    Bi4Builder::new()
        .time(time)
        .count("CaseNp", n)
        .count("CaseNfixed", n / 4)
        .count("CaseNmoving", 0)
        .count("CaseNfloat", 0)
        .count("CaseNfluid", n - n / 4)
        .array_f32(&ArrayKey::POS, &positions)
        .array_i32(&ArrayKey::IDP, &ids)
        .build()
}

/// A head file with the usual constants and the given groups
pub fn head(groups: &[(&str, i32, i32, i32)]) -> Vec<u8> {
    let mut builder = Bi4Builder::new()
        .raw(b"ITEMcase ITEMdata ")
        .property_i32("ViscoType", 1)
        .property_f32("ViscoValue", &[0.01])
        .property_f64("Dp", &[0.005])
        .property_f64("H", &[0.0091])
        .property_f64("RhopZero", &[1000.0])
        .property_f32("Gravity", &[0.0, 0.0, -9.81])
        .property_f64("CasePosMin", &[0.0, 0.0, 0.0])
        .property_f64("CasePosMax", &[1.6, 0.67, 0.4])
        .property("Data2d", &[0]);
    for &(kind, mk_type, mk, count) in groups {
        builder = builder.group(kind, mk_type, mk, count);
    }
    builder.build()
}

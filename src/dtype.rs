//! Element types stored in BI4 records
//!
//! BI4 files are written on little-endian hosts, so every numeric field is
//! decoded as little-endian regardless of the reading platform.

use std::fmt;
use std::io::Cursor;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use serde::Serialize;

use crate::error::{Bi4Error, Result};

/// Closed set of element types a BI4 record can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementType {
    /// 32-bit signed integer
    I32,
    /// 32-bit IEEE-754 float
    F32,
    /// 64-bit IEEE-754 float
    F64,
    /// Unsigned byte (used for boolean flags)
    U8,
    /// 64-bit signed integer
    I64,
}

impl ElementType {
    /// Get the byte size per element
    pub const fn byte_size(&self) -> usize {
        match self {
            ElementType::U8 => 1,
            ElementType::I32 | ElementType::F32 => 4,
            ElementType::F64 | ElementType::I64 => 8,
        }
    }

    /// Decode a single element from the start of `bytes`
    pub fn decode_value(&self, bytes: &[u8]) -> Result<Value> {
        let mut cursor = Cursor::new(bytes);
        let value = match self {
            ElementType::I32 => cursor.read_i32::<LittleEndian>().map(Value::I32),
            ElementType::F32 => cursor.read_f32::<LittleEndian>().map(Value::F32),
            ElementType::F64 => cursor.read_f64::<LittleEndian>().map(Value::F64),
            ElementType::U8 => cursor.read_u8().map(Value::U8),
            ElementType::I64 => cursor.read_i64::<LittleEndian>().map(Value::I64),
        };
        value.map_err(|_| Bi4Error::OutOfRange {
            offset: 0,
            len: self.byte_size(),
            buffer_len: bytes.len(),
        })
    }

    /// Decode `bytes` as a packed run of elements
    ///
    /// `bytes.len()` must be an exact multiple of [`ElementType::byte_size`].
    pub fn decode_array(&self, bytes: &[u8]) -> Result<TypedArray> {
        let size = self.byte_size();
        if bytes.len() % size != 0 {
            return Err(Bi4Error::Format(format!(
                "{} bytes is not a whole number of {:?} elements",
                bytes.len(),
                self
            )));
        }

        let count = bytes.len() / size;
        let array = match self {
            ElementType::I32 => {
                let mut values = vec![0i32; count];
                LittleEndian::read_i32_into(bytes, &mut values);
                TypedArray::I32(values)
            }
            ElementType::F32 => {
                let mut values = vec![0f32; count];
                LittleEndian::read_f32_into(bytes, &mut values);
                TypedArray::F32(values)
            }
            ElementType::F64 => {
                let mut values = vec![0f64; count];
                LittleEndian::read_f64_into(bytes, &mut values);
                TypedArray::F64(values)
            }
            ElementType::U8 => TypedArray::U8(bytes.to_vec()),
            ElementType::I64 => {
                let mut values = vec![0i64; count];
                LittleEndian::read_i64_into(bytes, &mut values);
                TypedArray::I64(values)
            }
        };
        Ok(array)
    }
}

/// A single decoded element
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// 32-bit signed integer
    I32(i32),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
    /// Unsigned byte
    U8(u8),
    /// 64-bit signed integer
    I64(i64),
}

impl Value {
    /// Widen to f64 for display or arithmetic
    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::I32(v) => v as f64,
            Value::F32(v) => v as f64,
            Value::F64(v) => v,
            Value::U8(v) => v as f64,
            Value::I64(v) => v as f64,
        }
    }

    /// Integer view, `None` for floating-point values
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::I32(v) => Some(v as i64),
            Value::U8(v) => Some(v as i64),
            Value::I64(v) => Some(v),
            Value::F32(_) | Value::F64(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I32(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
        }
    }
}

/// A flat run of decoded elements of one type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedArray {
    /// 32-bit signed integers
    I32(Vec<i32>),
    /// 32-bit floats
    F32(Vec<f32>),
    /// 64-bit floats
    F64(Vec<f64>),
    /// Bytes
    U8(Vec<u8>),
    /// 64-bit signed integers
    I64(Vec<i64>),
}

impl TypedArray {
    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            TypedArray::I32(v) => v.len(),
            TypedArray::F32(v) => v.len(),
            TypedArray::F64(v) => v.len(),
            TypedArray::U8(v) => v.len(),
            TypedArray::I64(v) => v.len(),
        }
    }

    /// True if there are no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type of this array
    pub fn element_type(&self) -> ElementType {
        match self {
            TypedArray::I32(_) => ElementType::I32,
            TypedArray::F32(_) => ElementType::F32,
            TypedArray::F64(_) => ElementType::F64,
            TypedArray::U8(_) => ElementType::U8,
            TypedArray::I64(_) => ElementType::I64,
        }
    }

    /// Element at `index`, if present
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            TypedArray::I32(v) => v.get(index).copied().map(Value::I32),
            TypedArray::F32(v) => v.get(index).copied().map(Value::F32),
            TypedArray::F64(v) => v.get(index).copied().map(Value::F64),
            TypedArray::U8(v) => v.get(index).copied().map(Value::U8),
            TypedArray::I64(v) => v.get(index).copied().map(Value::I64),
        }
    }

    /// Copy out the elements in `range`
    pub(crate) fn slice(&self, range: std::ops::Range<usize>) -> TypedArray {
        match self {
            TypedArray::I32(v) => TypedArray::I32(v[range].to_vec()),
            TypedArray::F32(v) => TypedArray::F32(v[range].to_vec()),
            TypedArray::F64(v) => TypedArray::F64(v[range].to_vec()),
            TypedArray::U8(v) => TypedArray::U8(v[range].to_vec()),
            TypedArray::I64(v) => TypedArray::I64(v[range].to_vec()),
        }
    }

    /// Widen every element to f64
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            TypedArray::I32(v) => v.iter().map(|&x| x as f64).collect(),
            TypedArray::F32(v) => v.iter().map(|&x| x as f64).collect(),
            TypedArray::F64(v) => v.clone(),
            TypedArray::U8(v) => v.iter().map(|&x| x as f64).collect(),
            TypedArray::I64(v) => v.iter().map(|&x| x as f64).collect(),
        }
    }
}

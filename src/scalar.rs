//! Scalar and 3-vector decoding after a located marker

use std::fmt;

use serde::Serialize;

use crate::dtype::{ElementType, Value};
use crate::error::{span, Bi4Error, Result};
use crate::locator::locate;

/// Width of the length/type tag between a property marker and its payload
pub const PROPERTY_TAG_LEN: usize = 3;

/// Width of the tag between a `TimeStep`/count marker and its payload
pub const FIXED_TAG_LEN: usize = 4;

/// Marker name holding the snapshot time
pub const TIME_MARKER: &str = "TimeStep";

/// A decoded named property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Single element
    Scalar(Value),
    /// Ordered elements in stream order (e.g. gravity, domain bounds)
    Vector(Vec<Value>),
}

impl PropertyValue {
    /// The single element, if this is a scalar
    pub fn as_scalar(&self) -> Option<Value> {
        match self {
            PropertyValue::Scalar(v) => Some(*v),
            PropertyValue::Vector(_) => None,
        }
    }

    /// All elements in stream order
    pub fn values(&self) -> Vec<Value> {
        match self {
            PropertyValue::Scalar(v) => vec![*v],
            PropertyValue::Vector(vs) => vs.clone(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Scalar(v) => write!(f, "{}", v),
            PropertyValue::Vector(vs) => {
                write!(f, "(")?;
                for (i, v) in vs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Decode `count` elements of `element_type` following the `name` marker
///
/// The marker is searched from `cursor`; the payload starts
/// [`PROPERTY_TAG_LEN`] bytes after the marker ends. A `count` of 1 yields
/// [`PropertyValue::Scalar`], anything larger a [`PropertyValue::Vector`].
pub fn decode_scalar(
    buffer: &[u8],
    name: &str,
    cursor: usize,
    element_type: ElementType,
    count: usize,
) -> Result<PropertyValue> {
    if count == 0 {
        return Err(Bi4Error::Format(format!(
            "property {:?} requested with zero elements",
            name
        )));
    }

    let marker = locate(buffer, name, cursor)?;
    let start = marker.end() + PROPERTY_TAG_LEN;
    let width = element_type.byte_size();
    let bytes = span(buffer, start, width * count)?;

    let values = bytes
        .chunks_exact(width)
        .map(|chunk| element_type.decode_value(chunk))
        .collect::<Result<Vec<_>>>()?;

    Ok(match values.as_slice() {
        [single] => PropertyValue::Scalar(*single),
        _ => PropertyValue::Vector(values),
    })
}

/// Decode the snapshot time: one f64 after the `TimeStep` marker and a 4-byte tag
pub fn decode_time(buffer: &[u8], cursor: usize) -> Result<f64> {
    let marker = locate(buffer, TIME_MARKER, cursor)?;
    let bytes = span(buffer, marker.end() + FIXED_TAG_LEN, 8)?;
    match ElementType::F64.decode_value(bytes)? {
        Value::F64(t) => Ok(t),
        other => Err(Bi4Error::Format(format!("unexpected time value {:?}", other))),
    }
}

/// Decode a particle count: one i32 after the `key` marker and a 4-byte tag
pub fn decode_particle_count(buffer: &[u8], key: &str, cursor: usize) -> Result<i32> {
    let marker = locate(buffer, key, cursor)?;
    let bytes = span(buffer, marker.end() + FIXED_TAG_LEN, 4)?;
    match ElementType::I32.decode_value(bytes)? {
        Value::I32(n) => Ok(n),
        other => Err(Bi4Error::Format(format!("unexpected count value {:?}", other))),
    }
}

//! # bi4 - DualSPHysics BI4 Snapshot Reader
//!
//! `bi4` decodes the binary snapshot files written by the DualSPHysics SPH
//! solver. A case directory holds one `Part_XXXX.bi4` file per output step
//! and a single `Part_Head` file describing the particle groups and the
//! simulation-wide constants.
//!
//! BI4 files have no fixed schema that a reader can rely on. Records are
//! found by searching for their marker: a NUL byte, the ASCII record name
//! and one of several control-character terminators. The payload follows the
//! marker at a fixed offset.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bi4::prelude::*;
//!
//! // A single file
//! let snapshot = Snapshot::open("data/Part_0010.bi4")?;
//! println!("t = {} s", snapshot.time()?);
//! println!("fluid particles: {}", snapshot.count(CountKey::Fluid)?);
//!
//! let positions = snapshot.array(&ArrayKey::POS)?;
//! println!("{} positions", positions.row_count());
//!
//! // A whole case directory
//! let reader = Bi4Reader::open("data")?;
//! let dp = reader.property(&registry::DP)?;
//! println!("dp = {}", dp);
//! for group in reader.particle_groups()? {
//!     println!("{:?}: Mk {} ({} particles)", group.particle_type, group.mk, group.count);
//! }
//! # Ok::<(), Bi4Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`locator`]: marker search over a raw byte buffer
//! - [`scalar`]: scalar and 3-vector decoding after a marker
//! - [`array`]: per-particle typed arrays (`Pos`, `Vel`, `Idp`, ...)
//! - [`snapshot`]: one file's buffer with named accessors
//! - [`head`]: particle-group partitioning of the head file
//! - [`reader`]: queries across every snapshot of a case
//! - [`registry`]: known property and particle-count names
//!
//! Decoding is read-only. Every computed byte range is bounds-checked and a
//! range past the end of the buffer is reported as
//! [`Bi4Error::OutOfRange`](error::Bi4Error::OutOfRange), never clamped.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod array;
pub mod dtype;
pub mod error;
pub mod head;
pub mod locator;
pub mod reader;
pub mod registry;
pub mod scalar;
pub mod snapshot;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::array::{ArrayKey, ParticleArray};
    pub use crate::dtype::{ElementType, TypedArray, Value};
    pub use crate::error::{Bi4Error, Result};
    pub use crate::head::{parse_particle_groups, FieldScope, ParticleGroup, ParticleType};
    pub use crate::reader::{Bi4Reader, PerFile, ReaderConfig};
    pub use crate::registry::{self, CountKey, ScalarSpec};
    pub use crate::scalar::PropertyValue;
    pub use crate::snapshot::Snapshot;
}

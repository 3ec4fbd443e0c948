//! # Multi-file BI4 Reader
//!
//! A DualSPHysics case writes one `Part_XXXX.bi4` file per output step plus
//! a single `Part_Head` file with the particle-group layout and
//! simulation-wide constants. [`Bi4Reader`] loads all of them and answers
//! queries across every snapshot at once.
//!
//! ## Failure isolation
//!
//! A snapshot that cannot be loaded or decoded does not stop the others:
//! aggregate queries return a [`PerFile`] map holding either the decoded
//! value or the error for each file.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bi4::reader::Bi4Reader;
//! use bi4::registry::CountKey;
//!
//! let reader = Bi4Reader::open("./data")?;
//!
//! for (file, time) in reader.times() {
//!     match time {
//!         Ok(t) => println!("{}: t = {}", file, t),
//!         Err(e) => eprintln!("{}: {}", file, e),
//!     }
//! }
//!
//! let fluid = reader.counts(CountKey::Fluid);
//! for group in reader.particle_groups()? {
//!     println!("{:?} Mk={} [{}..+{}]", group.particle_type, group.mk, group.begin, group.count);
//! }
//! # let _ = fluid;
//! # Ok::<(), bi4::error::Bi4Error>(())
//! ```

mod config;
mod discovery;
mod open;
mod queries;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

pub use config::{ReaderConfig, ReaderSettings};
pub use discovery::{
    discover, is_head_name, is_snapshot_name, snapshot_file_name, Discovery, HEAD_FILE_PATTERN,
};

use crate::error::Result;
use crate::head::ParticleGroup;
use crate::snapshot::Snapshot;

/// Per-file query results, keyed by file name
pub type PerFile<T> = BTreeMap<String, Result<T>>;

/// Reader over all snapshots of one DualSPHysics case
pub struct Bi4Reader {
    config: ReaderConfig,
    snapshots: PerFile<Snapshot>,
    head: Option<Result<Snapshot>>,
    groups: Result<Vec<ParticleGroup>>,
}

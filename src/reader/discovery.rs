//! Locating snapshot and head files in a case output directory

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Bi4Error, Result};

const SNAPSHOT_PREFIX: &str = "Part_";
const SNAPSHOT_SUFFIX: &str = ".bi4";
const SNAPSHOT_DIGITS: usize = 4;

/// Name fragment identifying the head file
pub const HEAD_FILE_PATTERN: &str = "Part_Head";

/// Files found in a case output directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Snapshot file name to path, sorted by name
    pub snapshots: BTreeMap<String, PathBuf>,
    /// The head file, if present
    pub head: Option<PathBuf>,
}

/// File name of snapshot number `part`
pub fn snapshot_file_name(part: u32) -> String {
    format!("{}{:04}{}", SNAPSHOT_PREFIX, part, SNAPSHOT_SUFFIX)
}

/// True for names containing `Part_` + four digits + `.bi4`
pub fn is_snapshot_name(name: &str) -> bool {
    name.match_indices(SNAPSHOT_PREFIX).any(|(i, prefix)| {
        let rest = &name[i + prefix.len()..];
        rest.len() >= SNAPSHOT_DIGITS + SNAPSHOT_SUFFIX.len()
            && rest.as_bytes()[..SNAPSHOT_DIGITS]
                .iter()
                .all(u8::is_ascii_digit)
            && rest[SNAPSHOT_DIGITS..].starts_with(SNAPSHOT_SUFFIX)
    })
}

/// True for names containing `Part_Head`
pub fn is_head_name(name: &str) -> bool {
    name.contains(HEAD_FILE_PATTERN)
}

/// Scan `dir` for snapshot files and the head file
pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Discovery> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| Bi4Error::io(dir, e))?;

    let mut discovery = Discovery::default();
    let mut heads = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| Bi4Error::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_snapshot_name(&name) {
            discovery.snapshots.insert(name, entry.path());
        } else if is_head_name(&name) {
            heads.push(entry.path());
        }
    }

    heads.sort();
    if heads.len() > 1 {
        warn!(
            "{} head files in {}, using {}",
            heads.len(),
            dir.display(),
            heads[0].display()
        );
    }
    discovery.head = heads.into_iter().next();

    debug!(
        "discovered {} snapshots in {} (head: {})",
        discovery.snapshots.len(),
        dir.display(),
        discovery.head.is_some()
    );
    Ok(discovery)
}

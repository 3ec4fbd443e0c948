use std::path::{Path, PathBuf};

use log::{info, warn};

use super::discovery::discover;
use super::{Bi4Reader, PerFile, ReaderConfig};
use crate::error::{Bi4Error, Result};
use crate::head::{parse_particle_groups, ParticleGroup};
use crate::snapshot::Snapshot;

impl Bi4Reader {
    /// Discover and load every BI4 file in `dir`
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::open_with_config(dir, ReaderConfig::default())
    }

    /// Discover and load every BI4 file in `dir` with custom configuration
    ///
    /// Only a failure to list the directory is fatal; individual files that
    /// cannot be read are recorded and reported by the queries touching them.
    pub fn open_with_config<P: AsRef<Path>>(dir: P, config: ReaderConfig) -> Result<Self> {
        let found = discover(dir.as_ref())?;
        info!(
            "Opening {} snapshots from {}",
            found.snapshots.len(),
            dir.as_ref().display()
        );
        Ok(Self::from_paths(found.snapshots, found.head, config))
    }

    /// Load an explicit set of snapshot paths and an optional head file
    pub fn from_paths<I>(snapshots: I, head: Option<PathBuf>, config: ReaderConfig) -> Self
    where
        I: IntoIterator<Item = (String, PathBuf)>,
    {
        let paths: Vec<(String, PathBuf)> = snapshots.into_iter().collect();
        let loaded = load_all(paths, config.parallel);
        let head = head.map(|path| {
            let result = Snapshot::open(&path);
            if let Err(e) = &result {
                warn!("head file: {}", e);
            }
            result
        });
        Self::assemble(loaded, head, config)
    }

    /// Build a reader over snapshots already in memory
    pub fn from_snapshots<I>(snapshots: I, head: Option<Snapshot>, config: ReaderConfig) -> Self
    where
        I: IntoIterator<Item = Snapshot>,
    {
        let loaded = snapshots
            .into_iter()
            .map(|snap| (snap.name().to_string(), Ok(snap)))
            .collect();
        Self::assemble(loaded, head.map(Ok), config)
    }

    fn assemble(
        snapshots: PerFile<Snapshot>,
        head: Option<Result<Snapshot>>,
        config: ReaderConfig,
    ) -> Self {
        let groups = parse_head(head.as_ref(), &config);
        Self {
            config,
            snapshots,
            head,
            groups,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
}

fn parse_head(head: Option<&Result<Snapshot>>, config: &ReaderConfig) -> Result<Vec<ParticleGroup>> {
    match head {
        None => Err(Bi4Error::not_found(format!("head file ({})", super::HEAD_FILE_PATTERN))),
        Some(Err(e)) => Err(e.clone()),
        Some(Ok(snap)) => parse_particle_groups(snap, config.field_scope),
    }
}

fn load_one(name: String, path: PathBuf) -> (String, Result<Snapshot>) {
    let result = Snapshot::open(&path);
    if let Err(e) = &result {
        warn!("{}: {}", name, e);
    }
    (name, result)
}

#[cfg(feature = "parallel")]
fn load_all(paths: Vec<(String, PathBuf)>, parallel: bool) -> PerFile<Snapshot> {
    use rayon::prelude::*;

    if parallel {
        paths
            .into_par_iter()
            .map(|(name, path)| load_one(name, path))
            .collect()
    } else {
        paths
            .into_iter()
            .map(|(name, path)| load_one(name, path))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn load_all(paths: Vec<(String, PathBuf)>, _parallel: bool) -> PerFile<Snapshot> {
    paths
        .into_iter()
        .map(|(name, path)| load_one(name, path))
        .collect()
}

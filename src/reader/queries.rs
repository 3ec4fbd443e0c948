use log::warn;

use super::{Bi4Reader, PerFile};
use crate::array::{ArrayKey, ParticleArray};
use crate::dtype::Value;
use crate::error::{Bi4Error, Result};
use crate::head::ParticleGroup;
use crate::registry::{CountKey, ScalarSpec, CASE_POS_MAX, CASE_POS_MIN};
use crate::scalar::PropertyValue;
use crate::snapshot::Snapshot;

impl Bi4Reader {
    /// Names of all discovered snapshot files, sorted
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.snapshots.keys().map(String::as_str)
    }

    /// Number of discovered snapshot files
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True if no snapshot files were discovered
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot files that failed to load, with their errors
    pub fn load_errors(&self) -> Vec<(&str, &Bi4Error)> {
        self.snapshots
            .iter()
            .filter_map(|(name, loaded)| loaded.as_ref().err().map(|e| (name.as_str(), e)))
            .collect()
    }

    /// One loaded snapshot
    pub fn snapshot(&self, file: &str) -> Result<&Snapshot> {
        match self.snapshots.get(file) {
            Some(Ok(snap)) => Ok(snap),
            Some(Err(e)) => Err(e.clone()),
            None => Err(Bi4Error::not_found(format!("snapshot file {:?}", file))),
        }
    }

    /// The head file
    pub fn head(&self) -> Result<&Snapshot> {
        match &self.head {
            Some(Ok(snap)) => Ok(snap),
            Some(Err(e)) => Err(e.clone()),
            None => Err(Bi4Error::not_found(format!(
                "head file ({})",
                super::HEAD_FILE_PATTERN
            ))),
        }
    }

    /// Particle groups parsed from the head file
    pub fn particle_groups(&self) -> Result<&[ParticleGroup]> {
        match &self.groups {
            Ok(groups) => Ok(groups.as_slice()),
            Err(e) => Err(e.clone()),
        }
    }

    /// Simulation time of every snapshot
    pub fn times(&self) -> PerFile<f64> {
        self.per_file(Snapshot::time)
    }

    /// Simulation time of one snapshot
    pub fn time_of(&self, file: &str) -> Result<f64> {
        self.snapshot(file)?.time()
    }

    /// Particle count under `key` in every snapshot
    pub fn particle_counts(&self, key: &str) -> PerFile<i32> {
        self.per_file(|snap| snap.particle_count(key))
    }

    /// Particle count for a well-known key in every snapshot
    pub fn counts(&self, key: CountKey) -> PerFile<i32> {
        self.particle_counts(key.marker())
    }

    /// Particle count under `key` in one snapshot
    pub fn count_of(&self, file: &str, key: &str) -> Result<i32> {
        self.snapshot(file)?.particle_count(key)
    }

    /// Simulation-wide property, read from the head file
    pub fn property(&self, spec: &ScalarSpec) -> Result<PropertyValue> {
        self.head()?.property(spec)
    }

    /// Domain bounds: `CasePosMin` followed by `CasePosMax`
    pub fn case_range(&self) -> Result<Vec<Value>> {
        let mut range = self.property(&CASE_POS_MIN)?.values();
        range.extend(self.property(&CASE_POS_MAX)?.values());
        Ok(range)
    }

    /// Array `key` from every snapshot
    pub fn arrays(&self, key: &ArrayKey) -> PerFile<ParticleArray> {
        self.per_file(|snap| snap.array(key))
    }

    /// Array `key` from one snapshot
    pub fn array_of(&self, file: &str, key: &ArrayKey) -> Result<ParticleArray> {
        self.snapshot(file)?.array(key)
    }

    /// Rows of array `key` in `file` that belong to `group`
    pub fn group_array(
        &self,
        file: &str,
        key: &ArrayKey,
        group: &ParticleGroup,
    ) -> Result<ParticleArray> {
        let begin = usize::try_from(group.begin)
            .map_err(|_| Bi4Error::Format(format!("negative group begin {}", group.begin)))?;
        let count = usize::try_from(group.count)
            .map_err(|_| Bi4Error::Format(format!("negative group count {}", group.count)))?;
        self.array_of(file, key)?.rows(begin, count)
    }

    /// Run `query` against every snapshot, isolating failures per file
    pub fn per_file<T, F>(&self, query: F) -> PerFile<T>
    where
        T: Send,
        F: Fn(&Snapshot) -> Result<T> + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                use rayon::prelude::*;
                return self
                    .snapshots
                    .par_iter()
                    .map(|(name, loaded)| (name.clone(), run_query(name, loaded, &query)))
                    .collect();
            }
        }

        self.snapshots
            .iter()
            .map(|(name, loaded)| (name.clone(), run_query(name, loaded, &query)))
            .collect()
    }
}

fn run_query<T, F>(name: &str, loaded: &Result<Snapshot>, query: &F) -> Result<T>
where
    F: Fn(&Snapshot) -> Result<T>,
{
    let snap = loaded.as_ref().map_err(Clone::clone)?;
    let result = query(snap);
    if let Err(e) = &result {
        warn!("{}: {}", name, e);
    }
    result
}

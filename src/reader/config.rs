use serde::Deserialize;

use crate::head::FieldScope;

/// Configuration for reading a set of BI4 files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Where head-file group fields are searched
    pub field_scope: FieldScope,
    /// Load and query snapshots on the rayon pool
    ///
    /// Only honoured when the `parallel` feature is enabled.
    pub parallel: bool,
}

impl ReaderConfig {
    /// Read group fields from each head block rather than the whole file
    pub fn with_block_scoped_groups(mut self, enabled: bool) -> Self {
        self.field_scope = if enabled {
            FieldScope::Block
        } else {
            FieldScope::WholeBuffer
        };
        self
    }

    /// Enable or disable parallel loading and querying
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }
}

/// Serializable subset of [`ReaderConfig`] for config files
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReaderSettings {
    /// Read group fields per head block
    pub block_scoped_groups: Option<bool>,
    /// Parallel loading and querying
    pub parallel: Option<bool>,
}

impl ReaderSettings {
    /// Apply the settings that are present on top of `base`
    pub fn apply(&self, base: ReaderConfig) -> ReaderConfig {
        let mut config = base;
        if let Some(block) = self.block_scoped_groups {
            config = config.with_block_scoped_groups(block);
        }
        if let Some(parallel) = self.parallel {
            config = config.with_parallel(parallel);
        }
        config
    }
}

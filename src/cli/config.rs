//! TOML configuration file support.
//!
//! Instead of repeating CLI flags, settings can live in a config file:
//!
//! ```toml
//! # bi4.toml
//! [reader]
//! data_dir = "./data"
//! block_scoped_groups = false
//! parallel = true
//! ```
//!
//! Command-line flags take precedence over the file.

use anyhow::{Context, Result};
use bi4::reader::ReaderSettings;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure for bi4.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Reader settings.
    #[serde(default)]
    pub reader: ReaderSection,
}

/// The `[reader]` table.
#[derive(Debug, Default, Deserialize)]
pub struct ReaderSection {
    /// Directory holding the Part_XXXX.bi4 and Part_Head files.
    pub data_dir: Option<PathBuf>,

    /// Decoding options shared with the library.
    #[serde(flatten)]
    pub settings: ReaderSettings,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [reader]
            data_dir = "/cases/dambreak/out"
            block_scoped_groups = true
            parallel = false
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(
            config.reader.data_dir,
            Some(PathBuf::from("/cases/dambreak/out"))
        );
        assert_eq!(config.reader.settings.block_scoped_groups, Some(true));
        assert_eq!(config.reader.settings.parallel, Some(false));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [reader]
            parallel = true
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.reader.data_dir, None);
        assert_eq!(config.reader.settings.parallel, Some(true));
        assert_eq!(config.reader.settings.block_scoped_groups, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert!(config.reader.data_dir.is_none());
    }
}

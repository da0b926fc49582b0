//! Shell configuration, loaded once at startup.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Wrapper directory expected at the top of the archive, stripped from
/// every entry before tree construction.
pub const DEFAULT_ARCHIVE_ROOT: &str = "virtual_fs";

/// Startup configuration.
///
/// Read from a JSON file; both paths are required, the archive root is
/// optional and defaults to [`DEFAULT_ARCHIVE_ROOT`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the tar archive holding the virtual filesystem.
    pub virtual_fs_path: PathBuf,
    /// Path of the JSON action log.
    pub log_file_path: PathBuf,
    /// Name of the archive's wrapper directory.
    #[serde(default = "default_archive_root")]
    pub archive_root: String,
}

fn default_archive_root() -> String {
    DEFAULT_ARCHIVE_ROOT.to_string()
}

/// Configuration loading errors. These are startup failures: the binary
/// reports them and exits non-zero.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

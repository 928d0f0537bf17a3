//! Configuration file loading.
//!
//! A config file holds the settings shared by many runs; the log directory
//! path itself usually comes from the command line. Every key is optional:
//!
//! ```yaml
//! mode: timestamp
//! environ: [CUDA_VISIBLE_DEVICES, SLURM_JOB_ID]
//! store_git_diff: false
//! search_from: /srv/project
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LogDirError, Result};
use crate::resolver::CollisionMode;

use super::LogDirOptions;

/// Contents of a tinylogdir config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub mode: Option<CollisionMode>,
    #[serde(default)]
    pub environ: Option<Vec<String>>,
    #[serde(default)]
    pub store_git_diff: Option<bool>,
    #[serde(default)]
    pub search_from: Option<PathBuf>,
}

impl ConfigFile {
    /// Overlay the settings present in this file onto `options`.
    pub fn apply(self, mut options: LogDirOptions) -> LogDirOptions {
        if let Some(mode) = self.mode {
            options.mode = Some(mode);
        }
        if let Some(environ) = self.environ {
            options.environ = environ;
        }
        if let Some(store) = self.store_git_diff {
            options.store_git_diff = store;
        }
        if let Some(dir) = self.search_from {
            options.search_from = Some(dir);
        }
        options
    }
}

/// Load a config file from disk.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    parse_config(&read_config_source(path)?, path)
}

/// Read a YAML file, reporting a missing file as [`LogDirError::ConfigNotFound`].
pub(crate) fn read_config_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LogDirError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LogDirError::Io(e)
        }
    })
}

/// Parse YAML content into a [`ConfigFile`].
///
/// `source_path` is only used for error reporting. An empty document is an
/// empty config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ConfigFile> {
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(content).map_err(|e| LogDirError::ConfigParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

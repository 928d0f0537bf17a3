//! The run metadata document (`tinylogdir.yaml`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LogDirError, Result};

/// File name of the metadata document inside a log directory.
pub const METADATA_FILE: &str = "tinylogdir.yaml";

/// File name of the uncommitted diff inside a log directory.
pub const DIFF_FILE: &str = "gitdiff.patch";

/// Snapshot of how a run was launched.
///
/// Field order is the key order of the written YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Program name and arguments joined by spaces.
    pub cmd: String,
    /// Working directory of the process.
    pub cwd: String,
    pub hostname: String,
    /// Local time, ISO-8601 at second precision.
    pub time: String,
    pub pid: u32,
    pub user: String,
    /// Enclosing repository, if one was found and could be read.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub git: Option<GitInfo>,
    /// Requested environment variables that were set.
    #[serde(default)]
    pub environ: BTreeMap<String, String>,
}

/// Version control section of the metadata document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitInfo {
    /// Repository root.
    pub path: String,
    /// Revision checked out when the run started.
    pub commit: String,
}

impl RunMetadata {
    /// Path of the metadata document inside `dir`.
    pub fn file_in(dir: &Path) -> PathBuf {
        dir.join(METADATA_FILE)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Write the document into `dir`, returning the file path.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = Self::file_in(dir);
        let yaml = self.to_yaml().map_err(|e| LogDirError::Metadata {
            path: path.clone(),
            message: e.to_string(),
        })?;
        fs::write(&path, yaml)?;
        Ok(path)
    }

    /// Read the document previously written into `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::file_in(dir);
        let yaml = fs::read_to_string(&path)?;
        serde_yaml::from_str(&yaml).map_err(|e| LogDirError::Metadata {
            path,
            message: e.to_string(),
        })
    }
}

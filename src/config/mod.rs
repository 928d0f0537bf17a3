//! Log directory configuration.
//!
//! [`LogDirOptions`] carries everything needed to set up a session: the
//! requested path, the collision mode, which environment variables to record
//! and whether to save the uncommitted diff. Options are built in code,
//! read whole from a YAML file with [`LogDirOptions::from_yaml_file`], or
//! layered from a shared config file (see [`loader`]).
//!
//! # Example
//!
//! ```
//! use tinylogdir::config::LogDirOptions;
//! use tinylogdir::resolver::CollisionMode;
//!
//! let options = LogDirOptions::new("runs/exp")
//!     .mode_str("t")
//!     .unwrap()
//!     .environ(["CUDA_VISIBLE_DEVICES"])
//!     .store_git_diff(false);
//!
//! assert_eq!(options.mode, Some(CollisionMode::Timestamp));
//! assert!(LogDirOptions::new("runs/exp").mode_str("sometimes").is_err());
//! ```

pub mod loader;

pub use loader::{load_config_file, parse_config, ConfigFile};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{LogDirError, Result};
use crate::resolver::CollisionMode;

/// Environment variables recorded when none are configured.
pub const DEFAULT_ENVIRON: &[&str] = &["CUDA_VISIBLE_DEVICES", "STY"];

/// Options for creating a log directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDirOptions {
    /// Requested directory.
    pub path: PathBuf,

    /// Collision mode; `None` asks interactively.
    #[serde(default)]
    pub mode: Option<CollisionMode>,

    /// Environment variables to record.
    #[serde(default = "default_environ")]
    pub environ: Vec<String>,

    /// Save `git diff -p HEAD` next to the metadata.
    #[serde(default = "default_store_git_diff")]
    pub store_git_diff: bool,

    /// Where the repository search starts. Defaults to the program's
    /// directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_from: Option<PathBuf>,
}

fn default_environ() -> Vec<String> {
    DEFAULT_ENVIRON.iter().map(|s| s.to_string()).collect()
}

fn default_store_git_diff() -> bool {
    true
}

impl LogDirOptions {
    /// Options for `path` with every other setting at its default.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: None,
            environ: default_environ(),
            store_git_diff: default_store_git_diff(),
            search_from: None,
        }
    }

    /// Read options from a YAML document that names at least `path`.
    ///
    /// ```yaml
    /// path: runs/exp
    /// mode: timestamp
    /// environ: [CUDA_VISIBLE_DEVICES]
    /// ```
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = loader::read_config_source(path)?;
        serde_yaml::from_str(&content).map_err(|e| LogDirError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Set the collision mode.
    pub fn mode(mut self, mode: CollisionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the collision mode from its string form (`d`, `timestamp`, ...).
    pub fn mode_str(self, mode: &str) -> Result<Self> {
        Ok(self.mode(mode.parse()?))
    }

    /// Replace the recorded environment variables.
    pub fn environ<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environ = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable saving the uncommitted diff.
    pub fn store_git_diff(mut self, store: bool) -> Self {
        self.store_git_diff = store;
        self
    }

    /// Start the repository search at `dir`.
    pub fn search_from(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_from = Some(dir.into());
        self
    }
}

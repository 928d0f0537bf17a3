//! The log directory session.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

use crate::config::LogDirOptions;
use crate::error::{LogDirError, Result};
use crate::recorder::{
    GitProbe, ProcessContext, RunMetadata, RunRecorder, SystemContext, VersionControlProbe,
};
use crate::resolver::resolve;
use crate::ui::{create_prompt, ConflictPrompt};

/// One run's log directory.
///
/// Creating a `LogDir` resolves the requested path into a fresh directory and
/// records `tinylogdir.yaml` inside it. The directory exists for as long as
/// the `LogDir` does, unless something outside this process removes it.
#[derive(Debug)]
pub struct LogDir {
    path: PathBuf,
    metadata: RunMetadata,
    lock: Mutex<()>,
}

impl LogDir {
    /// Create a log directory, prompting on the terminal if it already
    /// exists and no mode is set.
    pub fn create(options: &LogDirOptions) -> Result<Self> {
        let mut prompt = create_prompt(true);
        Self::create_with(options, prompt.as_mut(), &SystemContext, &GitProbe)
    }

    /// Create a log directory with explicit collaborators.
    pub fn create_with(
        options: &LogDirOptions,
        prompt: &mut dyn ConflictPrompt,
        context: &dyn ProcessContext,
        vcs: &dyn VersionControlProbe,
    ) -> Result<Self> {
        let desired = std::path::absolute(&options.path)?;
        let path = resolve(&desired, options.mode, prompt)?;

        let metadata = RunRecorder::new(context, vcs)
            .search_from(options.search_from.clone())
            .record(&path, &options.environ, options.store_git_diff)?;

        Ok(Self {
            path,
            metadata,
            lock: Mutex::new(()),
        })
    }

    /// Absolute path of the log directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The metadata recorded when the directory was created.
    pub fn metadata(&self) -> &RunMetadata {
        &self.metadata
    }

    /// Path of `relative` inside the log directory, created if missing.
    pub fn subdir(&self, relative: impl AsRef<Path>) -> Result<PathBuf> {
        self.subdir_with(relative, true)
    }

    /// Path of `relative` inside the log directory.
    ///
    /// With `create == false` the path is returned whether or not it exists.
    /// An empty `relative` is the log directory itself. Absolute paths and
    /// paths occupied by a file are rejected. `..` components are not
    /// checked, so `../other` points outside the log directory. Safe to call
    /// from several threads at once.
    pub fn subdir_with(&self, relative: impl AsRef<Path>, create: bool) -> Result<PathBuf> {
        let relative = relative.as_ref();
        if relative.is_absolute() || relative.has_root() {
            return Err(LogDirError::RelativePathRequired {
                path: relative.to_path_buf(),
            });
        }
        if relative.as_os_str().is_empty() {
            return Ok(self.path.clone());
        }

        let path = self.path.join(relative);
        if path.is_dir() {
            return Ok(path);
        }

        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        if path.is_file() {
            return Err(LogDirError::NotADirectory { path });
        }
        if create && !path.is_dir() {
            debug!(path = %path.display(), "creating subdirectory");
            fs::create_dir_all(&path)?;
        }
        Ok(path)
    }
}

impl AsRef<Path> for LogDir {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

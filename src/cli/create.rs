//! Create command implementation.
//!
//! `tinylogdir <PATH>` resolves the log directory, records the run, creates
//! any requested subdirectories and prints where everything ended up.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{load_config_file, LogDirOptions};
use crate::error::Result;
use crate::recorder::{ProcessContext, VersionControlProbe};
use crate::session::LogDir;
use crate::ui::ConflictPrompt;

use super::args::Cli;

/// What the command created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateOutput {
    /// The resolved log directory.
    pub path: PathBuf,
    /// Subdirectories created inside it.
    pub subdirs: Vec<PathBuf>,
}

impl CreateOutput {
    /// Text printed to stdout.
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            return Ok(serde_json::to_string_pretty(self).map_err(anyhow::Error::from)?);
        }
        let mut lines = vec![self.path.display().to_string()];
        lines.extend(self.subdirs.iter().map(|p| p.display().to_string()));
        Ok(lines.join("\n"))
    }
}

/// The create command implementation.
pub struct CreateCommand<'a> {
    cli: &'a Cli,
}

impl<'a> CreateCommand<'a> {
    /// Create a new create command.
    pub fn new(cli: &'a Cli) -> Self {
        Self { cli }
    }

    /// Layer defaults, the config file and command-line flags into options.
    ///
    /// The repository search starts at `cwd` unless configured otherwise.
    pub fn options(&self, cwd: &Path) -> Result<LogDirOptions> {
        let mut options = LogDirOptions::new(&self.cli.path);
        options.search_from = Some(cwd.to_path_buf());

        if let Some(config_path) = &self.cli.config {
            options = load_config_file(config_path)?.apply(options);
        }

        if let Some(mode) = self.cli.mode {
            options.mode = Some(mode);
        }
        if !self.cli.environ.is_empty() {
            options.environ = self.cli.environ.clone();
        }
        if self.cli.no_git_diff {
            options.store_git_diff = false;
        }
        if let Some(dir) = &self.cli.search_from {
            options.search_from = Some(dir.clone());
        }

        Ok(options)
    }

    /// Run the command.
    pub fn execute(
        &self,
        prompt: &mut dyn ConflictPrompt,
        context: &dyn ProcessContext,
        vcs: &dyn VersionControlProbe,
    ) -> Result<CreateOutput> {
        let options = self.options(&context.cwd()?)?;
        tracing::debug!(?options, "creating log directory");

        let logdir = LogDir::create_with(&options, prompt, context, vcs)?;
        let subdirs = self
            .cli
            .subdirs
            .iter()
            .map(|rel| logdir.subdir(rel))
            .collect::<Result<Vec<_>>>()?;

        Ok(CreateOutput {
            path: logdir.path().to_path_buf(),
            subdirs,
        })
    }
}

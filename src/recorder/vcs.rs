//! Version control lookup.
//!
//! The recorder only needs three things from version control: the enclosing
//! repository, its current revision, and the uncommitted diff. `GitProbe`
//! gets them from the `git` binary.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// An enclosing repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Directory containing the version control marker.
    pub root: PathBuf,
}

/// Capability interface over a version control system.
pub trait VersionControlProbe {
    /// Nearest ancestor of `start` (inclusive) that is a repository root.
    fn find_repository(&self, start: &Path) -> Option<Repository>;

    /// Current revision identifier.
    fn revision(&self, repo: &Repository) -> Result<String>;

    /// Uncommitted changes against the current revision, as a patch.
    fn diff(&self, repo: &Repository) -> Result<Vec<u8>>;
}

/// Git implementation of [`VersionControlProbe`].
#[derive(Debug, Default, Clone, Copy)]
pub struct GitProbe;

impl GitProbe {
    fn run(&self, repo: &Repository, args: &[&str]) -> Result<Vec<u8>> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&repo.root)
            .output()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

        if !output.status.success() {
            bail!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(output.stdout)
    }
}

impl VersionControlProbe for GitProbe {
    fn find_repository(&self, start: &Path) -> Option<Repository> {
        let found = start
            .ancestors()
            .find(|dir| dir.join(".git").is_dir())
            .map(|dir| Repository {
                root: dir.to_path_buf(),
            });
        debug!(start = %start.display(), found = ?found, "repository search");
        found
    }

    fn revision(&self, repo: &Repository) -> Result<String> {
        let out = self.run(repo, &["rev-parse", "HEAD"])?;
        let sha = String::from_utf8_lossy(&out).trim().to_string();
        if sha.is_empty() {
            bail!("git rev-parse HEAD printed nothing");
        }
        Ok(sha)
    }

    fn diff(&self, repo: &Repository) -> Result<Vec<u8>> {
        self.run(repo, &["diff", "-p", "HEAD"])
    }
}

/// Probe that never finds a repository.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoVersionControl;

impl VersionControlProbe for NoVersionControl {
    fn find_repository(&self, _start: &Path) -> Option<Repository> {
        None
    }

    fn revision(&self, repo: &Repository) -> Result<String> {
        bail!("version control disabled ({})", repo.root.display())
    }

    fn diff(&self, repo: &Repository) -> Result<Vec<u8>> {
        bail!("version control disabled ({})", repo.root.display())
    }
}

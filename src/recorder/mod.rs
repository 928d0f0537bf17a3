//! Run recording.
//!
//! Captures how the current process was launched and writes it into a log
//! directory as [`METADATA_FILE`]. When the program lives inside a git
//! repository the revision is recorded too, and optionally the uncommitted
//! diff is saved as [`DIFF_FILE`].
//!
//! # Example
//!
//! ```
//! use tinylogdir::recorder::{NoVersionControl, RunRecorder, SystemContext, METADATA_FILE};
//!
//! let temp = tempfile::tempdir().unwrap();
//! let recorder = RunRecorder::new(&SystemContext, &NoVersionControl);
//! let meta = recorder.record(temp.path(), &["PATH".to_string()], false).unwrap();
//!
//! assert_eq!(meta.pid, std::process::id());
//! assert!(meta.environ.contains_key("PATH"));
//! assert!(temp.path().join(METADATA_FILE).is_file());
//! ```

mod context;
mod metadata;
mod vcs;

pub use context::{ProcessContext, SystemContext};
pub use metadata::{GitInfo, RunMetadata, DIFF_FILE, METADATA_FILE};
pub use vcs::{GitProbe, NoVersionControl, Repository, VersionControlProbe};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Writes the run metadata document for one log directory.
pub struct RunRecorder<'a> {
    context: &'a dyn ProcessContext,
    vcs: &'a dyn VersionControlProbe,
    search_from: Option<PathBuf>,
}

impl<'a> RunRecorder<'a> {
    /// Create a recorder reading from `context` and `vcs`.
    pub fn new(context: &'a dyn ProcessContext, vcs: &'a dyn VersionControlProbe) -> Self {
        Self {
            context,
            vcs,
            search_from: None,
        }
    }

    /// Start the repository search at `dir` instead of the program's
    /// directory.
    pub fn search_from(mut self, dir: Option<PathBuf>) -> Self {
        self.search_from = dir;
        self
    }

    /// Capture the run into `dir`.
    ///
    /// Unset variables in `environ` are skipped. Version control problems
    /// drop the `git` section; write failures are returned.
    pub fn record(&self, dir: &Path, environ: &[String], capture_diff: bool) -> Result<RunMetadata> {
        let meta = RunMetadata {
            cmd: self.context.args().join(" "),
            cwd: self.context.cwd()?.display().to_string(),
            hostname: self.context.hostname(),
            time: self.context.now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            pid: self.context.pid(),
            user: self.context.user(),
            git: self.capture_git(dir, capture_diff)?,
            environ: self.capture_environ(environ),
        };

        let path = meta.write(dir)?;
        info!("Wrote run metadata to {}", path.display());
        Ok(meta)
    }

    fn capture_environ(&self, keys: &[String]) -> BTreeMap<String, String> {
        keys.iter()
            .filter_map(|key| {
                let value = self.context.env_var(key);
                if value.is_none() {
                    debug!(key = %key, "environment variable not set, skipping");
                }
                value.map(|v| (key.clone(), v))
            })
            .collect()
    }

    fn capture_git(&self, dir: &Path, capture_diff: bool) -> Result<Option<GitInfo>> {
        let start = match self.search_from.clone().or_else(|| self.context.program_dir()) {
            Some(start) => start,
            None => return Ok(None),
        };
        let Some(repo) = self.vcs.find_repository(&start) else {
            debug!(start = %start.display(), "no enclosing repository");
            return Ok(None);
        };

        let commit = match self.vcs.revision(&repo) {
            Ok(commit) => commit,
            Err(e) => {
                warn!(repo = %repo.root.display(), "Could not read revision: {:#}", e);
                return Ok(None);
            }
        };

        if capture_diff {
            match self.vcs.diff(&repo) {
                Ok(patch) => fs::write(dir.join(DIFF_FILE), patch)?,
                Err(e) => warn!(repo = %repo.root.display(), "Could not capture diff: {:#}", e),
            }
        }

        Ok(Some(GitInfo {
            path: repo.root.display().to_string(),
            commit,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct FakeContext {
        env: HashMap<String, String>,
        program_dir: Option<PathBuf>,
    }

    impl FakeContext {
        fn new() -> Self {
            Self {
                env: HashMap::new(),
                program_dir: Some(PathBuf::from("/opt/exp/scripts")),
            }
        }

        fn with_env(mut self, key: &str, value: &str) -> Self {
            self.env.insert(key.to_string(), value.to_string());
            self
        }
    }

    impl ProcessContext for FakeContext {
        fn args(&self) -> Vec<String> {
            vec!["train".to_string(), "--epochs".to_string(), "3".to_string()]
        }

        fn cwd(&self) -> std::io::Result<PathBuf> {
            Ok(PathBuf::from("/opt/exp"))
        }

        fn hostname(&self) -> String {
            "gpu01".to_string()
        }

        fn user(&self) -> String {
            "alice".to_string()
        }

        fn pid(&self) -> u32 {
            777
        }

        fn env_var(&self, key: &str) -> Option<String> {
            self.env.get(key).cloned()
        }

        fn now(&self) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_micro_opt(12, 30, 5, 123_456)
                .unwrap()
        }

        fn program_dir(&self) -> Option<PathBuf> {
            self.program_dir.clone()
        }
    }

    /// Probe with a fixed repository and scripted results.
    struct FakeVcs {
        root: Option<PathBuf>,
        revision_ok: bool,
        diff_ok: bool,
        searched: Mutex<Vec<PathBuf>>,
    }

    impl FakeVcs {
        fn repo(root: &str) -> Self {
            Self {
                root: Some(PathBuf::from(root)),
                revision_ok: true,
                diff_ok: true,
                searched: Mutex::new(Vec::new()),
            }
        }
    }

    impl VersionControlProbe for FakeVcs {
        fn find_repository(&self, start: &Path) -> Option<Repository> {
            self.searched.lock().unwrap().push(start.to_path_buf());
            self.root.clone().map(|root| Repository { root })
        }

        fn revision(&self, _repo: &Repository) -> anyhow::Result<String> {
            if !self.revision_ok {
                bail!("fatal: ambiguous argument 'HEAD'");
            }
            Ok("0123456789abcdef0123456789abcdef01234567".to_string())
        }

        fn diff(&self, _repo: &Repository) -> anyhow::Result<Vec<u8>> {
            if !self.diff_ok {
                bail!("diff failed");
            }
            Ok(b"diff --git a/x b/x\n-old\n+new\n".to_vec())
        }
    }

    #[test]
    fn records_process_facts() {
        let temp = TempDir::new().unwrap();
        let ctx = FakeContext::new();

        let meta = RunRecorder::new(&ctx, &NoVersionControl)
            .record(temp.path(), &[], true)
            .unwrap();

        assert_eq!(meta.cmd, "train --epochs 3");
        assert_eq!(meta.cwd, "/opt/exp");
        assert_eq!(meta.hostname, "gpu01");
        assert_eq!(meta.time, "2024-05-01T12:30:05");
        assert_eq!(meta.pid, 777);
        assert_eq!(meta.user, "alice");
        assert!(meta.git.is_none());
        assert_eq!(RunMetadata::load(temp.path()).unwrap(), meta);
    }

    #[test]
    fn unset_environment_variables_are_skipped() {
        let temp = TempDir::new().unwrap();
        let ctx = FakeContext::new();

        let meta = RunRecorder::new(&ctx, &NoVersionControl)
            .record(temp.path(), &["FOO".to_string()], false)
            .unwrap();

        assert!(!meta.environ.contains_key("FOO"));
        let loaded = RunMetadata::load(temp.path()).unwrap();
        assert!(loaded.environ.is_empty());
    }

    #[test]
    fn set_environment_variables_are_recorded() {
        let temp = TempDir::new().unwrap();
        let ctx = FakeContext::new()
            .with_env("FOO", "bar")
            .with_env("IGNORED", "x");

        let meta = RunRecorder::new(&ctx, &NoVersionControl)
            .record(temp.path(), &["FOO".to_string(), "STY".to_string()], false)
            .unwrap();

        assert_eq!(meta.environ.get("FOO").map(String::as_str), Some("bar"));
        assert_eq!(meta.environ.len(), 1);
    }

    #[test]
    fn records_repository_and_diff() {
        let temp = TempDir::new().unwrap();
        let ctx = FakeContext::new();
        let vcs = FakeVcs::repo("/opt/exp");

        let meta = RunRecorder::new(&ctx, &vcs)
            .record(temp.path(), &[], true)
            .unwrap();

        let git = meta.git.unwrap();
        assert_eq!(git.path, "/opt/exp");
        assert_eq!(git.commit, "0123456789abcdef0123456789abcdef01234567");
        let patch = fs::read_to_string(temp.path().join(DIFF_FILE)).unwrap();
        assert!(patch.contains("+new"));
        assert_eq!(
            *vcs.searched.lock().unwrap(),
            [PathBuf::from("/opt/exp/scripts")]
        );
    }

    #[test]
    fn diff_skipped_when_disabled() {
        let temp = TempDir::new().unwrap();
        let ctx = FakeContext::new();
        let vcs = FakeVcs::repo("/opt/exp");

        let meta = RunRecorder::new(&ctx, &vcs)
            .record(temp.path(), &[], false)
            .unwrap();

        assert!(meta.git.is_some());
        assert!(!temp.path().join(DIFF_FILE).exists());
    }

    #[test]
    fn failed_revision_omits_git_section() {
        let temp = TempDir::new().unwrap();
        let ctx = FakeContext::new();
        let vcs = FakeVcs {
            revision_ok: false,
            ..FakeVcs::repo("/opt/exp")
        };

        let meta = RunRecorder::new(&ctx, &vcs)
            .record(temp.path(), &[], true)
            .unwrap();

        assert!(meta.git.is_none());
        assert!(!temp.path().join(DIFF_FILE).exists());
        let yaml = fs::read_to_string(temp.path().join(METADATA_FILE)).unwrap();
        assert!(!yaml.contains("git:"));
    }

    #[test]
    fn failed_diff_keeps_git_section() {
        let temp = TempDir::new().unwrap();
        let ctx = FakeContext::new();
        let vcs = FakeVcs {
            diff_ok: false,
            ..FakeVcs::repo("/opt/exp")
        };

        let meta = RunRecorder::new(&ctx, &vcs)
            .record(temp.path(), &[], true)
            .unwrap();

        assert!(meta.git.is_some());
        assert!(!temp.path().join(DIFF_FILE).exists());
    }

    #[test]
    fn search_start_can_be_overridden() {
        let temp = TempDir::new().unwrap();
        let ctx = FakeContext::new();
        let vcs = FakeVcs::repo("/srv/project");

        RunRecorder::new(&ctx, &vcs)
            .search_from(Some(PathBuf::from("/srv/project/sub")))
            .record(temp.path(), &[], false)
            .unwrap();

        assert_eq!(
            *vcs.searched.lock().unwrap(),
            [PathBuf::from("/srv/project/sub")]
        );
    }

    #[test]
    fn no_program_dir_means_no_search() {
        let temp = TempDir::new().unwrap();
        let ctx = FakeContext {
            program_dir: None,
            ..FakeContext::new()
        };
        let vcs = FakeVcs::repo("/opt/exp");

        let meta = RunRecorder::new(&ctx, &vcs)
            .record(temp.path(), &[], true)
            .unwrap();

        assert!(meta.git.is_none());
        assert!(vcs.searched.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let ctx = FakeContext::new();

        let result = RunRecorder::new(&ctx, &NoVersionControl).record(
            &temp.path().join("gone"),
            &[],
            false,
        );

        assert!(result.is_err());
    }
}

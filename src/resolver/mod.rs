//! Log directory resolution.
//!
//! Turns a requested path plus a [`CollisionMode`] into a directory that
//! exists and was created by this call. Candidates for the `timestamp` and
//! `counter` modes are always derived from the originally requested path, so
//! losing a creation race simply produces the next candidate.
//!
//! # Example
//!
//! ```
//! use tinylogdir::resolver::{resolve, CollisionMode};
//! use tinylogdir::ui::NonInteractivePrompt;
//!
//! let temp = tempfile::tempdir().unwrap();
//! let base = temp.path().join("run");
//! std::fs::create_dir(&base).unwrap();
//!
//! let dir = resolve(&base, Some(CollisionMode::Counter), &mut NonInteractivePrompt).unwrap();
//! assert!(dir.ends_with("run-1"));
//! assert!(dir.is_dir());
//! ```

mod mode;

pub use mode::CollisionMode;

use chrono::NaiveDateTime;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{LogDirError, Result};
use crate::ui::ConflictPrompt;

/// Pause before regenerating a timestamp candidate that is already taken.
pub const TIMESTAMP_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Resolve `desired` into a freshly created directory.
///
/// With `mode == None` a plain creation is attempted first and `prompt` is
/// asked for a mode only if the directory already exists. Answers that are
/// not a valid mode are rejected and asked again.
pub fn resolve(
    desired: &Path,
    mode: Option<CollisionMode>,
    prompt: &mut dyn ConflictPrompt,
) -> Result<PathBuf> {
    resolve_with(desired, mode, prompt, &occupied)
}

/// [`resolve`] with the check that decides whether a candidate is taken.
///
/// The check only steers candidate generation. Creation itself still fails
/// on an existing path, which moves on to the next candidate.
fn resolve_with(
    desired: &Path,
    mode: Option<CollisionMode>,
    prompt: &mut dyn ConflictPrompt,
    is_taken: &dyn Fn(&Path) -> bool,
) -> Result<PathBuf> {
    let mut mode = mode;

    loop {
        let candidate = match mode {
            None => desired.to_path_buf(),
            Some(CollisionMode::Delete) => {
                clear_existing(desired)?;
                desired.to_path_buf()
            }
            Some(CollisionMode::Timestamp) => next_timestamp_candidate(desired, is_taken),
            Some(CollisionMode::Counter) => next_counter_candidate(desired, is_taken),
        };
        debug!(candidate = %candidate.display(), ?mode, "trying log directory");

        match create_fresh(&candidate) {
            Ok(()) => {
                info!("Created directory {}", candidate.display());
                return Ok(candidate);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => match mode {
                None => mode = Some(ask_mode(prompt, &candidate)?),
                Some(m) => debug!(
                    candidate = %candidate.display(),
                    mode = %m,
                    "candidate appeared before it could be created, retrying"
                ),
            },
            Err(e) => return Err(e.into()),
        }
    }
}

/// Keep asking until the answer names a valid mode.
fn ask_mode(prompt: &mut dyn ConflictPrompt, path: &Path) -> Result<CollisionMode> {
    loop {
        let answer = prompt.choose(path)?;
        match answer.parse::<CollisionMode>() {
            Ok(mode) => return Ok(mode),
            Err(_) => {
                warn!(answer = %answer, "Invalid option");
                prompt.reject(&answer);
            }
        }
    }
}

/// Remove `path` if it is a directory. Anything else in the way is an error.
fn clear_existing(path: &Path) -> Result<()> {
    if path.is_dir() {
        info!("Deleting directory {}", path.display());
        fs::remove_dir_all(path)?;
    } else if path.symlink_metadata().is_ok() {
        return Err(LogDirError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Create `path` and any missing parents, failing with `AlreadyExists` if
/// `path` itself is already there.
fn create_fresh(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::create_dir(path)
}

fn next_timestamp_candidate(base: &Path, is_taken: &dyn Fn(&Path) -> bool) -> PathBuf {
    loop {
        let now = chrono::Local::now().naive_local();
        let candidate = with_suffix(base, &timestamp_suffix(now));
        if !is_taken(&candidate) {
            return candidate;
        }
        thread::sleep(TIMESTAMP_RETRY_DELAY);
    }
}

fn next_counter_candidate(base: &Path, is_taken: &dyn Fn(&Path) -> bool) -> PathBuf {
    (1u64..)
        .map(|n| with_suffix(base, &n.to_string()))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| base.to_path_buf())
}

/// Directory-name form of a timestamp: ISO-8601 at second precision with
/// colons replaced by hyphens.
pub fn timestamp_suffix(now: NaiveDateTime) -> String {
    now.format("%Y-%m-%dT%H-%M-%S").to_string()
}

/// `base` with `-{suffix}` appended to its final component.
///
/// A trailing separator on `base` is ignored, so `run/` becomes `run-1`
/// next to `run`.
pub fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let Some(file_name) = base.file_name() else {
        let mut name = OsString::from(base.as_os_str());
        name.push("-");
        name.push(suffix);
        return PathBuf::from(name);
    };

    let mut name = file_name.to_os_string();
    name.push("-");
    name.push(suffix);
    match base.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

fn occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

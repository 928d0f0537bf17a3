//! Log directory sessions.
//!
//! A [`LogDir`] is created once per run: it picks a fresh directory, records
//! how the run was launched, and hands out subdirectories for the rest of
//! the run.
//!
//! # Example
//!
//! ```
//! use tinylogdir::config::LogDirOptions;
//! use tinylogdir::recorder::{NoVersionControl, SystemContext};
//! use tinylogdir::resolver::CollisionMode;
//! use tinylogdir::session::LogDir;
//! use tinylogdir::ui::NonInteractivePrompt;
//!
//! let temp = tempfile::tempdir().unwrap();
//! let options = LogDirOptions::new(temp.path().join("run")).mode(CollisionMode::Counter);
//! let logdir =
//!     LogDir::create_with(&options, &mut NonInteractivePrompt, &SystemContext, &NoVersionControl)
//!         .unwrap();
//!
//! let ckpt = logdir.subdir("checkpoints").unwrap();
//! assert!(ckpt.is_dir());
//! assert!(ckpt.starts_with(logdir.path()));
//! ```

mod logdir;

pub use logdir::LogDir;

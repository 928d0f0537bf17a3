//! tinylogdir - Output directories for script runs.
//!
//! tinylogdir creates one directory per run, resolves name collisions with an
//! existing directory, and records how the run was launched (command line,
//! host, user, time, pid, selected environment variables and the git
//! revision) in `tinylogdir.yaml` inside it.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Options and config file loading
//! - [`error`] - Error types and result aliases
//! - [`recorder`] - Run metadata capture and version control lookup
//! - [`resolver`] - Collision handling for the requested directory
//! - [`session`] - The [`LogDir`] session and its subdirectories
//! - [`ui`] - Interactive conflict prompts
//!
//! # Example
//!
//! ```
//! use tinylogdir::{LogDir, LogDirOptions};
//! use tinylogdir::recorder::{NoVersionControl, SystemContext, METADATA_FILE};
//! use tinylogdir::ui::NonInteractivePrompt;
//!
//! let temp = tempfile::tempdir().unwrap();
//! let options = LogDirOptions::new(temp.path().join("out")).mode_str("delete").unwrap();
//! let logdir =
//!     LogDir::create_with(&options, &mut NonInteractivePrompt, &SystemContext, &NoVersionControl)
//!         .unwrap();
//!
//! assert!(logdir.path().join(METADATA_FILE).is_file());
//! ```
//!
//! Most programs call [`LogDir::create`], which uses the terminal for
//! prompts and `git` for the revision.

pub mod cli;
pub mod config;
pub mod error;
pub mod recorder;
pub mod resolver;
pub mod session;
pub mod ui;

pub use config::LogDirOptions;
pub use error::{LogDirError, Result};
pub use resolver::CollisionMode;
pub use session::LogDir;

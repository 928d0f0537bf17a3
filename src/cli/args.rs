//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

use crate::resolver::CollisionMode;

/// tinylogdir - Create a log directory for a run and record how it was launched.
#[derive(Debug, Parser)]
#[command(name = "tinylogdir")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log directory to create
    pub path: PathBuf,

    /// What to do if the directory exists: d/delete, t/timestamp, c/counter (prompts if unset)
    #[arg(short, long, env = "TINYLOGDIR_MODE", value_parser = parse_mode)]
    pub mode: Option<CollisionMode>,

    /// Environment variable to record (repeatable; replaces the defaults)
    #[arg(short, long = "env", value_name = "NAME")]
    pub environ: Vec<String>,

    /// Do not save the uncommitted git diff
    #[arg(long)]
    pub no_git_diff: bool,

    /// Config file with shared settings
    #[arg(short, long, env = "TINYLOGDIR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory to start the git repository search from (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub search_from: Option<PathBuf>,

    /// Subdirectory to create inside the log directory (repeatable)
    #[arg(short, long = "subdir", value_name = "REL")]
    pub subdirs: Vec<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Fail instead of prompting when the directory exists
    #[arg(long)]
    pub non_interactive: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

fn parse_mode(s: &str) -> Result<CollisionMode, String> {
    s.parse().map_err(|e: crate::error::LogDirError| e.to_string())
}

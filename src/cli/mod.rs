//! Command-line interface for tinylogdir.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`create`] - The create command behind `tinylogdir <PATH>`

pub mod args;
pub mod create;

pub use args::Cli;
pub use create::{CreateCommand, CreateOutput};

//! Error types for tinylogdir operations.
//!
//! This module defines [`LogDirError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration and path errors are raised before anything touches disk
//! - Version control failures never surface here; the recorder degrades instead
//! - Filesystem and serialization failures propagate to the caller

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tinylogdir operations.
#[derive(Debug, Error)]
pub enum LogDirError {
    /// Unrecognized collision mode.
    #[error("Invalid mode '{mode}' (expected one of: d, delete, t, timestamp, c, counter)")]
    InvalidMode { mode: String },

    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A subdirectory was requested with an absolute path.
    #[error("Path must be relative, got {path}")]
    RelativePathRequired { path: PathBuf },

    /// Something other than a directory occupies the requested path.
    #[error("Path {path} already exists and is not a directory")]
    NotADirectory { path: PathBuf },

    /// The conflict prompt could not produce an answer.
    #[error("No collision mode chosen for {path}: {reason}")]
    PromptClosed { path: PathBuf, reason: String },

    /// Failed to serialize or parse the run metadata document.
    #[error("Failed to process run metadata at {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for tinylogdir operations.
pub type Result<T> = std::result::Result<T, LogDirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_mode_displays_mode_and_choices() {
        let err = LogDirError::InvalidMode {
            mode: "x".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'x'"));
        assert!(msg.contains("timestamp"));
    }

    #[test]
    fn config_not_found_displays_path() {
        let err = LogDirError::ConfigNotFound {
            path: PathBuf::from("/foo/tinylogdir.yml"),
        };
        assert!(err.to_string().contains("/foo/tinylogdir.yml"));
    }

    #[test]
    fn config_parse_displays_path_and_message() {
        let err = LogDirError::ConfigParse {
            path: PathBuf::from("/etc/tinylogdir.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/tinylogdir.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn relative_path_required_displays_path() {
        let err = LogDirError::RelativePathRequired {
            path: PathBuf::from("/abs"),
        };
        assert!(err.to_string().contains("/abs"));
    }

    #[test]
    fn not_a_directory_displays_path() {
        let err = LogDirError::NotADirectory {
            path: PathBuf::from("/tmp/run/file.txt"),
        };
        assert!(err.to_string().contains("/tmp/run/file.txt"));
    }

    #[test]
    fn prompt_closed_displays_path_and_reason() {
        let err = LogDirError::PromptClosed {
            path: PathBuf::from("out"),
            reason: "stdin closed".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("out"));
        assert!(msg.contains("stdin closed"));
    }

    #[test]
    fn metadata_error_displays_path_and_message() {
        let err = LogDirError::Metadata {
            path: PathBuf::from("out/tinylogdir.yaml"),
            message: "invalid type".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("out/tinylogdir.yaml"));
        assert!(msg.contains("invalid type"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: LogDirError = io_err.into();
        assert!(matches!(err, LogDirError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts() {
        let err: LogDirError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, LogDirError::Other(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
